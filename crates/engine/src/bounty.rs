//! Bounty and user lookups.
//!
//! Read-only: these records belong to the main application.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use earn_common::error::AppError;
use earn_common::types::{Bounty, BountyStatus, BountyWithContact, User};

/// Bounty row joined with the sponsor's primary contact columns.
#[derive(Debug, sqlx::FromRow)]
struct BountyContactRow {
    #[sqlx(flatten)]
    bounty: Bounty,
    contact_id: Option<Uuid>,
    contact_email: Option<String>,
    contact_first_name: Option<String>,
}

impl From<BountyContactRow> for BountyWithContact {
    fn from(row: BountyContactRow) -> Self {
        let contact = row.contact_id.map(|id| User {
            id,
            email: row.contact_email,
            first_name: row.contact_first_name,
        });
        BountyWithContact {
            bounty: row.bounty,
            contact,
        }
    }
}

/// Selects bounty columns plus the earliest-linked sponsor user.
const BOUNTY_WITH_CONTACT: &str = r#"
    SELECT b.id, b.title, b.slug, b.deadline, b.status,
           b.is_published, b.is_active, b.is_archived, b.is_winners_announced,
           b.sponsor_id,
           c.id AS contact_id, c.email AS contact_email, c.first_name AS contact_first_name
    FROM bounties b
    LEFT JOIN LATERAL (
        SELECT u.id, u.email, u.first_name
        FROM user_sponsors us
        JOIN users u ON u.id = us.user_id
        WHERE us.sponsor_id = b.sponsor_id
        ORDER BY us.created_at ASC, u.id ASC
        LIMIT 1
    ) c ON true
"#;

pub struct BountyService;

impl BountyService {
    /// Published, active, unarchived open bounties whose deadline is before
    /// `cutoff` and whose winners have not been announced.
    pub async fn find_overdue(
        pool: &PgPool,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BountyWithContact>, AppError> {
        let sql = format!(
            r#"{BOUNTY_WITH_CONTACT}
            WHERE b.is_published = true
              AND b.is_active = true
              AND b.is_archived = false
              AND b.status = $1
              AND b.deadline < $2
              AND b.is_winners_announced = false
            ORDER BY b.deadline ASC, b.id ASC
            "#
        );

        let rows: Vec<BountyContactRow> = sqlx::query_as(&sql)
            .bind(BountyStatus::Open)
            .bind(cutoff)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// A single listing by id, regardless of its flags.
    pub async fn find_listing(
        pool: &PgPool,
        listing_id: Uuid,
    ) -> Result<Option<BountyWithContact>, AppError> {
        let sql = format!("{BOUNTY_WITH_CONTACT} WHERE b.id = $1");

        let row: Option<BountyContactRow> = sqlx::query_as(&sql)
            .bind(listing_id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn find_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
        let user: Option<User> =
            sqlx::query_as("SELECT id, email, first_name FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(pool)
                .await?;

        Ok(user)
    }
}
