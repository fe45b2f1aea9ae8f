//! Notification log — append-only record of notifications already sent.
//!
//! `email_logs` carries `UNIQUE (type, bounty_id)`, so recording is
//! insert-or-ignore. The existence check before a send is still a
//! read-then-write: two overlapping sweeps can both pass it and both send,
//! but only one row is ever stored.

use sqlx::PgPool;
use uuid::Uuid;

use earn_common::error::AppError;
use earn_common::types::{NotificationKind, NotificationLogEntry};

pub struct NotificationLog;

impl NotificationLog {
    /// Whether a notification of `kind` was already recorded for the bounty.
    pub async fn exists(
        pool: &PgPool,
        kind: NotificationKind,
        bounty_id: Uuid,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM email_logs WHERE type = $1 AND bounty_id = $2)",
        )
        .bind(kind)
        .bind(bounty_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Append an entry. Returns `false` if one already existed.
    pub async fn record(
        pool: &PgPool,
        kind: NotificationKind,
        bounty_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO email_logs (id, type, bounty_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (type, bounty_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(kind)
        .bind(bounty_id)
        .execute(pool)
        .await?;

        let inserted = result.rows_affected() > 0;
        if !inserted {
            tracing::warn!(
                bounty_id = %bounty_id,
                kind = %kind,
                "Notification log entry already present"
            );
        }

        Ok(inserted)
    }

    /// All entries for a bounty, oldest first.
    pub async fn list_for_bounty(
        pool: &PgPool,
        bounty_id: Uuid,
    ) -> Result<Vec<NotificationLogEntry>, AppError> {
        let entries: Vec<NotificationLogEntry> = sqlx::query_as(
            "SELECT id, type, bounty_id, created_at FROM email_logs WHERE bounty_id = $1 ORDER BY created_at ASC",
        )
        .bind(bounty_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }
}
