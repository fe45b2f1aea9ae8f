//! Data-store seam used by the notification handlers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use earn_common::error::AppError;
use earn_common::types::{BountyWithContact, NotificationKind, User};

use crate::bounty::BountyService;
use crate::notification_log::NotificationLog;

/// Reads bounties and users, and appends to the notification log.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn find_overdue_bounties(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BountyWithContact>, AppError>;

    async fn has_notification(
        &self,
        kind: NotificationKind,
        bounty_id: Uuid,
    ) -> Result<bool, AppError>;

    /// Returns `true` if a new entry was written.
    async fn record_notification(
        &self,
        kind: NotificationKind,
        bounty_id: Uuid,
    ) -> Result<bool, AppError>;

    async fn find_listing(&self, listing_id: Uuid) -> Result<Option<BountyWithContact>, AppError>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn find_overdue_bounties(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BountyWithContact>, AppError> {
        BountyService::find_overdue(&self.pool, cutoff).await
    }

    async fn has_notification(
        &self,
        kind: NotificationKind,
        bounty_id: Uuid,
    ) -> Result<bool, AppError> {
        NotificationLog::exists(&self.pool, kind, bounty_id).await
    }

    async fn record_notification(
        &self,
        kind: NotificationKind,
        bounty_id: Uuid,
    ) -> Result<bool, AppError> {
        NotificationLog::record(&self.pool, kind, bounty_id).await
    }

    async fn find_listing(&self, listing_id: Uuid) -> Result<Option<BountyWithContact>, AppError> {
        BountyService::find_listing(&self.pool, listing_id).await
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        BountyService::find_user(&self.pool, user_id).await
    }
}
