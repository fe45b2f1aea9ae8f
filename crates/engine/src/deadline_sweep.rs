//! Deadline sweep — reminds sponsors whose bounties are well past deadline.
//!
//! A run:
//! 1. Computes `cutoff = now - grace_days`
//! 2. Loads open, published, active, unarchived bounties with a deadline
//!    before the cutoff and no winners announced
//! 3. Per bounty: skip if a `deadline-week` log entry exists, skip if the
//!    sponsor's primary contact lacks an email or first name, otherwise send
//!    the reminder and append the log entry
//!
//! Sends go through the [`Dispatcher`] with a fixed cap. Any store or
//! provider failure aborts the run once the current chunk settles.
//!
//! Sending and logging are not transactional. If the process dies between
//! the two, the next run sends the reminder again.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use earn_common::config::AppConfig;
use earn_common::error::AppError;
use earn_common::types::{BountyWithContact, NotificationKind, User};
use earn_notifier::message::{EmailMessage, EmailSender};
use earn_notifier::templates;

use crate::dispatcher::Dispatcher;
use crate::store::NotificationStore;

const KIND: NotificationKind = NotificationKind::DeadlineWeek;

/// Settings for a sweep, taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct SweepSettings {
    pub sender: String,
    pub bcc: Vec<String>,
    pub app_base_url: String,
    pub grace_days: i64,
    pub max_in_flight: usize,
}

impl From<&AppConfig> for SweepSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            sender: config.sender(),
            bcc: config.sweep_bcc.clone(),
            app_base_url: config.app_base_url.clone(),
            grace_days: config.deadline_grace_days,
            max_in_flight: config.dispatch_concurrency,
        }
    }
}

/// What happened to a single candidate bounty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Notified(Uuid),
    AlreadyNotified,
    MissingContact,
}

/// Summary of one sweep run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub candidates: usize,
    /// Bounties emailed during this run, in query order.
    pub notified: Vec<Uuid>,
    pub already_notified: usize,
    pub missing_contact: usize,
}

pub struct DeadlineSweep {
    store: Arc<dyn NotificationStore>,
    mailer: Arc<dyn EmailSender>,
    settings: SweepSettings,
    dispatcher: Dispatcher,
}

impl DeadlineSweep {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        mailer: Arc<dyn EmailSender>,
        settings: SweepSettings,
    ) -> Self {
        let dispatcher = Dispatcher::new(settings.max_in_flight);
        Self {
            store,
            mailer,
            settings,
            dispatcher,
        }
    }

    /// Bounties with a deadline strictly before this instant are candidates.
    ///
    /// A negative or out-of-range grace period is a configuration error; it
    /// would otherwise move the cutoff past `now` or overflow.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
        let grace_days = self.settings.grace_days;
        if grace_days < 0 {
            return Err(AppError::Config(format!(
                "deadline grace period must not be negative, got {grace_days} days"
            )));
        }
        Duration::try_days(grace_days)
            .and_then(|grace| now.checked_sub_signed(grace))
            .ok_or_else(|| {
                AppError::Config(format!(
                    "deadline grace period of {grace_days} days is out of range"
                ))
            })
    }

    /// Run one sweep as of `now`.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<SweepReport, AppError> {
        let cutoff = self.cutoff(now)?;
        let candidates = self.store.find_overdue_bounties(cutoff).await?;

        tracing::debug!(
            %cutoff,
            candidates = candidates.len(),
            "Deadline sweep candidates loaded"
        );

        let total = candidates.len();
        let ops: Vec<_> = candidates
            .into_iter()
            .map(|candidate| move || async move { self.process(&candidate).await })
            .collect();
        let outcomes = self.dispatcher.try_dispatch(ops).await?;

        let mut report = SweepReport {
            candidates: total,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                Outcome::Notified(id) => report.notified.push(id),
                Outcome::AlreadyNotified => report.already_notified += 1,
                Outcome::MissingContact => report.missing_contact += 1,
            }
        }

        if !report.notified.is_empty() {
            tracing::info!(bounty_ids = ?report.notified, "Sent deadline emails for bounties");
        }

        Ok(report)
    }

    async fn process(&self, candidate: &BountyWithContact) -> Result<Outcome, AppError> {
        let bounty = &candidate.bounty;

        if self.store.has_notification(KIND, bounty.id).await? {
            tracing::debug!(bounty_id = %bounty.id, "Already notified, skipping");
            return Ok(Outcome::AlreadyNotified);
        }

        let Some((email, name)) = candidate.contact.as_ref().and_then(User::addressable) else {
            tracing::debug!(
                bounty_id = %bounty.id,
                "Sponsor contact missing email or name, skipping"
            );
            return Ok(Outcome::MissingContact);
        };

        let link = templates::listing_link(&self.settings.app_base_url, &bounty.slug);
        let rendered = templates::deadline_exceeded_week(name, &bounty.title, &link);
        let message = EmailMessage {
            from: self.settings.sender.clone(),
            to: vec![email.to_string()],
            bcc: self.settings.bcc.clone(),
            subject: rendered.subject,
            html: rendered.html,
        };

        self.mailer.send(&message).await?;
        self.store.record_notification(KIND, bounty.id).await?;

        tracing::info!(bounty_id = %bounty.id, to = %email, "Deadline reminder sent");
        Ok(Outcome::Notified(bounty.id))
    }
}
