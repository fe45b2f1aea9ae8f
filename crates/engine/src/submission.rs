//! Submission notifier — emails the submitter and the sponsor when a
//! submission comes in.
//!
//! The two sends are independent: each is skipped when its data is
//! incomplete, and a failure of one does not prevent the other. Nothing is
//! logged for deduplication; the caller triggers this once per submission.

use std::sync::Arc;

use uuid::Uuid;

use earn_common::config::AppConfig;
use earn_common::error::AppError;
use earn_common::types::{BountyWithContact, User, non_blank};
use earn_notifier::message::{EmailMessage, EmailSender};
use earn_notifier::templates;

use crate::store::NotificationStore;

#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub sender: String,
    pub app_base_url: String,
}

impl From<&AppConfig> for SubmissionSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            sender: config.sender(),
            app_base_url: config.app_base_url.clone(),
        }
    }
}

/// Which of the two emails went out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub submitter_notified: bool,
    pub sponsor_notified: bool,
}

pub struct SubmissionNotifier {
    store: Arc<dyn NotificationStore>,
    mailer: Arc<dyn EmailSender>,
    settings: SubmissionSettings,
}

impl SubmissionNotifier {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        mailer: Arc<dyn EmailSender>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            store,
            mailer,
            settings,
        }
    }

    /// Notify both parties about a submission by `user_id` to `listing_id`.
    ///
    /// A missing listing or user is not an error; the affected sends are
    /// skipped. If either send fails the first error is returned after both
    /// have been attempted.
    pub async fn notify(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> Result<SubmissionReport, AppError> {
        let listing = self.store.find_listing(listing_id).await?;
        let user = self.store.find_user(user_id).await?;

        let submitter = self.notify_submitter(listing.as_ref(), user.as_ref()).await;
        let sponsor = self.notify_sponsor(listing.as_ref(), user.as_ref()).await;

        if let Err(e) = &submitter {
            tracing::error!(%listing_id, %user_id, error = %e, "Submitter email failed");
        }
        if let Err(e) = &sponsor {
            tracing::error!(%listing_id, %user_id, error = %e, "Sponsor email failed");
        }

        Ok(SubmissionReport {
            submitter_notified: submitter?,
            sponsor_notified: sponsor?,
        })
    }

    async fn notify_submitter(
        &self,
        listing: Option<&BountyWithContact>,
        user: Option<&User>,
    ) -> Result<bool, AppError> {
        let Some(title) = listing.and_then(|l| non_blank(Some(l.bounty.title.as_str()))) else {
            return Ok(false);
        };
        let Some((email, name)) = user.and_then(User::addressable) else {
            tracing::debug!("Submitter missing email or name, skipping confirmation");
            return Ok(false);
        };

        let rendered = templates::submission_received(name, title);
        self.deliver(email, rendered).await?;

        tracing::info!(to = %email, "Submission confirmation sent");
        Ok(true)
    }

    async fn notify_sponsor(
        &self,
        listing: Option<&BountyWithContact>,
        user: Option<&User>,
    ) -> Result<bool, AppError> {
        let Some(listing) = listing else {
            return Ok(false);
        };
        let Some(title) = non_blank(Some(listing.bounty.title.as_str())) else {
            return Ok(false);
        };
        if user.and_then(|u| non_blank(u.email.as_deref())).is_none() {
            return Ok(false);
        }
        let Some((email, name)) = listing.contact.as_ref().and_then(User::addressable) else {
            tracing::debug!(
                listing_id = %listing.bounty.id,
                "Sponsor contact missing email or name, skipping notice"
            );
            return Ok(false);
        };

        let link = templates::listing_link(&self.settings.app_base_url, &listing.bounty.slug);
        let rendered = templates::new_submission(name, title, &link);
        self.deliver(email, rendered).await?;

        tracing::info!(listing_id = %listing.bounty.id, to = %email, "Sponsor submission notice sent");
        Ok(true)
    }

    async fn deliver(&self, to: &str, rendered: templates::RenderedEmail) -> Result<(), AppError> {
        let message = EmailMessage {
            from: self.settings.sender.clone(),
            to: vec![to.to_string()],
            bcc: vec![],
            subject: rendered.subject,
            html: rendered.html,
        };
        self.mailer.send(&message).await?;
        Ok(())
    }
}
