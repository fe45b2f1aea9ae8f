//! Shared application state for the Axum API server.

use std::sync::Arc;

use earn_common::config::AppConfig;
use earn_engine::deadline_sweep::{DeadlineSweep, SweepSettings};
use earn_engine::store::NotificationStore;
use earn_engine::submission::{SubmissionNotifier, SubmissionSettings};
use earn_notifier::message::EmailSender;

use crate::middleware::signature::SigningKeys;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub signing_keys: SigningKeys,
    pub sweep: Arc<DeadlineSweep>,
    pub submissions: Arc<SubmissionNotifier>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn NotificationStore>,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        let sweep = DeadlineSweep::new(store.clone(), mailer.clone(), SweepSettings::from(&config));
        let submissions = SubmissionNotifier::new(store, mailer, SubmissionSettings::from(&config));
        let signing_keys = SigningKeys {
            current: config.qstash_current_signing_key.clone(),
            next: config.qstash_next_signing_key.clone(),
        };

        Self {
            signing_keys,
            sweep: Arc::new(sweep),
            submissions: Arc::new(submissions),
        }
    }
}
