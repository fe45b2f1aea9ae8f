use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use earn_common::error::AppError;

/// A fully rendered email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Errors raised while handing a message to the provider.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<DeliveryError> for AppError {
    fn from(err: DeliveryError) -> Self {
        AppError::Delivery(err.to_string())
    }
}

/// Anything that can deliver an [`EmailMessage`].
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}
