//! Resend (<https://resend.com>) email delivery over its HTTP API.

use async_trait::async_trait;
use reqwest::Client;

use crate::message::{DeliveryError, EmailMessage, EmailSender};

#[derive(Clone)]
pub struct ResendClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for ResendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ResendClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "Resend rejected email");
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = ?message.to, subject = %message.subject, "Email accepted by Resend");
        Ok(())
    }
}
