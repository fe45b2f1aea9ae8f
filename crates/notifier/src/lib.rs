//! Outbound email delivery.
//!
//! - [`message`] — the provider-agnostic message model and [`EmailSender`] trait
//! - [`resend`] — Resend HTTP API client
//! - [`templates`] — subject + HTML renderers for each notification

pub mod message;
pub mod resend;
pub mod templates;

pub use message::{DeliveryError, EmailMessage, EmailSender};
pub use resend::ResendClient;
