//! QStash request signature verification.
//!
//! Scheduled triggers carry an `Upstash-Signature` header: an HS256 JWT
//! signed with one of two rotating keys. [`QstashSignature`] is an Axum
//! extractor that rejects the request unless the token verifies with the
//! current or the next key, was issued by `Upstash` and is inside its
//! validity window. The request body is never read.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use earn_common::error::AppError;

use crate::state::AppState;

pub const SIGNATURE_HEADER: &str = "upstash-signature";

const ISSUER: &str = "Upstash";

/// Claims QStash puts in the signature token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SignatureClaims {
    /// Always `Upstash`
    pub iss: String,
    /// Destination URL the message was published to
    pub sub: String,
    /// Expiration time (UNIX timestamp)
    pub exp: i64,
    /// Not valid before (UNIX timestamp)
    #[serde(default)]
    pub nbf: Option<i64>,
    /// Issued at (UNIX timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    /// Unique message id
    #[serde(default)]
    pub jti: Option<String>,
    /// Base64url SHA-256 of the request body
    #[serde(default)]
    pub body: Option<String>,
}

/// The pair of keys QStash may sign with during a rotation.
#[derive(Debug, Clone)]
pub struct SigningKeys {
    pub current: String,
    pub next: Option<String>,
}

/// Proof that the request came from the trusted scheduler.
#[derive(Debug, Clone)]
pub struct QstashSignature {
    pub claims: SignatureClaims,
}

/// Verify a signature token against the current key, then the next one.
pub fn verify_signature(token: &str, keys: &SigningKeys) -> Result<SignatureClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_nbf = true;
    validation.validate_aud = false;

    let candidates = std::iter::once(keys.current.as_str()).chain(keys.next.as_deref());

    let mut last_error = None;
    for key in candidates {
        match decode::<SignatureClaims>(token, &DecodingKey::from_secret(key.as_bytes()), &validation)
        {
            Ok(data) => return Ok(data.claims),
            Err(e) => last_error = Some(e),
        }
    }

    Err(AppError::Auth(format!(
        "Invalid signature: {}",
        last_error.map(|e| e.to_string()).unwrap_or_default()
    )))
}

impl FromRequestParts<AppState> for QstashSignature {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let keys = state.signing_keys.clone();

        let header = parts
            .headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        async move {
            let token = header.ok_or_else(|| {
                AppError::Auth("Missing Upstash-Signature header".to_string())
            })?;
            let claims = verify_signature(&token, &keys)?;

            tracing::debug!(
                message_id = claims.jti.as_deref().unwrap_or("-"),
                "Verified scheduler signature"
            );
            Ok(QstashSignature { claims })
        }
    }
}
