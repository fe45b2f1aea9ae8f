//! Notifications triggered by the web application.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use earn_common::error::AppError;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/email/manual/submission", post(submission))
}

/// Request body for the submission notification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    pub listing_id: String,
    pub user_id: String,
}

/// POST /api/email/manual/submission — Email the submitter and the sponsor.
///
/// Returns 200 even when both emails were skipped for missing data.
async fn submission(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let listing_id = parse_id("listingId", &req.listing_id)?;
    let user_id = parse_id("userId", &req.user_id)?;

    let report = state
        .submissions
        .notify(listing_id, user_id)
        .await
        .map_err(|e| {
            tracing::error!(%listing_id, %user_id, error = %e, "Submission notification failed");
            AppError::Internal(format!("Something went wrong. {}", e))
        })?;

    tracing::info!(
        %listing_id,
        %user_id,
        submitter_notified = report.submitter_notified,
        sponsor_notified = report.sponsor_notified,
        "Submission notifications handled"
    );

    Ok(Json(json!({ "message": "Ok" })))
}

fn parse_id(field: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::Validation(format!("{} must be a valid UUID", field)))
}
