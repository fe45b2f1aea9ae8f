//! Scheduled jobs, triggered by QStash.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use earn_common::error::AppError;

use crate::middleware::signature::QstashSignature;
use crate::state::AppState;

/// Returned to the scheduler on any failure; details stay in the server log.
const GENERIC_FAILURE: &str = "Something went wrong. Check server logs for details.";

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/email/crons/deadline-exceeded-week",
        post(deadline_exceeded_week),
    )
}

/// POST /api/email/crons/deadline-exceeded-week — Remind sponsors whose bounty
/// deadline passed a week ago without winners announced.
async fn deadline_exceeded_week(
    State(state): State<AppState>,
    _signature: QstashSignature,
) -> Result<Json<serde_json::Value>, AppError> {
    let report = state.sweep.run(Utc::now()).await.map_err(|e| {
        tracing::error!(error = %e, "Deadline sweep failed");
        AppError::Internal(GENERIC_FAILURE.to_string())
    })?;

    tracing::info!(
        candidates = report.candidates,
        notified = report.notified.len(),
        already_notified = report.already_notified,
        missing_contact = report.missing_contact,
        "Deadline sweep finished"
    );

    Ok(Json(json!({ "message": "Ok" })))
}
