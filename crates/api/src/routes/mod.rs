pub mod crons;
pub mod health;
pub mod manual;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(crons::router())
        .merge(manual::router())
        .with_state(state)
}
