//! HTTP surface of the notification service.
//!
//! Endpoints:
//! - POST /api/email/crons/deadline-exceeded-week — scheduled sweep (signed)
//! - POST /api/email/manual/submission — submission received notifications
//! - GET  /health

pub mod middleware;
pub mod routes;
pub mod state;
