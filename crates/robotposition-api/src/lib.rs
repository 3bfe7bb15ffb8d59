//! Robot position service: HTTP API.
//!
//! Exposes the Robot context over Axum. The binary in `main.rs` wires
//! configuration, telemetry, and the PostgreSQL event store together.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every route mounted.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/robots", routes::robot::router())
        .with_state(state)
}
