//! API route handlers

pub mod events;
pub mod health;
pub mod pool;
pub mod reserve;
pub mod summary;
pub mod token;
pub mod tx;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/summary", get(summary::get_summary))
        .nest("/token", token::router())
        .nest("/reserve", reserve::router())
        .nest("/pool", pool::router())
        .nest("/tx", tx::router())
        .nest("/events", events::router())
        .with_state(state)
}
