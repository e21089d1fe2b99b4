pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::Pipeline;

/// Shared application state, fixed at startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/request", post(handlers::predict))
        .with_state(state)
}
