//! JSON API consumed by the studio's website.

mod error;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::AppState;

pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/contact", post(routes::submit_quick_contact))
        .route("/api/contact/project", post(routes::submit_project_contact))
        .route("/api/estimate", post(routes::estimate))
        .route("/api/phone-lead", post(routes::capture_phone_lead))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
