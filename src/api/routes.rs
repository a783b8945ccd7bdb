//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `GET  /`                 - Health check
/// - `POST /shorturls`        - Create a short link
/// - `GET  /shorturls/{code}` - Link details and access count
/// - `GET  /{code}`           - Redirect to the target URL
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_handler))
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/{code}", get(stats_handler))
        .route("/{code}", get(redirect_handler))
}
