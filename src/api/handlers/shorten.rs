//! Handler for the link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};

use crate::api::dto::shorten::{ShortenPayload, ShortenResponse, format_expiry};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::{resolve_base_url, short_link};

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 30,        // optional, minutes
///   "shortcode": "docs"    // optional, 3-20 alphanumeric
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortLink": "http://localhost:3000/docs",
///   "expiry": "2026-01-01T12:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a body that is not a JSON object, an invalid
/// or missing URL, a validity that is not an integer in range, an invalid
/// shortcode, or a shortcode that is already taken.
/// Returns 500 if storage fails or no free code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenPayload>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Rejected request body");
        AppError::BadRequest(rejection.body_text())
    })?;

    let request = payload.into_request()?;

    let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let link = state
        .link_service
        .create_short_link(request.into())
        .await?;

    Ok(Json(ShortenResponse {
        short_link: short_link(&base_url, &link.code),
        expiry: format_expiry(link.expires_at),
    }))
}
