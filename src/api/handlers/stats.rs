//! Handler for short link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored state of a short link, expired or not.
///
/// # Endpoint
///
/// `GET /shorturls/{code}`
///
/// Does not count as an access.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let expired = state.link_service.is_expired(&link);

    Ok(Json(LinkStatsResponse::new(link, expired)))
}
