//! DTOs for the link statistics endpoint.

use serde::Serialize;

use crate::api::dto::shorten::format_expiry;
use crate::domain::entities::ShortLink;

/// Current state of a short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatsResponse {
    pub shortcode: String,
    pub url: String,
    pub expiry: String,
    pub created_at: String,
    pub access_count: i64,
    pub expired: bool,
}

impl LinkStatsResponse {
    pub fn new(link: ShortLink, expired: bool) -> Self {
        Self {
            expiry: format_expiry(link.expires_at),
            created_at: format_expiry(link.created_at),
            shortcode: link.code,
            url: link.target_url,
            access_count: link.access_count,
            expired,
        }
    }
}
