//! Short link entity: the mapping from a short code to its target URL.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `expires_at` never changes after creation and `access_count` only grows.
/// Expired links are kept and reported as gone rather than purged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target_url: String,
    pub expires_at: DateTime<Utc>,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Returns true once `now` has reached the expiry timestamp.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub target_url: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<NewShortLink> for ShortLink {
    fn from(new_link: NewShortLink) -> Self {
        Self {
            code: new_link.code,
            target_url: new_link.target_url,
            expires_at: new_link.expires_at,
            access_count: 0,
            created_at: new_link.created_at,
        }
    }
}
