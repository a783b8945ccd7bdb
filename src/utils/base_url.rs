//! Resolution of the public base URL used to build short links.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Returns the base URL short links are built on.
///
/// A configured base URL wins. Otherwise the `Host` header of the request is
/// used, port included, behind an `http://` scheme. Trailing slashes are
/// stripped so callers can append `/{code}`.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] if no base URL is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// assert_eq!(resolve_base_url(None, &headers).unwrap(), "http://localhost:3000");
/// assert_eq!(resolve_base_url(Some("https://s.io/"), &headers).unwrap(), "https://s.io");
/// ```
pub fn resolve_base_url(
    configured: Option<&str>,
    headers: &HeaderMap,
) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::BadRequest("Missing Host header".to_string()))?
        .to_str()
        .map_err(|_| AppError::BadRequest("Invalid Host header".to_string()))?
        .trim();

    if host.is_empty() {
        return Err(AppError::BadRequest("Missing Host header".to_string()));
    }

    Ok(format!("http://{}", host.trim_end_matches('/')))
}

/// Joins a base URL and a short code.
pub fn short_link(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
