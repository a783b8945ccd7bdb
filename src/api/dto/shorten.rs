//! DTOs for the link shortening endpoint.
//!
//! The body is read into [`ShortenPayload`] with loosely typed fields so that
//! a wrong JSON type surfaces as the matching field error instead of a
//! generic parse failure. [`ShortenPayload::into_request`] then checks the
//! fields in request order (`url`, `validity`, `shortcode`) and yields a
//! typed [`ShortenRequest`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::application::services::CreateShortLink;
use crate::application::services::link_service::{MAX_VALIDITY_MINUTES, check_validity};
use crate::error::AppError;
use crate::utils::code_generator::validate_custom_code;

/// Raw request body of `POST /shorturls`.
///
/// `null` is treated the same as an absent field.
#[derive(Debug, Default, Deserialize)]
pub struct ShortenPayload {
    pub url: Option<Value>,
    pub validity: Option<Value>,
    pub shortcode: Option<Value>,
}

/// Checked request to shorten a URL.
#[derive(Debug, Validate)]
pub struct ShortenRequest {
    /// The original URL (must be an absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Minutes the short link stays valid (default 30, max one year).
    pub validity: Option<i64>,

    /// Optional custom shortcode. Never empty.
    pub shortcode: Option<String>,
}

impl ShortenPayload {
    /// Checks every field and maps the first failure onto the error taxonomy.
    ///
    /// An empty `shortcode` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`], [`AppError::InvalidValidity`] or
    /// [`AppError::InvalidShortcode`], in that order of precedence.
    pub fn into_request(self) -> Result<ShortenRequest, AppError> {
        let url = match self.url {
            Some(Value::String(url)) => url,
            Some(other) => {
                return Err(AppError::invalid_url(format!(
                    "URL must be a string, got {}",
                    json_type(&other)
                )));
            }
            None => return Err(AppError::invalid_url("URL is required")),
        };

        let request = ShortenRequest {
            url,
            validity: None,
            shortcode: None,
        };
        if let Err(errors) = request.validate() {
            let reason = errors
                .field_errors()
                .get("url")
                .and_then(|errs| errs.first())
                .and_then(|err| err.message.as_ref())
                .map_or_else(|| "Invalid URL format".to_string(), |m| m.to_string());
            return Err(AppError::invalid_url(reason));
        }

        let validity = match self.validity {
            None => None,
            Some(value) => match value.as_i64() {
                Some(minutes) => Some(check_validity(minutes)?),
                None => return Err(AppError::invalid_validity(value, MAX_VALIDITY_MINUTES)),
            },
        };

        let shortcode = match self.shortcode {
            None => None,
            Some(Value::String(code)) if code.is_empty() => None,
            Some(Value::String(code)) => {
                validate_custom_code(&code)?;
                Some(code)
            }
            Some(other) => {
                return Err(AppError::invalid_shortcode(format!(
                    "Shortcode must be a string, got {}",
                    json_type(&other)
                )));
            }
        };

        Ok(ShortenRequest {
            validity,
            shortcode,
            ..request
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<ShortenRequest> for CreateShortLink {
    fn from(request: ShortenRequest) -> Self {
        Self {
            url: request.url,
            validity: request.validity,
            shortcode: request.shortcode,
        }
    }
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    /// ISO-8601 UTC, e.g. `2026-01-01T12:30:00Z`.
    pub expiry: String,
}

/// Formats a timestamp as ISO-8601 UTC with second precision.
pub fn format_expiry(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn parse(value: Value) -> Result<ShortenRequest, AppError> {
        serde_json::from_value::<ShortenPayload>(value)
            .unwrap()
            .into_request()
    }

    #[test]
    fn test_minimal_request_is_valid() {
        let request = parse(json!({ "url": "https://a.com" })).unwrap();

        assert_eq!(request.url, "https://a.com");
        assert!(request.validity.is_none());
        assert!(request.shortcode.is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let request =
            parse(json!({ "url": "https://a.com", "validity": null, "shortcode": null })).unwrap();

        assert!(request.validity.is_none());
        assert!(request.shortcode.is_none());
    }

    #[test]
    fn test_missing_or_non_string_url() {
        for body in [json!({}), json!({ "validity": 10 }), json!({ "url": 42 })] {
            assert!(
                matches!(parse(body.clone()), Err(AppError::InvalidUrl { .. })),
                "{body}"
            );
        }
    }

    #[test]
    fn test_invalid_url() {
        let err = parse(json!({ "url": "not a url" })).unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidUrl { ref reason } if reason == "Invalid URL format"
        ));
    }

    #[test]
    fn test_validity_must_be_an_integer() {
        for validity in [json!(1.5), json!("10"), json!(true), json!(99999999999999999999.0)] {
            let err = parse(json!({ "url": "https://a.com", "validity": validity })).unwrap_err();

            assert!(
                matches!(
                    err,
                    AppError::InvalidValidity { ref provided, .. } if *provided == validity
                ),
                "{validity}"
            );
        }
    }

    #[test]
    fn test_validity_bounds() {
        let with_validity = |v: i64| parse(json!({ "url": "https://a.com", "validity": v }));

        assert!(matches!(with_validity(0), Err(AppError::InvalidValidity { .. })));
        assert_eq!(with_validity(1).unwrap().validity, Some(1));
        assert_eq!(
            with_validity(MAX_VALIDITY_MINUTES).unwrap().validity,
            Some(MAX_VALIDITY_MINUTES)
        );
        assert!(with_validity(MAX_VALIDITY_MINUTES + 1).is_err());
    }

    #[test]
    fn test_shortcode_length_bounds() {
        let with_code = |code: &str| parse(json!({ "url": "https://a.com", "shortcode": code }));

        assert!(with_code("go").is_err());
        assert!(with_code("abc").is_ok());
        assert!(with_code("abcdefghij0123456789").is_ok());
        assert!(with_code("abcdefghij0123456789x").is_err());
    }

    #[test]
    fn test_shortcode_must_be_alphanumeric_string() {
        for code in [json!("my-link"), json!(12345), json!(["abc"])] {
            let err = parse(json!({ "url": "https://a.com", "shortcode": code })).unwrap_err();

            assert!(matches!(err, AppError::InvalidShortcode { .. }), "{code}");
        }
    }

    #[test]
    fn test_empty_shortcode_is_dropped() {
        let request = parse(json!({ "url": "https://a.com", "shortcode": "" })).unwrap();

        assert!(request.shortcode.is_none());
    }

    #[test]
    fn test_fields_are_checked_in_request_order() {
        let err = parse(json!({ "url": "nope", "validity": "x", "shortcode": 1 })).unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { .. }));

        let err =
            parse(json!({ "url": "https://a.com", "validity": 0, "shortcode": "go" })).unwrap_err();
        assert!(matches!(err, AppError::InvalidValidity { .. }));

        let err =
            parse(json!({ "url": "https://a.com", "validity": 5, "shortcode": 1 })).unwrap_err();
        assert!(matches!(err, AppError::InvalidShortcode { .. }));
    }

    #[test]
    fn test_valid_request() {
        let request =
            parse(json!({ "url": "https://a.com", "validity": 1, "shortcode": "docs" })).unwrap();

        assert_eq!(request.validity, Some(1));
        assert_eq!(request.shortcode.as_deref(), Some("docs"));
    }

    #[test]
    fn test_response_uses_camel_case() {
        let response = ShortenResponse {
            short_link: "http://localhost:3000/abc123".to_string(),
            expiry: "2026-01-01T12:30:00Z".to_string(),
        };

        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value["shortLink"], "http://localhost:3000/abc123");
        assert_eq!(value["expiry"], "2026-01-01T12:30:00Z");
    }

    #[test]
    fn test_format_expiry() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 12, 30, 0).unwrap();
        assert_eq!(format_expiry(ts), "2026-01-01T12:30:00Z");
    }
}
