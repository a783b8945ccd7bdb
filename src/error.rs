//! Application error type and its HTTP mapping.
//!
//! Every failure a request can hit is one [`AppError`] variant. Handlers return
//! `Result<_, AppError>` and Axum renders the error through [`IntoResponse`]
//! as a JSON body:
//!
//! ```json
//! { "error": { "code": "shortcode_taken", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("Invalid validity period: {provided} (expected an integer from 1 to {max} minutes)")]
    InvalidValidity { provided: Value, max: i64 },

    #[error("Invalid shortcode: {reason}")]
    InvalidShortcode { reason: String },

    #[error("Shortcode already taken: {code}")]
    ShortcodeTaken { code: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("Could not generate a unique shortcode after {attempts} attempts")]
    CodeGenerationExhausted { attempts: usize },

    #[error("Short URL not found: {code}")]
    NotFound { code: String },

    #[error("Short URL has expired: {code}")]
    Expired { code: String },

    #[error("Database error")]
    Persistence(#[from] sqlx::Error),
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    pub fn invalid_validity(provided: impl Into<Value>, max: i64) -> Self {
        Self::InvalidValidity {
            provided: provided.into(),
            max,
        }
    }

    pub fn invalid_shortcode(reason: impl Into<String>) -> Self {
        Self::InvalidShortcode {
            reason: reason.into(),
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidValidity { .. }
            | AppError::InvalidShortcode { .. }
            | AppError::ShortcodeTaken { .. }
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::CodeGenerationExhausted { .. } | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into its serializable body without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            AppError::InvalidUrl { reason } => ("invalid_url", json!({ "reason": reason })),
            AppError::InvalidValidity { provided, max } => (
                "invalid_validity",
                json!({ "provided": provided, "min": 1, "max": max }),
            ),
            AppError::InvalidShortcode { reason } => {
                ("invalid_shortcode", json!({ "reason": reason }))
            }
            AppError::ShortcodeTaken { code } => ("shortcode_taken", json!({ "shortcode": code })),
            AppError::BadRequest(_) => ("bad_request", json!({})),
            AppError::CodeGenerationExhausted { attempts } => (
                "code_generation_exhausted",
                json!({ "attempts": attempts }),
            ),
            AppError::NotFound { code } => ("not_found", json!({ "shortcode": code })),
            AppError::Expired { code } => ("expired", json!({ "shortcode": code })),
            AppError::Persistence(_) => ("internal_error", json!({})),
        };

        let message = match self {
            AppError::Persistence(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Persistence(ref e) = self {
            tracing::error!(error = %e, "Persistence failure");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
