//! Short code generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum length of a user-provided shortcode.
pub const MIN_CODE_LENGTH: usize = 3;

/// Maximum length of a user-provided shortcode.
pub const MAX_CODE_LENGTH: usize = 20;

/// Codes that collide with service routes.
const RESERVED_CODES: &[&str] = &["shorturls"];

/// Alphabet accepted in shortcodes.
static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("shortcode regex is valid"));

/// Returns true if `code` is claimed by a service route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Generates a random base62 (`[A-Za-z0-9]`) short code of `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom shortcode.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::InvalidShortcode`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    let length = code.chars().count();
    if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
        return Err(AppError::invalid_shortcode(format!(
            "Shortcode must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} characters, got {length}"
        )));
    }

    if !SHORTCODE_REGEX.is_match(code) {
        return Err(AppError::invalid_shortcode("Shortcode must be alphanumeric"));
    }

    if is_reserved(code) {
        return Err(AppError::invalid_shortcode(format!(
            "Shortcode '{code}' is reserved"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(6).len(), 6);
        assert_eq!(generate_code(12).len(), 12);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        for _ in 0..100 {
            let code = generate_code(6);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generated_code_passes_custom_validation() {
        let code = generate_code(6);
        assert!(validate_custom_code(&code).is_ok());
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code(10)).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_boundaries() {
        assert!(validate_custom_code("go").is_err());
        assert!(validate_custom_code("abc").is_ok());
        assert!(validate_custom_code("abcdefghij0123456789").is_ok());
        assert!(validate_custom_code("abcdefghij0123456789x").is_err());
    }

    #[test]
    fn test_validate_too_short_message() {
        let err = validate_custom_code("go").unwrap_err();
        assert!(matches!(err, AppError::InvalidShortcode { .. }));
        assert!(err.to_string().contains("3-20 characters"));
    }

    #[test]
    fn test_validate_mixed_case_and_digits() {
        assert!(validate_custom_code("Docs2026").is_ok());
        assert!(validate_custom_code("123").is_ok());
    }

    #[test]
    fn test_validate_rejects_non_alphanumeric() {
        for code in ["my-link", "my_link", "my link", "abc!", "héllo"] {
            let err = validate_custom_code(code).unwrap_err();
            assert!(err.to_string().contains("alphanumeric"), "{code}");
        }
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("shorturls"));
        assert!(!is_reserved("ShortUrls"));
        assert!(!is_reserved("abc123"));
    }

    #[test]
    fn test_validate_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{reserved}' should be invalid"
            );
        }
    }
}
