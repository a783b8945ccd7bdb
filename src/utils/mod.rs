//! Helpers shared across layers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Target URL validation
//! - [`base_url`] - Short link base URL resolution

pub mod base_url;
pub mod code_generator;
pub mod url_validator;
