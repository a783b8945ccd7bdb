//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization; request DTOs use validator for
//! input shape checks.

pub mod health;
pub mod shorten;
pub mod stats;
