//! Domain layer: entities, repository contracts and the time source.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injectable clock for expiry decisions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod clock;
pub mod entities;
pub mod repositories;
