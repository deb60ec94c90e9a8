//! Configuration models and loading for the concierge backend.
//!
//! This crate owns the concierge config schema, JSON5 file loading,
//! environment overrides, and validation used by the server binary.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Environment variable names recognized by the loader.
pub use loader::{API_KEY_ENV, PORT_ENV};
/// Configuration schema models.
pub use model::*;
