//! Test helpers shared across concierge crates.

pub mod provider;

pub use provider::{FailingProvider, FixedProvider, RecordingProvider, SlowProvider};
