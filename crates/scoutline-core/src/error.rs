//! Error types for the story engine.
//!
//! Only contract violations surface here. Stale references and narrative
//! aborts resolve the affected instance instead of producing an error.

use crate::calendar::CalendarError;
use crate::config::ConfigError;
use crate::rng::RngError;
use crate::template::RegistryError;

/// Errors that can occur while scheduling, advancing, or resolving stories.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The random source was called with invalid arguments.
    #[error("random source contract violation: {0}")]
    Rng(#[from] RngError),

    /// A date or week computation fell outside the calendar.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// The authored template data is malformed.
    #[error("template registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The engine configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
