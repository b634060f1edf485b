//! Error types for the headless runner.
//!
//! [`SimError`] wraps every failure mode of a run so `main` can propagate
//! with `?`.

/// Top-level error for the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: scoutline_core::config::ConfigError,
    },

    /// The story engine reported a contract violation.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: scoutline_core::EngineError,
    },

    /// The world drift or choice policy drew from a broken random source.
    #[error("rng error: {source}")]
    Rng {
        /// The underlying RNG error.
        #[from]
        source: scoutline_core::rng::RngError,
    },

    /// The story state could not be encoded.
    #[error("save error: {source}")]
    Save {
        /// The underlying save error.
        #[from]
        source: scoutline_core::SaveError,
    },

    /// Writing the save file failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The configured run does not fit in the season counter.
    #[error("season range overflows: start {start}, {seasons} seasons")]
    SeasonOverflow {
        /// First season of the run.
        start: u32,
        /// Number of seasons requested.
        seasons: u32,
    },
}
