//! Configuration loading and typed config structures for the story engine.
//!
//! The canonical configuration lives in `scoutline-config.yaml` at the
//! project root. Every field has a default matching the shipped game
//! balance, so an empty file (or no file at all) is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::calendar::{EVENT_CHAIN_WEEKS_PER_SEASON, STORYLINE_WEEKS_PER_SEASON};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an impossible value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoutlineConfig {
    /// Headless simulation settings (seed, length).
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Storyline engine parameters.
    #[serde(
        default = "VariantConfig::storyline",
        deserialize_with = "storyline_section"
    )]
    pub storylines: VariantConfig,

    /// Event-chain engine parameters.
    #[serde(
        default = "VariantConfig::event_chain",
        deserialize_with = "event_chain_section"
    )]
    pub event_chains: VariantConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ScoutlineConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            storylines: VariantConfig::storyline(),
            event_chains: VariantConfig::event_chain(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ScoutlineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SCOUTLINE_SEED` overrides `simulation.seed`
    /// - `SCOUTLINE_LOG` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        config.with_env_overrides()
    }

    /// Shipped defaults with environment overrides applied, for when no
    /// configuration file exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an override is malformed or
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Parse configuration from a YAML string and validate it.
    ///
    /// The environment is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        self.apply_env_overrides()?;
        self.validate()?;
        Ok(self)
    }

    /// Override selected values with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `SCOUTLINE_SEED` is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SCOUTLINE_SEED") {
            self.simulation.seed = val.parse().map_err(|_err| ConfigError::Invalid {
                reason: format!("SCOUTLINE_SEED must be an unsigned integer, got {val:?}"),
            })?;
        }
        if let Ok(val) = std::env::var("SCOUTLINE_LOG") {
            self.logging.level = val;
        }
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storylines.validate("storylines")?;
        self.event_chains.validate("event_chains")?;
        self.simulation.validate()?;
        for (name, variant) in [
            ("storylines", &self.storylines),
            ("event_chains", &self.event_chains),
        ] {
            if self.simulation.weeks_per_season > variant.weeks_per_season {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "simulation.weeks_per_season ({}) exceeds {name}.weeks_per_season ({})",
                        self.simulation.weeks_per_season, variant.weeks_per_season
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Parameters of one engine variant.
///
/// Read from YAML through the per-variant section shapes below, so each
/// section falls back to its own variant's balance field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfig {
    /// Season length of this variant's calendar.
    pub weeks_per_season: u32,

    /// Probability that the weekly trigger roll starts a new instance.
    pub trigger_chance: f64,

    /// Maximum number of unresolved instances at trigger time.
    pub max_concurrent: usize,
}

impl VariantConfig {
    /// Shipped storyline balance: 38-week seasons, 5% weekly, two at once.
    pub const fn storyline() -> Self {
        Self {
            weeks_per_season: default_storyline_weeks(),
            trigger_chance: default_storyline_trigger_chance(),
            max_concurrent: default_storyline_max_concurrent(),
        }
    }

    /// Shipped event-chain balance: 52-week seasons, 10% weekly, three at once.
    pub const fn event_chain() -> Self {
        Self {
            weeks_per_season: default_event_chain_weeks(),
            trigger_chance: default_event_chain_trigger_chance(),
            max_concurrent: default_event_chain_max_concurrent(),
        }
    }

    /// Check this variant's values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the section and field.
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.weeks_per_season == 0 {
            return Err(ConfigError::Invalid {
                reason: format!("{section}.weeks_per_season must be at least 1"),
            });
        }
        if !(0.0..=1.0).contains(&self.trigger_chance) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "{section}.trigger_chance must be within [0, 1], got {}",
                    self.trigger_chance
                ),
            });
        }
        if self.max_concurrent == 0 {
            return Err(ConfigError::Invalid {
                reason: format!("{section}.max_concurrent must be at least 1"),
            });
        }
        Ok(())
    }
}

/// The `storylines` section as written in YAML.
#[derive(Debug, Deserialize)]
struct StorylineSection {
    #[serde(default = "default_storyline_weeks")]
    weeks_per_season: u32,
    #[serde(default = "default_storyline_trigger_chance")]
    trigger_chance: f64,
    #[serde(default = "default_storyline_max_concurrent")]
    max_concurrent: usize,
}

/// The `event_chains` section as written in YAML.
#[derive(Debug, Deserialize)]
struct EventChainSection {
    #[serde(default = "default_event_chain_weeks")]
    weeks_per_season: u32,
    #[serde(default = "default_event_chain_trigger_chance")]
    trigger_chance: f64,
    #[serde(default = "default_event_chain_max_concurrent")]
    max_concurrent: usize,
}

fn storyline_section<'de, D>(deserializer: D) -> Result<VariantConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let section = StorylineSection::deserialize(deserializer)?;
    Ok(VariantConfig {
        weeks_per_season: section.weeks_per_season,
        trigger_chance: section.trigger_chance,
        max_concurrent: section.max_concurrent,
    })
}

fn event_chain_section<'de, D>(deserializer: D) -> Result<VariantConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let section = EventChainSection::deserialize(deserializer)?;
    Ok(VariantConfig {
        weeks_per_season: section.weeks_per_season,
        trigger_chance: section.trigger_chance,
        max_concurrent: section.max_concurrent,
    })
}

/// Headless simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of seasons to simulate.
    #[serde(default = "default_seasons")]
    pub seasons: u32,

    /// Season length of the simulated world.
    #[serde(default = "default_weeks_per_season")]
    pub weeks_per_season: u32,

    /// First season number.
    #[serde(default = "default_starting_season")]
    pub starting_season: u32,
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.seasons == 0 || self.weeks_per_season == 0 || self.starting_season == 0 {
            return Err(ConfigError::Invalid {
                reason: "simulation.seasons, weeks_per_season and starting_season must be at least 1"
                    .to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            seasons: default_seasons(),
            weeks_per_season: default_weeks_per_season(),
            starting_season: default_starting_season(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_seasons() -> u32 {
    2
}

const fn default_weeks_per_season() -> u32 {
    STORYLINE_WEEKS_PER_SEASON
}

const fn default_starting_season() -> u32 {
    1
}

const fn default_storyline_weeks() -> u32 {
    STORYLINE_WEEKS_PER_SEASON
}

const fn default_storyline_trigger_chance() -> f64 {
    0.05
}

const fn default_storyline_max_concurrent() -> usize {
    2
}

const fn default_event_chain_weeks() -> u32 {
    EVENT_CHAIN_WEEKS_PER_SEASON
}

const fn default_event_chain_trigger_chance() -> f64 {
    0.10
}

const fn default_event_chain_max_concurrent() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_owned()
}
