//! Story scheduling and resolution for the Scoutline career game.
//!
//! This crate owns the weekly story cycle: triggering new multi-stage
//! stories, advancing running ones against a per-variant calendar, and
//! resolving the player's choices into context updates and stat deltas.
//! Everything is synchronous and deterministic given a seeded random source.
//!
//! # Modules
//!
//! - [`calendar`] -- Season/week to absolute-week conversion.
//! - [`rng`] -- The [`StoryRng`] contract, [`SeededRng`] and [`SequenceRng`].
//! - [`config`] -- Configuration loading from `scoutline-config.yaml`.
//! - [`template`] -- Template, stage, and registry definitions.
//! - [`context`] -- Per-template instance context records.
//! - [`instance`] -- The persisted [`Instance`] record.
//! - [`engine`] -- The [`StoryEngine`] scheduler for one variant.
//! - [`choice`] -- Choice resolution and the effect table.
//! - [`director`] -- The [`NarrativeDirector`] running both variants.
//! - [`save`] -- The [`StoryState`] save-file fragment.
//! - [`catalog`] -- The authored storyline and event-chain templates.
//!
//! [`StoryRng`]: rng::StoryRng
//! [`SeededRng`]: rng::SeededRng
//! [`SequenceRng`]: rng::SequenceRng
//! [`Instance`]: instance::Instance
//! [`StoryEngine`]: engine::StoryEngine
//! [`NarrativeDirector`]: director::NarrativeDirector
//! [`StoryState`]: save::StoryState

pub mod calendar;
pub mod catalog;
pub mod choice;
pub mod config;
pub mod context;
pub mod director;
pub mod engine;
pub mod error;
pub mod instance;
pub mod rng;
pub mod save;
pub mod template;

#[cfg(test)]
mod testing;

pub use choice::ChoiceResolution;
pub use config::ScoutlineConfig;
pub use director::{NarrativeDirector, ResolvedChoice, WeeklyReport};
pub use engine::{AdvanceOutcome, StepOutcome, StoryEngine, WeekOutcome};
pub use error::EngineError;
pub use instance::{Instance, Resolution};
pub use rng::{SeededRng, SequenceRng, StoryRng};
pub use save::{SaveError, StoryState};
