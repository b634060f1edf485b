//! Shared type definitions for the Scoutline story engine.
//!
//! This crate holds every shape that crosses the engine boundary: the
//! identifiers and enums persisted in save files, the read-only world
//! snapshot supplied by the game loop, and the narrative events handed to
//! the inbox. Inbox-facing types export `TypeScript` bindings via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- UUID-backed entity ids and deterministic instance/event keys
//! - [`enums`] -- Engine variants, template ids, effect tags, categories
//! - [`world`] -- Calendar values and the [`WorldSnapshot`]
//! - [`event`] -- The [`NarrativeEvent`] emitted by story stages

pub mod enums;
pub mod event;
pub mod ids;
pub mod world;

// Re-export all public types at crate root for convenience.
pub use enums::{ContactKind, EffectTag, EngineVariant, EventCategory, TemplateId};
pub use event::{ChoiceDescriptor, EntityRef, NarrativeEvent};
pub use ids::{ClubId, ContactId, EventId, InstanceId, PlayerId, RivalScoutId};
pub use world::{
    AbsoluteWeek, Club, Contact, GameDate, Player, RivalScout, ScoutProfile, WorldSnapshot,
};
