//! Narrative events handed to the inbox.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EffectTag, EventCategory};
use crate::ids::{ClubId, ContactId, EventId, InstanceId, PlayerId, RivalScoutId};
use crate::world::GameDate;

/// A world entity an event refers to, for inbox back-links.
///
/// Stage generators attach these while drafting; the emitted event carries
/// only the bare id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityRef {
    /// A player.
    Player(PlayerId),
    /// A club.
    Club(ClubId),
    /// A contact.
    Contact(ContactId),
    /// A rival scout.
    RivalScout(RivalScoutId),
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Player(id) => id.fmt(f),
            Self::Club(id) => id.fmt(f),
            Self::Contact(id) => id.fmt(f),
            Self::RivalScout(id) => id.fmt(f),
        }
    }
}

/// One selectable response attached to a choice-bearing event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChoiceDescriptor {
    /// Button label shown to the player.
    pub label: String,
    /// Effect tag recorded if the player picks this choice.
    #[ts(type = "string")]
    pub effect: EffectTag,
}

/// A narrative event emitted by one stage of a story instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NarrativeEvent {
    /// Event key, derived from the instance key and stage number.
    pub id: EventId,
    /// Inbox category.
    #[serde(rename = "type")]
    pub category: EventCategory,
    /// Week within the season the event was emitted.
    pub week: u32,
    /// Season the event was emitted.
    pub season: u32,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Ids of the entities the event refers to.
    pub related_ids: Vec<String>,
    /// Set by the inbox once the player has read the event.
    pub acknowledged: bool,
    /// Ordered responses, empty for informational events.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceDescriptor>,
    /// Originating instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<InstanceId>,
    /// Stage number within the originating instance (0-based).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_step: Option<u32>,
    /// Descriptive severity of the stage.
    pub escalation_level: u8,
    /// When the next stage is due, for foreshadowing in the inbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<GameDate>,
}

impl NarrativeEvent {
    /// Whether the event expects the player to pick a response.
    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }
}
