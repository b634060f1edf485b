//! Calendar values and the read-only world snapshot.
//!
//! The story engine never owns or mutates world state. Each week the game
//! loop hands it a [`WorldSnapshot`] assembled by the collaborators that do
//! (career, contacts, database of clubs and players, rival AI).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ContactKind;
use crate::ids::{ClubId, ContactId, PlayerId, RivalScoutId};

// ---------------------------------------------------------------------------
// Calendar values
// ---------------------------------------------------------------------------

/// A (season, week) pair as shown to the player. Both fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameDate {
    /// Season number, starting at 1.
    pub season: u32,
    /// Week within the season, starting at 1.
    pub week: u32,
}

impl GameDate {
    /// Construct a date without validating it against any calendar.
    pub const fn new(season: u32, week: u32) -> Self {
        Self { season, week }
    }
}

impl core::fmt::Display for GameDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "season {} week {}", self.season, self.week)
    }
}

/// A season/week pair flattened to a single increasing week count.
///
/// Only meaningful relative to the calendar that produced it: the two
/// engine variants use different season lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct AbsoluteWeek(pub u32);

impl AbsoluteWeek {
    /// Return the raw week count.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for AbsoluteWeek {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "w{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// World entities
// ---------------------------------------------------------------------------

/// Aggregate stats of the player's scout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutProfile {
    /// Display name.
    pub name: String,
    /// Reputation on a 0-100 scale.
    pub reputation: i32,
    /// Fatigue on a 0-100 scale.
    pub fatigue: i32,
    /// Career tier, 1 (freelancer) to 5 (chief scout).
    pub career_tier: u8,
    /// Club currently employing the scout, if any.
    pub current_club_id: Option<ClubId>,
}

/// One of the scout's professional contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact identity.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Professional role.
    pub kind: ContactKind,
    /// Relationship strength on a 0-100 scale.
    pub relationship: i32,
}

/// A club in the football world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// Club identity.
    pub id: ClubId,
    /// Display name.
    pub name: String,
    /// Country the club plays in.
    pub country: String,
}

/// A player known to the scout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player identity.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u8,
    /// Current club, `None` for free agents.
    pub club_id: Option<ClubId>,
    /// Whether the player is currently injured.
    pub injured: bool,
    /// Scouted potential on a 1-100 scale.
    pub potential: u8,
}

/// A scout working for a competing club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RivalScout {
    /// Rival identity.
    pub id: RivalScoutId,
    /// Display name.
    pub name: String,
    /// Club the rival works for, if any.
    pub club_id: Option<ClubId>,
    /// Rival reputation on a 0-100 scale.
    pub reputation: i32,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Read-only view of the world for one weekly tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Current date.
    pub date: GameDate,
    /// The player's scout.
    pub scout: ScoutProfile,
    /// Contacts keyed by id.
    pub contacts: BTreeMap<ContactId, Contact>,
    /// Clubs keyed by id.
    pub clubs: BTreeMap<ClubId, Club>,
    /// Players keyed by id.
    pub players: BTreeMap<PlayerId, Player>,
    /// Rival scouts keyed by id.
    pub rival_scouts: BTreeMap<RivalScoutId, RivalScout>,
}

impl WorldSnapshot {
    /// Contacts with the given role, in id order.
    pub fn contacts_of_kind(&self, kind: ContactKind) -> impl Iterator<Item = &Contact> {
        self.contacts.values().filter(move |c| c.kind == kind)
    }

    /// Whether the scout is currently employed by `club_id`.
    pub fn scout_employed_by(&self, club_id: ClubId) -> bool {
        self.scout.current_club_id == Some(club_id)
    }
}
