//! Enumeration types shared by the story engine and its collaborators.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Engine variants
// ---------------------------------------------------------------------------

/// One of the two independently paced story engines.
///
/// Both variants share the same state machine; they differ only in calendar
/// length, weekly trigger probability, concurrency cap, and template catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EngineVariant {
    /// Long-form personal storylines about the scout's career.
    Storyline,
    /// Shorter world-driven event chains.
    EventChain,
}

impl EngineVariant {
    /// Stable lowercase prefix used when deriving instance keys.
    pub const fn key_prefix(self) -> &'static str {
        match self {
            Self::Storyline => "storyline",
            Self::EventChain => "chain",
        }
    }
}

impl core::fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key_prefix())
    }
}

// ---------------------------------------------------------------------------
// Template identifiers
// ---------------------------------------------------------------------------

/// Identifier of an authored story template.
///
/// Persisted instances store this name rather than any reference to
/// template logic. Names written by templates that have since been removed
/// deserialize to [`TemplateId::Retired`], which no registry contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    /// A rival scout is circling one of the scout's targets.
    RivalPoaching,
    /// Power struggle in the scout's own boardroom.
    BoardroomShakeup,
    /// An agent offers inside information in exchange for favours.
    AgentOffer,
    /// A contact whispers about an unknown prodigy.
    WonderkidWhispers,
    /// A trusted veteran contact retires.
    MentorFarewell,
    /// A tracked player fights back from injury.
    InjuryComeback,
    /// A tracked player is the subject of a protracted transfer.
    TransferSaga,
    /// A journalist gets hold of the scout's notes.
    PressLeak,
    /// Invitation to an international youth tournament.
    YouthTournament,
    /// A running feud with a rival scout.
    RivalFeud,
    /// Any template name this build does not know.
    #[serde(other)]
    Retired,
}

impl TemplateId {
    /// The engine variant whose catalog owns this template, if any.
    pub const fn variant(self) -> Option<EngineVariant> {
        match self {
            Self::RivalPoaching
            | Self::BoardroomShakeup
            | Self::AgentOffer
            | Self::WonderkidWhispers
            | Self::MentorFarewell => Some(EngineVariant::Storyline),
            Self::InjuryComeback
            | Self::TransferSaga
            | Self::PressLeak
            | Self::YouthTournament
            | Self::RivalFeud => Some(EngineVariant::EventChain),
            Self::Retired => None,
        }
    }

    /// Stable snake-case name, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RivalPoaching => "rival_poaching",
            Self::BoardroomShakeup => "boardroom_shakeup",
            Self::AgentOffer => "agent_offer",
            Self::WonderkidWhispers => "wonderkid_whispers",
            Self::MentorFarewell => "mentor_farewell",
            Self::InjuryComeback => "injury_comeback",
            Self::TransferSaga => "transfer_saga",
            Self::PressLeak => "press_leak",
            Self::YouthTournament => "youth_tournament",
            Self::RivalFeud => "rival_feud",
            Self::Retired => "retired",
        }
    }
}

impl core::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Effect tags
// ---------------------------------------------------------------------------

/// Opaque tag recorded when the player picks a choice.
///
/// Later stages branch on the tag and the choice resolver maps it to
/// immediate reputation and fatigue deltas. Tags from older saves that this
/// build no longer knows deserialize to [`EffectTag::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectTag {
    /// Make an offer before the rival does.
    MoveFirst,
    /// Warn the club's director about the rival.
    AlertDirector,
    /// Let the rival's approach run its course.
    LetItGo,
    /// Side with the sitting chairman.
    BackChairman,
    /// Stay out of boardroom politics.
    StayNeutral,
    /// Curry favour with the incoming investors.
    CourtInvestors,
    /// Use the agent's information as leverage.
    AgentLeverage,
    /// Turn the agent down.
    DeclineAgent,
    /// Report the agent to the federation.
    ReportAgent,
    /// Travel to see the prospect in person.
    TravelNow,
    /// Send a contact in your place.
    SendContact,
    /// Dismiss the rumour.
    IgnoreRumour,
    /// Attend the mentor's farewell.
    AttendFarewell,
    /// Send a note instead of attending.
    SendNote,
    /// Keep tabs on the injured player's recovery.
    MonitorRecovery,
    /// Stop tracking the injured player.
    DropInterest,
    /// Publicly back the transfer.
    BackTransfer,
    /// Advise the club to be cautious.
    AdviseCaution,
    /// Deny the leaked report.
    DenyLeak,
    /// Confirm the leaked report.
    ConfirmLeak,
    /// Refuse to comment on the leak.
    NoComment,
    /// Attend the youth tournament.
    AttendTournament,
    /// Skip the youth tournament.
    SkipTournament,
    /// Confront the rival scout.
    ConfrontRival,
    /// Ignore the rival's provocation.
    RiseAbove,
    /// Any tag this build does not know.
    #[serde(other)]
    Unrecognized,
}

impl EffectTag {
    /// Stable camel-case name, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MoveFirst => "moveFirst",
            Self::AlertDirector => "alertDirector",
            Self::LetItGo => "letItGo",
            Self::BackChairman => "backChairman",
            Self::StayNeutral => "stayNeutral",
            Self::CourtInvestors => "courtInvestors",
            Self::AgentLeverage => "agentLeverage",
            Self::DeclineAgent => "declineAgent",
            Self::ReportAgent => "reportAgent",
            Self::TravelNow => "travelNow",
            Self::SendContact => "sendContact",
            Self::IgnoreRumour => "ignoreRumour",
            Self::AttendFarewell => "attendFarewell",
            Self::SendNote => "sendNote",
            Self::MonitorRecovery => "monitorRecovery",
            Self::DropInterest => "dropInterest",
            Self::BackTransfer => "backTransfer",
            Self::AdviseCaution => "adviseCaution",
            Self::DenyLeak => "denyLeak",
            Self::ConfirmLeak => "confirmLeak",
            Self::NoComment => "noComment",
            Self::AttendTournament => "attendTournament",
            Self::SkipTournament => "skipTournament",
            Self::ConfrontRival => "confrontRival",
            Self::RiseAbove => "riseAbove",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl core::fmt::Display for EffectTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event categories
// ---------------------------------------------------------------------------

/// Category tag the inbox uses to group and style narrative events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventCategory {
    /// Competition with rival scouts.
    Rivalry,
    /// Club politics and employment.
    Boardroom,
    /// Dealings with player agents.
    Agent,
    /// Scouting discoveries and rumours.
    Discovery,
    /// Personal relationships with contacts.
    Mentorship,
    /// Player fitness.
    Injury,
    /// Transfer market activity.
    Transfer,
    /// Press and public image.
    Media,
    /// Tournaments and scouting trips.
    Tournament,
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// Professional role of one of the scout's contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ContactKind {
    /// A player agent.
    Agent,
    /// A football journalist.
    Journalist,
    /// A coach at any level.
    Coach,
    /// A fellow scout on friendly terms.
    Scout,
    /// A club director or executive.
    Director,
}
