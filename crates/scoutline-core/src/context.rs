//! Per-template instance context.
//!
//! Each template gets its own concrete record shape, built once by the
//! template's context constructor when the instance starts. Records hold
//! only serializable primitives and optional entity ids: names are copied
//! in at start so later stages can still refer to entities that have left
//! the world. The only field that changes afterwards is
//! [`InstanceContext::player_choice`], written by the choice resolver.

use serde::{Deserialize, Serialize};

use scoutline_types::{ClubId, ContactId, EffectTag, PlayerId, RivalScoutId};

/// Context of one instance: the latest player choice plus the template's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceContext {
    /// Effect tag of the most recently resolved choice.
    #[serde(default)]
    pub player_choice: Option<EffectTag>,
    /// Template-specific values.
    pub details: StoryContext,
}

impl InstanceContext {
    /// Fresh context with no choice made yet.
    pub const fn new(details: StoryContext) -> Self {
        Self {
            player_choice: None,
            details,
        }
    }
}

/// Template-specific context, tagged by template name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum StoryContext {
    /// Context of `rival_poaching`.
    RivalPoaching(RivalPoachingContext),
    /// Context of `boardroom_shakeup`.
    BoardroomShakeup(BoardroomContext),
    /// Context of `agent_offer`.
    AgentOffer(AgentOfferContext),
    /// Context of `wonderkid_whispers`.
    WonderkidWhispers(WonderkidContext),
    /// Context of `mentor_farewell`.
    MentorFarewell(MentorContext),
    /// Context of `injury_comeback`.
    InjuryComeback(InjuryContext),
    /// Context of `transfer_saga`.
    TransferSaga(TransferSagaContext),
    /// Context of `press_leak`.
    PressLeak(PressLeakContext),
    /// Context of `youth_tournament`.
    YouthTournament(YouthTournamentContext),
    /// Context of `rival_feud`.
    RivalFeud(RivalFeudContext),
    /// Context written by a template this build does not know.
    #[serde(other)]
    Retired,
}

/// A rival is circling one of the scout's targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RivalPoachingContext {
    /// The rival scout.
    pub rival_id: RivalScoutId,
    /// Rival's name at start.
    pub rival_name: String,
    /// The contested player.
    pub player_id: PlayerId,
    /// Player's name at start.
    pub player_name: String,
}

/// Boardroom struggle at the scout's club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardroomContext {
    /// The scout's club when the arc began.
    pub club_id: ClubId,
    /// Club name at start.
    pub club_name: String,
    /// Who is trying to buy in.
    pub investors: String,
}

/// An agent offering inside information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOfferContext {
    /// The agent contact.
    pub agent_id: ContactId,
    /// Agent's name at start.
    pub agent_name: String,
    /// Client the agent is pushing, if the world had one.
    pub client_id: Option<PlayerId>,
    /// Client's name at start.
    pub client_name: Option<String>,
}

/// A rumoured prodigy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WonderkidContext {
    /// Contact who passed on the rumour.
    pub contact_id: ContactId,
    /// Contact's name at start.
    pub contact_name: String,
    /// Where the prodigy plays.
    pub region: String,
    /// The prodigy's name.
    pub prospect_name: String,
    /// True potential, revealed at the end (1-100).
    pub hidden_potential: u8,
}

/// A retiring mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorContext {
    /// The mentor contact.
    pub contact_id: ContactId,
    /// Mentor's name at start.
    pub contact_name: String,
}

/// A tracked player's injury.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryContext {
    /// The injured player.
    pub player_id: PlayerId,
    /// Player's name at start.
    pub player_name: String,
    /// Initial prognosis in weeks.
    pub weeks_out: u32,
}

/// A protracted transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSagaContext {
    /// The player being sold.
    pub player_id: PlayerId,
    /// Player's name at start.
    pub player_name: String,
    /// Current club.
    pub selling_club_id: ClubId,
    /// Current club's name at start.
    pub selling_club_name: String,
    /// Interested club.
    pub buying_club_id: ClubId,
    /// Interested club's name at start.
    pub buying_club_name: String,
    /// Opening bid in millions.
    pub opening_bid: u32,
}

/// A journalist with the scout's notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressLeakContext {
    /// The journalist contact.
    pub journalist_id: ContactId,
    /// Journalist's name at start.
    pub journalist_name: String,
    /// Player named in the leaked notes.
    pub player_id: Option<PlayerId>,
    /// That player's name at start.
    pub player_name: Option<String>,
}

/// A youth tournament invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouthTournamentContext {
    /// Host city.
    pub host_city: String,
    /// The player who will shine.
    pub standout_name: String,
}

/// A running feud with a rival scout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RivalFeudContext {
    /// The rival scout.
    pub rival_id: RivalScoutId,
    /// Rival's name at start.
    pub rival_name: String,
}
