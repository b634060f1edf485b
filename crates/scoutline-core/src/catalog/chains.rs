//! Event-chain templates: world-driven sequences around the scout.

use scoutline_types::{ContactKind, EffectTag, EntityRef, EventCategory, TemplateId, WorldSnapshot};

use super::{details, invented_name, last_choice};
use crate::context::{
    InjuryContext, PressLeakContext, RivalFeudContext, StoryContext, TransferSagaContext,
    YouthTournamentContext,
};
use crate::instance::Instance;
use crate::rng::{RngError, StoryRng};
use crate::template::{ChoiceSpec, EventDraft, Stage, Template};

type Generated = Result<Option<EventDraft>, RngError>;

/// All event-chain templates, in authored order.
pub static TEMPLATES: [Template; 5] = [
    Template {
        id: TemplateId::InjuryComeback,
        name: "Road to Recovery",
        stages: &INJURY_STAGES,
        eligible: injury_eligible,
        build_context: injury_context,
    },
    Template {
        id: TemplateId::TransferSaga,
        name: "Transfer Saga",
        stages: &TRANSFER_STAGES,
        eligible: transfer_eligible,
        build_context: transfer_context,
    },
    Template {
        id: TemplateId::PressLeak,
        name: "The Leak",
        stages: &LEAK_STAGES,
        eligible: leak_eligible,
        build_context: leak_context,
    },
    Template {
        id: TemplateId::YouthTournament,
        name: "Youth Tournament",
        stages: &TOURNAMENT_STAGES,
        eligible: tournament_eligible,
        build_context: tournament_context,
    },
    Template {
        id: TemplateId::RivalFeud,
        name: "Bad Blood",
        stages: &FEUD_STAGES,
        eligible: feud_eligible,
        build_context: feud_context,
    },
];

// ---------------------------------------------------------------------------
// injury_comeback
// ---------------------------------------------------------------------------

const INJURY_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Monitor the recovery", EffectTag::MonitorRecovery),
    ChoiceSpec::new("Drop your interest", EffectTag::DropInterest),
];

static INJURY_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 2,
        prerequisite: None,
        generate: injury_news,
        choices: INJURY_CHOICES,
    },
    Stage {
        week_delay: 3,
        escalation: 1,
        prerequisite: None,
        generate: injury_rehab,
        choices: &[],
    },
    Stage {
        week_delay: 4,
        escalation: 1,
        prerequisite: None,
        generate: injury_return,
        choices: &[],
    },
];

fn injury_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot.players.values().any(|p| p.injured)
}

fn injury_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let injured: Vec<_> = snapshot.players.values().filter(|p| p.injured).collect();
    let player = rng.pick(&injured)?;
    let weeks_out = rng.next_int(4, 12)?;
    Ok(StoryContext::InjuryComeback(InjuryContext {
        player_id: player.id,
        player_name: player.name.clone(),
        weeks_out: u32::try_from(weeks_out).unwrap_or(4),
    }))
}

fn injury_news(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::InjuryComeback(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Injury,
            format!("{} injured", ctx.player_name),
            format!(
                "{} limped off in training. The medical staff expect around {} weeks out.",
                ctx.player_name, ctx.weeks_out
            ),
        )
        .with(EntityRef::Player(ctx.player_id)),
    ))
}

fn injury_rehab(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::InjuryComeback(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::DropInterest) => format!(
            "{} is back in the gym, though you have stopped keeping track.",
            ctx.player_name
        ),
        _ => format!(
            "You sat in on a rehab session. {} is ahead of schedule and hungry to return.",
            ctx.player_name
        ),
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Injury,
            format!("{} in rehab", ctx.player_name),
            body,
        )
        .with(EntityRef::Player(ctx.player_id)),
    ))
}

fn injury_return(instance: &Instance, _: &WorldSnapshot, rng: &mut dyn StoryRng) -> Generated {
    let StoryContext::InjuryComeback(ctx) = details(instance) else {
        return Ok(None);
    };
    let (title, body) = if rng.chance(0.6)? {
        (
            format!("{} is back", ctx.player_name),
            format!("{} returned with a full ninety minutes and looked sharp.", ctx.player_name),
        )
    } else {
        (
            format!("Setback for {}", ctx.player_name),
            format!(
                "{} came through the match but has lost a yard of pace. Time will tell.",
                ctx.player_name
            ),
        )
    };
    Ok(Some(
        EventDraft::new(EventCategory::Injury, title, body).with(EntityRef::Player(ctx.player_id)),
    ))
}

// ---------------------------------------------------------------------------
// transfer_saga
// ---------------------------------------------------------------------------

const TRANSFER_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Back the transfer", EffectTag::BackTransfer),
    ChoiceSpec::new("Advise caution", EffectTag::AdviseCaution),
];

static TRANSFER_STAGES: [Stage; 4] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: transfer_rumour,
        choices: &[],
    },
    Stage {
        week_delay: 2,
        escalation: 2,
        prerequisite: None,
        generate: transfer_bid,
        choices: TRANSFER_CHOICES,
    },
    Stage {
        week_delay: 2,
        escalation: 2,
        prerequisite: None,
        generate: transfer_talks,
        choices: &[],
    },
    Stage {
        week_delay: 3,
        escalation: 3,
        prerequisite: None,
        generate: transfer_deadline,
        choices: &[],
    },
];

fn transfer_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot.clubs.len() >= 2 && snapshot.players.values().any(|p| p.club_id.is_some())
}

fn transfer_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let signed: Vec<_> = snapshot
        .players
        .values()
        .filter_map(|p| p.club_id.and_then(|id| snapshot.clubs.get(&id)).map(|c| (p, c)))
        .collect();
    let (player, seller) = *rng.pick(&signed)?;
    let buyers: Vec<_> = snapshot.clubs.values().filter(|c| c.id != seller.id).collect();
    let buyer = rng.pick(&buyers)?;
    let opening_bid = rng.next_int(5, 40)?;
    Ok(StoryContext::TransferSaga(TransferSagaContext {
        player_id: player.id,
        player_name: player.name.clone(),
        selling_club_id: seller.id,
        selling_club_name: seller.name.clone(),
        buying_club_id: buyer.id,
        buying_club_name: buyer.name.clone(),
        opening_bid: u32::try_from(opening_bid).unwrap_or(5),
    }))
}

fn transfer_draft(ctx: &TransferSagaContext, title: String, body: String) -> EventDraft {
    EventDraft::new(EventCategory::Transfer, title, body)
        .with(EntityRef::Player(ctx.player_id))
        .with(EntityRef::Club(ctx.selling_club_id))
        .with(EntityRef::Club(ctx.buying_club_id))
}

fn transfer_rumour(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::TransferSaga(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(transfer_draft(
        ctx,
        format!("{} linked with {}", ctx.player_name, ctx.buying_club_name),
        format!(
            "Papers in two countries report that {} want {} from {}.",
            ctx.buying_club_name, ctx.player_name, ctx.selling_club_name
        ),
    )))
}

fn transfer_bid(instance: &Instance, snapshot: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::TransferSaga(ctx) = details(instance) else {
        return Ok(None);
    };
    // The saga is over if the player has already moved elsewhere.
    let still_there = snapshot
        .players
        .get(&ctx.player_id)
        .is_some_and(|p| p.club_id == Some(ctx.selling_club_id));
    if !still_there {
        return Ok(None);
    }
    Ok(Some(transfer_draft(
        ctx,
        format!("{} bid {}m for {}", ctx.buying_club_name, ctx.opening_bid, ctx.player_name),
        format!(
            "{} have made an opening offer of {}m. Your opinion on {} has been requested.",
            ctx.buying_club_name, ctx.opening_bid, ctx.player_name
        ),
    )))
}

fn transfer_talks(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::TransferSaga(ctx) = details(instance) else {
        return Ok(None);
    };
    let mood = match last_choice(instance) {
        Some(EffectTag::BackTransfer) => "Your glowing report has been passed around the boardroom.",
        Some(EffectTag::AdviseCaution) => "Your note of caution has slowed things down.",
        _ => "Neither side is budging.",
    };
    Ok(Some(transfer_draft(
        ctx,
        format!("Talks continue over {}", ctx.player_name),
        format!(
            "{} and {} are still haggling. {mood}",
            ctx.selling_club_name, ctx.buying_club_name
        ),
    )))
}

fn transfer_deadline(instance: &Instance, _: &WorldSnapshot, rng: &mut dyn StoryRng) -> Generated {
    let StoryContext::TransferSaga(ctx) = details(instance) else {
        return Ok(None);
    };
    let odds = match last_choice(instance) {
        Some(EffectTag::BackTransfer) => 0.7,
        Some(EffectTag::AdviseCaution) => 0.35,
        _ => 0.55,
    };
    let (title, body) = if rng.chance(odds)? {
        (
            format!("Done deal: {} joins {}", ctx.player_name, ctx.buying_club_name),
            format!(
                "{} has completed the move from {}.",
                ctx.player_name, ctx.selling_club_name
            ),
        )
    } else {
        (
            format!("{} move collapses", ctx.player_name),
            format!(
                "{} walked away at the last minute. {} stays at {}.",
                ctx.buying_club_name, ctx.player_name, ctx.selling_club_name
            ),
        )
    };
    Ok(Some(transfer_draft(ctx, title, body)))
}

// ---------------------------------------------------------------------------
// press_leak
// ---------------------------------------------------------------------------

const LEAK_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Deny everything", EffectTag::DenyLeak),
    ChoiceSpec::new("Confirm the notes are yours", EffectTag::ConfirmLeak),
    ChoiceSpec::new("No comment", EffectTag::NoComment),
];

static LEAK_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 2,
        prerequisite: None,
        generate: leak_story,
        choices: LEAK_CHOICES,
    },
    Stage {
        week_delay: 1,
        escalation: 2,
        prerequisite: None,
        generate: leak_follow_up,
        choices: &[],
    },
    Stage {
        week_delay: 2,
        escalation: 1,
        prerequisite: None,
        generate: leak_fallout,
        choices: &[],
    },
];

fn leak_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot.contacts_of_kind(ContactKind::Journalist).next().is_some()
}

fn leak_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let journalists: Vec<_> = snapshot.contacts_of_kind(ContactKind::Journalist).collect();
    let journalist = rng.pick(&journalists)?;
    let players: Vec<_> = snapshot.players.values().collect();
    let named = if players.is_empty() {
        None
    } else {
        Some(*rng.pick(&players)?)
    };
    Ok(StoryContext::PressLeak(PressLeakContext {
        journalist_id: journalist.id,
        journalist_name: journalist.name.clone(),
        player_id: named.map(|p| p.id),
        player_name: named.map(|p| p.name.clone()),
    }))
}

fn leak_draft(ctx: &PressLeakContext, title: String, body: String) -> EventDraft {
    let draft =
        EventDraft::new(EventCategory::Media, title, body).with(EntityRef::Contact(ctx.journalist_id));
    match ctx.player_id {
        Some(id) => draft.with(EntityRef::Player(id)),
        None => draft,
    }
}

fn leak_story(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::PressLeak(ctx) = details(instance) else {
        return Ok(None);
    };
    let subject = ctx
        .player_name
        .as_deref()
        .map_or_else(|| "half your shortlist".to_owned(), |name| format!("your report on {name}"));
    Ok(Some(leak_draft(
        ctx,
        "Your notes are in the papers".to_owned(),
        format!(
            "{} has published extracts from {subject}. Everyone wants to know how.",
            ctx.journalist_name
        ),
    )))
}

fn leak_follow_up(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::PressLeak(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::DenyLeak) => format!(
            "Your denial ran on the back page. {} is hinting at a second source.",
            ctx.journalist_name
        ),
        Some(EffectTag::ConfirmLeak) => format!(
            "Your admission took the sting out of the story. {} has moved on.",
            ctx.journalist_name
        ),
        _ => format!(
            "{} ran a follow-up noting your silence.",
            ctx.journalist_name
        ),
    };
    Ok(Some(leak_draft(ctx, "The leak, day two".to_owned(), body)))
}

fn leak_fallout(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::PressLeak(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(leak_draft(
        ctx,
        "The leak blows over".to_owned(),
        format!(
            "The story has dropped out of the news cycle. You will think twice before \
             leaving notes near {} again.",
            ctx.journalist_name
        ),
    )))
}

// ---------------------------------------------------------------------------
// youth_tournament
// ---------------------------------------------------------------------------

const HOST_CITIES: &[&str] = &["Toulon", "Viareggio", "Montaigu", "Düsseldorf", "Salvador"];

/// Career tier at which tournament invitations start arriving.
const TOURNAMENT_TIER: u8 = 2;

const TOURNAMENT_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Attend the tournament", EffectTag::AttendTournament),
    ChoiceSpec::new("Skip it", EffectTag::SkipTournament),
];

static TOURNAMENT_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: tournament_invite,
        choices: TOURNAMENT_CHOICES,
    },
    Stage {
        week_delay: 2,
        escalation: 1,
        prerequisite: None,
        generate: tournament_groups,
        choices: &[],
    },
    Stage {
        week_delay: 1,
        escalation: 2,
        prerequisite: None,
        generate: tournament_final,
        choices: &[],
    },
];

const fn tournament_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot.scout.career_tier >= TOURNAMENT_TIER
}

fn tournament_context(
    _: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let host_city = (*rng.pick(HOST_CITIES)?).to_owned();
    let standout_name = invented_name(rng)?;
    Ok(StoryContext::YouthTournament(YouthTournamentContext {
        host_city,
        standout_name,
    }))
}

fn tournament_invite(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::YouthTournament(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(EventDraft::new(
        EventCategory::Tournament,
        format!("Invitation to {}", ctx.host_city),
        format!(
            "The under-19 tournament in {} starts in a fortnight. Half the scouts in \
             Europe will be in the stands.",
            ctx.host_city
        ),
    )))
}

fn tournament_groups(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::YouthTournament(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::SkipTournament) => format!(
            "Reports from {} mention a name you do not recognise: {}.",
            ctx.host_city, ctx.standout_name
        ),
        _ => format!(
            "From your seat in {}, one player stands out in the group stage: {}.",
            ctx.host_city, ctx.standout_name
        ),
    };
    Ok(Some(EventDraft::new(
        EventCategory::Tournament,
        format!("Group stage in {}", ctx.host_city),
        body,
    )))
}

fn tournament_final(instance: &Instance, _: &WorldSnapshot, rng: &mut dyn StoryRng) -> Generated {
    let StoryContext::YouthTournament(ctx) = details(instance) else {
        return Ok(None);
    };
    let attended = last_choice(instance) == Some(EffectTag::AttendTournament);
    let body = if rng.chance(0.5)? {
        format!("{} scored twice in the final and lifted the trophy.", ctx.standout_name)
    } else {
        format!("{}'s side lost the final on penalties, but the talent is obvious.", ctx.standout_name)
    };
    let coda = if attended {
        " You were there to see it."
    } else {
        " You caught the highlights."
    };
    Ok(Some(EventDraft::new(
        EventCategory::Tournament,
        format!("{} final", ctx.host_city),
        format!("{body}{coda}"),
    )))
}

// ---------------------------------------------------------------------------
// rival_feud
// ---------------------------------------------------------------------------

const FEUD_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Confront them", EffectTag::ConfrontRival),
    ChoiceSpec::new("Rise above it", EffectTag::RiseAbove),
];

static FEUD_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: feud_slight,
        choices: FEUD_CHOICES,
    },
    Stage {
        week_delay: 3,
        escalation: 2,
        prerequisite: None,
        generate: feud_escalation,
        choices: &[],
    },
    Stage {
        week_delay: 3,
        escalation: 3,
        prerequisite: None,
        generate: feud_settled,
        choices: &[],
    },
];

fn feud_eligible(snapshot: &WorldSnapshot) -> bool {
    !snapshot.rival_scouts.is_empty()
}

fn feud_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let rivals: Vec<_> = snapshot.rival_scouts.values().collect();
    let rival = rng.pick(&rivals)?;
    Ok(StoryContext::RivalFeud(RivalFeudContext {
        rival_id: rival.id,
        rival_name: rival.name.clone(),
    }))
}

fn feud_slight(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::RivalFeud(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Rivalry,
            format!("{} takes a swipe", ctx.rival_name),
            format!(
                "In a podcast interview, {} called your last signing \"a tourist\". \
                 People are waiting to see how you respond.",
                ctx.rival_name
            ),
        )
        .with(EntityRef::RivalScout(ctx.rival_id)),
    ))
}

fn feud_escalation(instance: &Instance, snapshot: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::RivalFeud(ctx) = details(instance) else {
        return Ok(None);
    };
    // A feud needs both parties.
    if !snapshot.rival_scouts.contains_key(&ctx.rival_id) {
        return Ok(None);
    }
    let body = match last_choice(instance) {
        Some(EffectTag::ConfrontRival) => format!(
            "Your exchange with {} at the airport is now a trending clip.",
            ctx.rival_name
        ),
        _ => format!(
            "{} keeps needling you in the press, though fewer people are listening.",
            ctx.rival_name
        ),
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Rivalry,
            format!("The feud with {} rumbles on", ctx.rival_name),
            body,
        )
        .with(EntityRef::RivalScout(ctx.rival_id)),
    ))
}

fn feud_settled(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::RivalFeud(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Rivalry,
            format!("A truce with {}", ctx.rival_name),
            format!(
                "You and {} ended up at the same table at an awards dinner. \
                 Nobody threw anything.",
                ctx.rival_name
            ),
        )
        .with(EntityRef::RivalScout(ctx.rival_id)),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoutline_types::{AbsoluteWeek, EngineVariant};

    use super::*;
    use crate::catalog::event_chain_registry;
    use crate::config::VariantConfig;
    use crate::context::InstanceContext;
    use crate::engine::StoryEngine;
    use crate::instance::Resolution;
    use crate::rng::SequenceRng;
    use crate::testing::{self, AWAY_CLUB, HOME_CLUB, KEEPER, STRIKER};

    fn engine() -> StoryEngine {
        StoryEngine::new(
            EngineVariant::EventChain,
            &VariantConfig::event_chain(),
            event_chain_registry().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn injury_chain_follows_an_injured_player() {
        let mut rng = SequenceRng::new(vec![0.0]);
        let context = injury_context(&testing::snapshot(1, 1), &mut rng).unwrap();
        assert!(matches!(
            context,
            StoryContext::InjuryComeback(ref ctx) if ctx.player_id == KEEPER && ctx.weeks_out == 4
        ));
    }

    #[test]
    fn transfer_buyer_differs_from_seller() {
        for draw in [0.0, 0.4, 0.99] {
            let mut rng = SequenceRng::new(vec![draw]);
            let context = transfer_context(&testing::snapshot(1, 1), &mut rng).unwrap();
            assert!(matches!(
                context,
                StoryContext::TransferSaga(ref ctx)
                    if ctx.selling_club_id != ctx.buying_club_id && (5..=40).contains(&ctx.opening_bid)
            ));
        }
    }

    #[test]
    fn transfer_saga_ends_if_player_moves_early() {
        let engine = engine();
        let mut rng = SequenceRng::new(vec![0.0]);
        let world = testing::snapshot(1, 1);
        let context = StoryContext::TransferSaga(TransferSagaContext {
            player_id: STRIKER,
            player_name: "Tomás Ferreira".to_owned(),
            selling_club_id: AWAY_CLUB,
            selling_club_name: "Real Montaña".to_owned(),
            buying_club_id: HOME_CLUB,
            buying_club_name: "Harbour Town".to_owned(),
            opening_bid: 12,
        });
        let instance = Instance::start(
            EngineVariant::EventChain,
            TemplateId::TransferSaga,
            AbsoluteWeek(1),
            4,
            InstanceContext::new(context),
        );
        let opened = engine.advance_instance(&instance, &world, &mut rng).unwrap();
        assert!(opened.event.is_some());

        let mut moved = testing::snapshot(1, 3);
        if let Some(player) = moved.players.get_mut(&STRIKER) {
            player.club_id = None;
        }
        let step = engine
            .advance_instance(&opened.instance, &moved, &mut rng)
            .unwrap();
        assert!(step.event.is_none());
        assert_eq!(step.instance.resolution, Some(Resolution::SoftAbort));
    }

    #[test]
    fn novice_scout_gets_no_tournament_invites() {
        let mut world = testing::snapshot(1, 1);
        world.scout.career_tier = 1;
        assert!(!tournament_eligible(&world));
    }

    #[test]
    fn leak_choices_are_offered_on_the_opening_event() {
        let engine = engine();
        let mut rng = SequenceRng::new(vec![0.0]);
        let world = testing::snapshot(1, 1);
        let context = leak_context(&world, &mut rng).unwrap();
        let instance = Instance::start(
            EngineVariant::EventChain,
            TemplateId::PressLeak,
            AbsoluteWeek(1),
            3,
            InstanceContext::new(context),
        );
        let event = engine
            .advance_instance(&instance, &world, &mut rng)
            .unwrap()
            .event
            .unwrap();
        let effects: Vec<_> = event.choices.iter().map(|c| c.effect).collect();
        assert_eq!(
            effects,
            vec![EffectTag::DenyLeak, EffectTag::ConfirmLeak, EffectTag::NoComment]
        );
        assert_eq!(event.follow_up, Some(scoutline_types::GameDate::new(1, 2)));
    }
}
