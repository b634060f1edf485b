//! Storyline templates: personal arcs of the scout's career.

use scoutline_types::{ContactKind, EffectTag, EntityRef, EventCategory, TemplateId, WorldSnapshot};

use super::{details, invented_name, last_choice};
use crate::context::{
    AgentOfferContext, BoardroomContext, MentorContext, RivalPoachingContext, StoryContext,
    WonderkidContext,
};
use crate::instance::Instance;
use crate::rng::{RngError, StoryRng};
use crate::template::{ChoiceSpec, EventDraft, Stage, Template};

type Generated = Result<Option<EventDraft>, RngError>;

/// All storyline templates, in authored order.
pub static TEMPLATES: [Template; 5] = [
    Template {
        id: TemplateId::RivalPoaching,
        name: "Rival on the Trail",
        stages: &POACHING_STAGES,
        eligible: poaching_eligible,
        build_context: poaching_context,
    },
    Template {
        id: TemplateId::BoardroomShakeup,
        name: "Boardroom Shake-up",
        stages: &BOARDROOM_STAGES,
        eligible: boardroom_eligible,
        build_context: boardroom_context,
    },
    Template {
        id: TemplateId::AgentOffer,
        name: "The Agent's Offer",
        stages: &AGENT_STAGES,
        eligible: agent_eligible,
        build_context: agent_context,
    },
    Template {
        id: TemplateId::WonderkidWhispers,
        name: "Wonderkid Whispers",
        stages: &WONDERKID_STAGES,
        eligible: wonderkid_eligible,
        build_context: wonderkid_context,
    },
    Template {
        id: TemplateId::MentorFarewell,
        name: "A Mentor's Farewell",
        stages: &MENTOR_STAGES,
        eligible: mentor_eligible,
        build_context: mentor_context,
    },
];

// ---------------------------------------------------------------------------
// rival_poaching
// ---------------------------------------------------------------------------

const POACHING_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Move first and call the player's camp", EffectTag::MoveFirst),
    ChoiceSpec::new("Warn your director", EffectTag::AlertDirector),
    ChoiceSpec::new("Let it go", EffectTag::LetItGo),
];

static POACHING_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: poaching_spotted,
        choices: POACHING_CHOICES,
    },
    Stage {
        week_delay: 2,
        escalation: 2,
        prerequisite: None,
        generate: poaching_pressure,
        choices: &[],
    },
    Stage {
        week_delay: 3,
        escalation: 3,
        prerequisite: None,
        generate: poaching_outcome,
        choices: &[],
    },
];

fn poaching_eligible(snapshot: &WorldSnapshot) -> bool {
    !snapshot.rival_scouts.is_empty() && !snapshot.players.is_empty()
}

fn poaching_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let rivals: Vec<_> = snapshot.rival_scouts.values().collect();
    let players: Vec<_> = snapshot.players.values().collect();
    let rival = rng.pick(&rivals)?;
    let player = rng.pick(&players)?;
    Ok(StoryContext::RivalPoaching(RivalPoachingContext {
        rival_id: rival.id,
        rival_name: rival.name.clone(),
        player_id: player.id,
        player_name: player.name.clone(),
    }))
}

const fn poaching_refs(ctx: &RivalPoachingContext) -> [EntityRef; 2] {
    [EntityRef::RivalScout(ctx.rival_id), EntityRef::Player(ctx.player_id)]
}

fn poaching_spotted(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::RivalPoaching(ctx) = details(instance) else {
        return Ok(None);
    };
    let [rival, player] = poaching_refs(ctx);
    Ok(Some(
        EventDraft::new(
            EventCategory::Rivalry,
            format!("{} is watching {}", ctx.rival_name, ctx.player_name),
            format!(
                "Word from the stands: {} has been at three of {}'s last four matches. \
                 If you want this player, you may not have long.",
                ctx.rival_name, ctx.player_name
            ),
        )
        .with(rival)
        .with(player),
    ))
}

fn poaching_pressure(
    instance: &Instance,
    snapshot: &WorldSnapshot,
    _: &mut dyn StoryRng,
) -> Generated {
    let StoryContext::RivalPoaching(ctx) = details(instance) else {
        return Ok(None);
    };
    // Nothing to fight over once the player has left the world.
    if !snapshot.players.contains_key(&ctx.player_id) {
        return Ok(None);
    }
    let body = match last_choice(instance) {
        Some(EffectTag::MoveFirst) => format!(
            "Your call to {}'s camp landed before {} could make theirs. \
             The family want to meet, but they are keeping their options open.",
            ctx.player_name, ctx.rival_name
        ),
        Some(EffectTag::AlertDirector) => format!(
            "Your director has {} on the agenda for the next recruitment meeting. \
             {} has been seen at the training ground again.",
            ctx.player_name, ctx.rival_name
        ),
        _ => format!(
            "{} has been spotted dining with {}'s representatives.",
            ctx.rival_name, ctx.player_name
        ),
    };
    let [rival, player] = poaching_refs(ctx);
    Ok(Some(
        EventDraft::new(
            EventCategory::Rivalry,
            format!("The race for {} heats up", ctx.player_name),
            body,
        )
        .with(rival)
        .with(player),
    ))
}

fn poaching_outcome(instance: &Instance, _: &WorldSnapshot, rng: &mut dyn StoryRng) -> Generated {
    let StoryContext::RivalPoaching(ctx) = details(instance) else {
        return Ok(None);
    };
    let odds = match last_choice(instance) {
        Some(EffectTag::MoveFirst) => 0.7,
        Some(EffectTag::AlertDirector) => 0.5,
        _ => 0.2,
    };
    let (title, body) = if rng.chance(odds)? {
        (
            format!("{} chooses your club", ctx.player_name),
            format!(
                "{} has turned down {}'s club. Your groundwork made the difference.",
                ctx.player_name, ctx.rival_name
            ),
        )
    } else {
        (
            format!("{} lands {}", ctx.rival_name, ctx.player_name),
            format!(
                "{} has agreed terms with {}'s employers. There will be other players.",
                ctx.player_name, ctx.rival_name
            ),
        )
    };
    let [rival, player] = poaching_refs(ctx);
    Ok(Some(
        EventDraft::new(EventCategory::Rivalry, title, body)
            .with(rival)
            .with(player),
    ))
}

// ---------------------------------------------------------------------------
// boardroom_shakeup
// ---------------------------------------------------------------------------

const INVESTORS: &[&str] = &[
    "a Gulf consortium",
    "an American private equity fund",
    "a local property developer",
    "a supporters' trust backed by a tech founder",
];

const BOARDROOM_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Back the chairman", EffectTag::BackChairman),
    ChoiceSpec::new("Stay neutral", EffectTag::StayNeutral),
    ChoiceSpec::new("Court the investors", EffectTag::CourtInvestors),
];

static BOARDROOM_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: boardroom_rumours,
        choices: BOARDROOM_CHOICES,
    },
    Stage {
        week_delay: 3,
        escalation: 2,
        prerequisite: Some(still_at_club),
        generate: boardroom_vote,
        choices: &[],
    },
    Stage {
        week_delay: 3,
        escalation: 3,
        prerequisite: Some(still_at_club),
        generate: boardroom_result,
        choices: &[],
    },
];

fn boardroom_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot
        .scout
        .current_club_id
        .is_some_and(|id| snapshot.clubs.contains_key(&id))
}

fn boardroom_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let investors = (*rng.pick(INVESTORS)?).to_owned();
    let employer = snapshot
        .scout
        .current_club_id
        .and_then(|id| snapshot.clubs.get(&id));
    // Without an employer the opening stage has nothing to say and soft-aborts.
    let Some(club) = employer else {
        return Ok(StoryContext::Retired);
    };
    Ok(StoryContext::BoardroomShakeup(BoardroomContext {
        club_id: club.id,
        club_name: club.name.clone(),
        investors,
    }))
}

fn still_at_club(snapshot: &WorldSnapshot, instance: &Instance) -> bool {
    match details(instance) {
        StoryContext::BoardroomShakeup(ctx) => snapshot.scout_employed_by(ctx.club_id),
        _ => false,
    }
}

fn boardroom_rumours(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::BoardroomShakeup(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Boardroom,
            format!("Takeover talk at {}", ctx.club_name),
            format!(
                "The chairman of {} is under pressure as {} circles the club. \
                 Staff are being asked, quietly, where their loyalties lie.",
                ctx.club_name, ctx.investors
            ),
        )
        .with(EntityRef::Club(ctx.club_id)),
    ))
}

fn boardroom_vote(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::BoardroomShakeup(ctx) = details(instance) else {
        return Ok(None);
    };
    let stance = match last_choice(instance) {
        Some(EffectTag::BackChairman) => "The chairman thanked you personally for your support.",
        Some(EffectTag::CourtInvestors) => {
            "The investors' advisers have asked for your recruitment plans."
        }
        _ => "You have kept your head down, and both camps have noticed.",
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Boardroom,
            format!("{} board calls a vote", ctx.club_name),
            format!("A board vote on the takeover is set for next month. {stance}"),
        )
        .with(EntityRef::Club(ctx.club_id)),
    ))
}

fn boardroom_result(instance: &Instance, _: &WorldSnapshot, rng: &mut dyn StoryRng) -> Generated {
    let StoryContext::BoardroomShakeup(ctx) = details(instance) else {
        return Ok(None);
    };
    let (title, body) = if rng.chance(0.5)? {
        (
            format!("Chairman survives at {}", ctx.club_name),
            "The takeover bid has been rejected. The old guard stays in charge.".to_owned(),
        )
    } else {
        (
            format!("New owners at {}", ctx.club_name),
            format!(
                "{} has completed the takeover. Expect changes in the recruitment department.",
                ctx.investors
            ),
        )
    };
    Ok(Some(
        EventDraft::new(EventCategory::Boardroom, title, body).with(EntityRef::Club(ctx.club_id)),
    ))
}

// ---------------------------------------------------------------------------
// agent_offer
// ---------------------------------------------------------------------------

const AGENT_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Trade favours", EffectTag::AgentLeverage),
    ChoiceSpec::new("Decline politely", EffectTag::DeclineAgent),
    ChoiceSpec::new("Report the approach", EffectTag::ReportAgent),
];

static AGENT_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: agent_approach,
        choices: AGENT_CHOICES,
    },
    Stage {
        week_delay: 2,
        escalation: 2,
        prerequisite: None,
        generate: agent_follow_up,
        choices: &[],
    },
    Stage {
        week_delay: 4,
        escalation: 3,
        prerequisite: None,
        generate: agent_consequences,
        choices: &[],
    },
];

fn agent_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot.contacts_of_kind(ContactKind::Agent).next().is_some()
}

fn agent_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let agents: Vec<_> = snapshot.contacts_of_kind(ContactKind::Agent).collect();
    let agent = rng.pick(&agents)?;
    let players: Vec<_> = snapshot.players.values().collect();
    let client = if players.is_empty() {
        None
    } else {
        Some(*rng.pick(&players)?)
    };
    Ok(StoryContext::AgentOffer(AgentOfferContext {
        agent_id: agent.id,
        agent_name: agent.name.clone(),
        client_id: client.map(|p| p.id),
        client_name: client.map(|p| p.name.clone()),
    }))
}

fn agent_draft(ctx: &AgentOfferContext, title: String, body: String) -> EventDraft {
    let draft = EventDraft::new(EventCategory::Agent, title, body)
        .with(EntityRef::Contact(ctx.agent_id));
    match ctx.client_id {
        Some(id) => draft.with(EntityRef::Player(id)),
        None => draft,
    }
}

fn agent_approach(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::AgentOffer(ctx) = details(instance) else {
        return Ok(None);
    };
    let pitch = ctx.client_name.as_deref().map_or_else(
        || "They hint at a client nobody else knows about yet.".to_owned(),
        |name| format!("They want a favourable report on {name}, and they can pay in information."),
    );
    Ok(Some(agent_draft(
        ctx,
        format!("{} makes you an offer", ctx.agent_name),
        format!("{} has invited you for coffee. {pitch}", ctx.agent_name),
    )))
}

fn agent_follow_up(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::AgentOffer(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::DeclineAgent) => return Ok(None),
        Some(EffectTag::ReportAgent) => format!(
            "Compliance have opened a file on {}. They may want a statement from you.",
            ctx.agent_name
        ),
        _ => format!(
            "{} delivers as promised: a list of contract clauses at three rival clubs.",
            ctx.agent_name
        ),
    };
    Ok(Some(agent_draft(
        ctx,
        format!("{} follows up", ctx.agent_name),
        body,
    )))
}

fn agent_consequences(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::AgentOffer(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::ReportAgent) => format!(
            "{} has been barred from the training ground. The club appreciates your honesty.",
            ctx.agent_name
        ),
        _ => format!(
            "{} calls to collect. Your next report had better be a kind one.",
            ctx.agent_name
        ),
    };
    Ok(Some(agent_draft(
        ctx,
        format!("The {} affair", ctx.agent_name),
        body,
    )))
}

// ---------------------------------------------------------------------------
// wonderkid_whispers
// ---------------------------------------------------------------------------

const REGIONS: &[&str] = &[
    "the Brazilian interior",
    "a Lagos academy",
    "the Basque lower leagues",
    "a Balkan second division",
    "the Danish youth system",
];

const WONDERKID_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Travel there now", EffectTag::TravelNow),
    ChoiceSpec::new("Send a contact", EffectTag::SendContact),
    ChoiceSpec::new("Ignore the rumour", EffectTag::IgnoreRumour),
];

static WONDERKID_STAGES: [Stage; 3] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: wonderkid_rumour,
        choices: WONDERKID_CHOICES,
    },
    Stage {
        week_delay: 3,
        escalation: 2,
        prerequisite: None,
        generate: wonderkid_sighting,
        choices: &[],
    },
    Stage {
        week_delay: 3,
        escalation: 3,
        prerequisite: None,
        generate: wonderkid_verdict,
        choices: &[],
    },
];

const fn is_talent_spotter(kind: ContactKind) -> bool {
    matches!(kind, ContactKind::Coach | ContactKind::Scout)
}

fn wonderkid_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot.contacts.values().any(|c| is_talent_spotter(c.kind))
}

fn wonderkid_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let spotters: Vec<_> = snapshot
        .contacts
        .values()
        .filter(|c| is_talent_spotter(c.kind))
        .collect();
    let contact = rng.pick(&spotters)?;
    let region = (*rng.pick(REGIONS)?).to_owned();
    let prospect_name = invented_name(rng)?;
    let potential = rng.next_int(55, 95)?;
    Ok(StoryContext::WonderkidWhispers(WonderkidContext {
        contact_id: contact.id,
        contact_name: contact.name.clone(),
        region,
        prospect_name,
        hidden_potential: u8::try_from(potential).unwrap_or(u8::MAX),
    }))
}

fn wonderkid_rumour(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::WonderkidWhispers(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Discovery,
            format!("A whisper from {}", ctx.contact_name),
            format!(
                "{} swears there is a teenager in {} who could be special. \
                 Nobody else seems to know yet.",
                ctx.contact_name, ctx.region
            ),
        )
        .with(EntityRef::Contact(ctx.contact_id)),
    ))
}

fn wonderkid_sighting(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::WonderkidWhispers(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::IgnoreRumour) => return Ok(None),
        Some(EffectTag::SendContact) => format!(
            "{}'s report is in: the kid is called {}, and the first impressions are strong.",
            ctx.contact_name, ctx.prospect_name
        ),
        _ => format!(
            "You watched {} for ninety minutes in {}. There is something there.",
            ctx.prospect_name, ctx.region
        ),
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Discovery,
            format!("First look at {}", ctx.prospect_name),
            body,
        )
        .with(EntityRef::Contact(ctx.contact_id)),
    ))
}

fn wonderkid_verdict(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::WonderkidWhispers(ctx) = details(instance) else {
        return Ok(None);
    };
    let verdict = match ctx.hidden_potential {
        85.. => "a genuine wonderkid. Clubs across Europe will be calling within a year.",
        70..=84 => "a fine prospect, if not quite the prodigy the rumour promised.",
        _ => "a decent player who was oversold. The whisper was louder than the talent.",
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Discovery,
            format!("The truth about {}", ctx.prospect_name),
            format!("After weeks of reports, the picture is clear: {} is {verdict}", ctx.prospect_name),
        )
        .with(EntityRef::Contact(ctx.contact_id)),
    ))
}

// ---------------------------------------------------------------------------
// mentor_farewell
// ---------------------------------------------------------------------------

/// Minimum relationship for a scout contact to count as a mentor.
const MENTOR_RELATIONSHIP: i32 = 60;

const MENTOR_CHOICES: &[ChoiceSpec] = &[
    ChoiceSpec::new("Attend the farewell", EffectTag::AttendFarewell),
    ChoiceSpec::new("Send a note", EffectTag::SendNote),
];

static MENTOR_STAGES: [Stage; 2] = [
    Stage {
        week_delay: 0,
        escalation: 1,
        prerequisite: None,
        generate: mentor_announcement,
        choices: MENTOR_CHOICES,
    },
    Stage {
        week_delay: 4,
        escalation: 2,
        prerequisite: Some(mentor_still_contact),
        generate: mentor_parting_gift,
        choices: &[],
    },
];

fn mentor_eligible(snapshot: &WorldSnapshot) -> bool {
    snapshot
        .contacts_of_kind(ContactKind::Scout)
        .any(|c| c.relationship >= MENTOR_RELATIONSHIP)
}

fn mentor_context(
    snapshot: &WorldSnapshot,
    rng: &mut dyn StoryRng,
) -> Result<StoryContext, RngError> {
    let mentors: Vec<_> = snapshot
        .contacts_of_kind(ContactKind::Scout)
        .filter(|c| c.relationship >= MENTOR_RELATIONSHIP)
        .collect();
    let mentor = rng.pick(&mentors)?;
    Ok(StoryContext::MentorFarewell(MentorContext {
        contact_id: mentor.id,
        contact_name: mentor.name.clone(),
    }))
}

fn mentor_still_contact(snapshot: &WorldSnapshot, instance: &Instance) -> bool {
    match details(instance) {
        StoryContext::MentorFarewell(ctx) => snapshot.contacts.contains_key(&ctx.contact_id),
        _ => false,
    }
}

fn mentor_announcement(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::MentorFarewell(ctx) = details(instance) else {
        return Ok(None);
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Mentorship,
            format!("{} is retiring", ctx.contact_name),
            format!(
                "After forty years on the touchline, {} is hanging up the notebook. \
                 There is a small send-off at the old club next month.",
                ctx.contact_name
            ),
        )
        .with(EntityRef::Contact(ctx.contact_id)),
    ))
}

fn mentor_parting_gift(instance: &Instance, _: &WorldSnapshot, _: &mut dyn StoryRng) -> Generated {
    let StoryContext::MentorFarewell(ctx) = details(instance) else {
        return Ok(None);
    };
    let body = match last_choice(instance) {
        Some(EffectTag::AttendFarewell) => format!(
            "At the farewell, {} pressed a battered notebook into your hands: \
             forty years of names, and a few still worth a look.",
            ctx.contact_name
        ),
        _ => format!(
            "{} wrote back to thank you for the note, and passed on two names \
             you should watch this season.",
            ctx.contact_name
        ),
    };
    Ok(Some(
        EventDraft::new(
            EventCategory::Mentorship,
            format!("A parting gift from {}", ctx.contact_name),
            body,
        )
        .with(EntityRef::Contact(ctx.contact_id)),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoutline_types::{AbsoluteWeek, EngineVariant};

    use super::*;
    use crate::catalog::storyline_registry;
    use crate::config::VariantConfig;
    use crate::context::InstanceContext;
    use crate::engine::StoryEngine;
    use crate::instance::Resolution;
    use crate::rng::SequenceRng;
    use crate::testing::{self, HOME_CLUB, MENTOR, RIVAL, STRIKER};

    fn engine() -> StoryEngine {
        StoryEngine::new(
            EngineVariant::Storyline,
            &VariantConfig::storyline(),
            storyline_registry().unwrap(),
        )
        .unwrap()
    }

    fn boardroom() -> Instance {
        Instance::start(
            EngineVariant::Storyline,
            TemplateId::BoardroomShakeup,
            AbsoluteWeek(1),
            3,
            InstanceContext::new(StoryContext::BoardroomShakeup(BoardroomContext {
                club_id: HOME_CLUB,
                club_name: "Harbour Town".to_owned(),
                investors: "a Gulf consortium".to_owned(),
            })),
        )
    }

    #[test]
    fn boardroom_aborts_when_scout_leaves_the_club() {
        let engine = engine();
        let mut rng = SequenceRng::new(vec![0.5]);
        let opened = engine
            .advance_instance(&boardroom(), &testing::snapshot(1, 1), &mut rng)
            .unwrap();
        assert!(opened.event.is_some());

        let mut moved = testing::snapshot(1, 4);
        moved.scout.current_club_id = Some(testing::AWAY_CLUB);
        let step = engine
            .advance_instance(&opened.instance, &moved, &mut rng)
            .unwrap();
        assert!(step.event.is_none());
        assert_eq!(step.instance.resolution, Some(Resolution::HardAbort));
    }

    #[test]
    fn events_link_entities_by_bare_id() {
        let engine = engine();
        let instance = Instance::start(
            EngineVariant::Storyline,
            TemplateId::RivalPoaching,
            AbsoluteWeek(1),
            3,
            InstanceContext::new(StoryContext::RivalPoaching(RivalPoachingContext {
                rival_id: RIVAL,
                rival_name: "Dmitri Volkov".to_owned(),
                player_id: STRIKER,
                player_name: "Tomás Ferreira".to_owned(),
            })),
        );
        let event = engine
            .advance_instance(&instance, &testing::snapshot(1, 1), &mut SequenceRng::new(vec![0.5]))
            .unwrap()
            .event
            .unwrap();
        assert_eq!(event.related_ids, vec![RIVAL.to_string(), STRIKER.to_string()]);
    }

    #[test]
    fn declined_agent_soft_aborts() {
        let engine = engine();
        let mut rng = SequenceRng::new(vec![0.0]);
        let world = testing::snapshot(1, 1);
        let context = agent_context(&world, &mut rng).unwrap();
        let instance = Instance::start(
            EngineVariant::Storyline,
            TemplateId::AgentOffer,
            AbsoluteWeek(1),
            3,
            InstanceContext::new(context),
        );
        let opened = engine.advance_instance(&instance, &world, &mut rng).unwrap();
        let declined = engine
            .resolve_choice(&opened.instance, 0, 1, &mut rng)
            .unwrap();
        assert_eq!(declined.effect, Some(EffectTag::DeclineAgent));

        let step = engine
            .advance_instance(&declined.instance, &testing::snapshot(1, 3), &mut rng)
            .unwrap();
        assert!(step.event.is_none());
        assert_eq!(step.instance.resolution, Some(Resolution::SoftAbort));
    }

    #[test]
    fn mentor_farewell_requires_the_mentor() {
        let engine = engine();
        let mut rng = SequenceRng::new(vec![0.0]);
        let world = testing::snapshot(1, 1);
        let context = mentor_context(&world, &mut rng).unwrap();
        let instance = Instance::start(
            EngineVariant::Storyline,
            TemplateId::MentorFarewell,
            AbsoluteWeek(1),
            2,
            InstanceContext::new(context),
        );
        let opened = engine.advance_instance(&instance, &world, &mut rng).unwrap();

        let mut lonely = testing::snapshot(1, 5);
        lonely.contacts.remove(&MENTOR);
        let step = engine
            .advance_instance(&opened.instance, &lonely, &mut rng)
            .unwrap();
        assert_eq!(step.instance.resolution, Some(Resolution::HardAbort));
    }

    #[test]
    fn wonderkid_potential_is_in_range() {
        let world = testing::snapshot(1, 1);
        for draw in [0.0, 0.5, 0.99] {
            let mut rng = SequenceRng::new(vec![draw]);
            let context = wonderkid_context(&world, &mut rng).unwrap();
            assert!(matches!(
                context,
                StoryContext::WonderkidWhispers(ref ctx) if (55..=95).contains(&ctx.hidden_potential)
            ));
        }
    }

    #[test]
    fn unemployed_scout_gets_no_boardroom_story() {
        let mut world = testing::snapshot(1, 1);
        world.scout.current_club_id = None;
        assert!(!boardroom_eligible(&world));
    }
}
