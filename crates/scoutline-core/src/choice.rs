//! Choice resolution and the effect table.
//!
//! When the player answers a choice-bearing event, the picked option's
//! effect tag is written into the instance context (where later stage
//! generators read it) and mapped to immediate reputation and fatigue
//! deltas. Applying those deltas to the scout is the caller's job.
//!
//! # Failure semantics
//!
//! A choice that cannot be mapped to a tag (retired template, stage not yet
//! emitted, index past the choice list) is a neutral no-op: zero deltas and
//! an unchanged instance. Narrative content never fails the simulation.

use scoutline_types::EffectTag;

use crate::instance::Instance;
use crate::rng::{RngError, StoryRng};
use crate::template::TemplateRegistry;

// ---------------------------------------------------------------------------
// Sub-roll probabilities
// ---------------------------------------------------------------------------

/// Chance that backing the chairman pays off.
const BACK_CHAIRMAN_SUCCESS: f64 = 0.5;

/// Chance that trading favours with an agent is discovered.
const AGENT_LEVERAGE_DISCOVERY: f64 = 0.3;

/// Chance that a denied leak is exposed as the scout's own notes.
const DENY_LEAK_EXPOSURE: f64 = 0.25;

/// Chance that confronting a rival backfires.
const CONFRONT_RIVAL_BACKFIRE: f64 = 0.4;

// ---------------------------------------------------------------------------
// Effect table
// ---------------------------------------------------------------------------

/// Reputation part of an effect: fixed, or decided by one sub-roll.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Reputation {
    Fixed(i32),
    /// `hit` applies with probability `chance`, `miss` otherwise.
    Roll { chance: f64, hit: i32, miss: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct EffectRule {
    reputation: Reputation,
    fatigue: i32,
    message: &'static str,
}

const fn fixed(reputation: i32, fatigue: i32, message: &'static str) -> EffectRule {
    EffectRule {
        reputation: Reputation::Fixed(reputation),
        fatigue,
        message,
    }
}

const fn roll(chance: f64, hit: i32, miss: i32, fatigue: i32, message: &'static str) -> EffectRule {
    EffectRule {
        reputation: Reputation::Roll { chance, hit, miss },
        fatigue,
        message,
    }
}

const fn rule_for(tag: EffectTag) -> Option<EffectRule> {
    let rule = match tag {
        EffectTag::MoveFirst => fixed(2, 5, "You moved before your rival could."),
        EffectTag::AlertDirector => fixed(1, 0, "The director appreciates the warning."),
        EffectTag::LetItGo => fixed(0, -2, "You let this one go and rest instead."),
        EffectTag::BackChairman => roll(
            BACK_CHAIRMAN_SUCCESS,
            3,
            -2,
            2,
            "You put your name behind the chairman.",
        ),
        EffectTag::StayNeutral => fixed(0, 0, "You keep out of boardroom politics."),
        EffectTag::CourtInvestors => fixed(2, 3, "You make yourself known to the new money."),
        EffectTag::AgentLeverage => roll(
            AGENT_LEVERAGE_DISCOVERY,
            -3,
            0,
            0,
            "You trade favours with the agent.",
        ),
        EffectTag::DeclineAgent => fixed(1, 0, "You turn the agent down politely."),
        EffectTag::ReportAgent => fixed(2, 2, "You report the approach to the club."),
        EffectTag::TravelNow => fixed(1, 8, "You book the first flight out."),
        EffectTag::SendContact => fixed(0, 1, "You send a trusted contact to take a look."),
        EffectTag::IgnoreRumour => fixed(0, -2, "You file the rumour away."),
        EffectTag::AttendFarewell => fixed(1, 3, "You make the trip to say goodbye."),
        EffectTag::SendNote => fixed(0, 0, "You send a warm note instead."),
        EffectTag::MonitorRecovery => fixed(0, 2, "You keep close tabs on the recovery."),
        EffectTag::DropInterest => fixed(0, 0, "You take the player off your list."),
        EffectTag::BackTransfer => fixed(2, 2, "You put your report behind the move."),
        EffectTag::AdviseCaution => fixed(1, 0, "You advise the club to wait."),
        EffectTag::DenyLeak => roll(
            DENY_LEAK_EXPOSURE,
            -4,
            1,
            0,
            "You deny the notes are yours.",
        ),
        EffectTag::ConfirmLeak => fixed(-2, 0, "You own up to the leak."),
        EffectTag::NoComment => fixed(0, 0, "You decline to comment."),
        EffectTag::AttendTournament => fixed(2, 6, "You pack for the tournament."),
        EffectTag::SkipTournament => fixed(0, -3, "You watch the highlights from home."),
        EffectTag::ConfrontRival => roll(
            CONFRONT_RIVAL_BACKFIRE,
            -2,
            2,
            4,
            "You confront your rival in public.",
        ),
        EffectTag::RiseAbove => fixed(1, 0, "You rise above it."),
        EffectTag::Unrecognized => return None,
    };
    Some(rule)
}

/// Immediate numeric consequences of one choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectDelta {
    /// Change to scout reputation.
    pub reputation: i32,
    /// Change to scout fatigue.
    pub fatigue: i32,
    /// Short feedback line; `None` for a neutral no-op.
    pub message: Option<&'static str>,
}

/// Compute the deltas for `tag`.
///
/// Tags with a probabilistic sub-outcome consume exactly one draw; all
/// others consume none. Unrecognized tags yield zero deltas.
///
/// # Errors
///
/// Propagates [`RngError`] from the random source.
pub fn effect_of(tag: EffectTag, rng: &mut dyn StoryRng) -> Result<EffectDelta, RngError> {
    let Some(rule) = rule_for(tag) else {
        return Ok(EffectDelta::default());
    };
    let reputation = match rule.reputation {
        Reputation::Fixed(value) => value,
        Reputation::Roll { chance, hit, miss } => {
            if rng.chance(chance)? {
                hit
            } else {
                miss
            }
        }
    };
    Ok(EffectDelta {
        reputation,
        fatigue: rule.fatigue,
        message: Some(rule.message),
    })
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Result of resolving one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceResolution {
    /// The instance with the choice recorded.
    pub instance: Instance,
    /// Tag the choice mapped to; `None` when the choice was stale.
    pub effect: Option<EffectTag>,
    /// Change to scout reputation.
    pub reputation_delta: i32,
    /// Change to scout fatigue.
    pub fatigue_delta: i32,
    /// Feedback line for the inbox.
    pub message: Option<&'static str>,
}

impl ChoiceResolution {
    fn neutral(instance: &Instance) -> Self {
        Self {
            instance: instance.clone(),
            effect: None,
            reputation_delta: 0,
            fatigue_delta: 0,
            message: None,
        }
    }
}

/// Apply `choice` at `stage` of `instance`.
///
/// The input instance is not modified; the updated copy is returned.
///
/// # Errors
///
/// Propagates [`RngError`] from an effect sub-roll.
pub fn resolve_choice(
    registry: &TemplateRegistry,
    instance: &Instance,
    stage: u32,
    choice: u32,
    rng: &mut dyn StoryRng,
) -> Result<ChoiceResolution, RngError> {
    if stage >= instance.current_stage {
        tracing::debug!(
            instance = %instance.id,
            stage,
            current_stage = instance.current_stage,
            "choice for a stage that has not fired, ignoring"
        );
        return Ok(ChoiceResolution::neutral(instance));
    }
    if let Some(previous) = instance.choice_at(stage) {
        tracing::debug!(
            instance = %instance.id,
            stage,
            previous,
            "stage already answered, ignoring"
        );
        return Ok(ChoiceResolution::neutral(instance));
    }
    let Some(tag) = registry.effect_for(instance.template_id, stage, choice) else {
        tracing::debug!(
            instance = %instance.id,
            template = %instance.template_id,
            stage,
            choice,
            "choice does not map to an effect, ignoring"
        );
        return Ok(ChoiceResolution::neutral(instance));
    };

    let delta = effect_of(tag, rng)?;

    let mut updated = instance.clone();
    updated.context.player_choice = Some(tag);
    record_choice(&mut updated, stage, choice);

    tracing::debug!(
        instance = %updated.id,
        stage,
        choice,
        effect = %tag,
        reputation = delta.reputation,
        fatigue = delta.fatigue,
        "choice resolved"
    );

    Ok(ChoiceResolution {
        instance: updated,
        effect: Some(tag),
        reputation_delta: delta.reputation,
        fatigue_delta: delta.fatigue,
        message: delta.message,
    })
}

fn record_choice(instance: &mut Instance, stage: u32, choice: u32) {
    let Ok(slot) = usize::try_from(stage) else {
        return;
    };
    if instance.choice_history.len() <= slot {
        instance.choice_history.resize(slot.saturating_add(1), None);
    }
    if let Some(entry) = instance.choice_history.get_mut(slot) {
        *entry = Some(choice);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoutline_types::{AbsoluteWeek, ContactId, EngineVariant, TemplateId};

    use super::*;
    use crate::catalog;
    use crate::context::{AgentOfferContext, InstanceContext, StoryContext};
    use crate::rng::SequenceRng;

    fn registry() -> TemplateRegistry {
        catalog::storyline_registry().unwrap()
    }

    fn agent_instance() -> Instance {
        let mut instance = Instance::start(
            EngineVariant::Storyline,
            TemplateId::AgentOffer,
            AbsoluteWeek(5),
            3,
            InstanceContext::new(StoryContext::AgentOffer(AgentOfferContext {
                agent_id: ContactId::from_u128(4),
                agent_name: "Vince Moreau".to_owned(),
                client_id: None,
                client_name: None,
            })),
        );
        instance.current_stage = 1;
        instance.next_step_week = AbsoluteWeek(7);
        instance
    }

    /// Index of `tag` in stage 0 of `agent_offer`.
    fn agent_choice(tag: EffectTag) -> u32 {
        let registry = registry();
        (0..8)
            .find(|&i| registry.effect_for(TemplateId::AgentOffer, 0, i) == Some(tag))
            .unwrap()
    }

    #[test]
    fn fixed_effects_consume_no_draws() {
        let mut rng = SequenceRng::new(vec![0.5]);
        let delta = effect_of(EffectTag::TravelNow, &mut rng).unwrap();
        assert_eq!((delta.reputation, delta.fatigue), (1, 8));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn rolled_effects_consume_one_draw() {
        let mut rng = SequenceRng::new(vec![0.1]);
        let delta = effect_of(EffectTag::BackChairman, &mut rng).unwrap();
        assert_eq!((delta.reputation, delta.fatigue), (3, 2));
        assert_eq!(rng.consumed(), 1);

        let mut rng = SequenceRng::new(vec![0.9]);
        let delta = effect_of(EffectTag::BackChairman, &mut rng).unwrap();
        assert_eq!(delta.reputation, -2);
    }

    #[test]
    fn sub_rolls_follow_documented_branches() {
        let cases = [
            (EffectTag::AgentLeverage, -3, 0),
            (EffectTag::DenyLeak, -4, 1),
            (EffectTag::ConfrontRival, -2, 2),
        ];
        for (tag, hit, miss) in cases {
            let low = effect_of(tag, &mut SequenceRng::new(vec![0.0])).unwrap();
            let high = effect_of(tag, &mut SequenceRng::new(vec![0.99])).unwrap();
            assert_eq!(low.reputation, hit, "{tag} hit");
            assert_eq!(high.reputation, miss, "{tag} miss");
            assert_eq!(low.message, high.message);
        }
    }

    #[test]
    fn unrecognized_tag_is_neutral() {
        let mut rng = SequenceRng::new(vec![0.0]);
        let delta = effect_of(EffectTag::Unrecognized, &mut rng).unwrap();
        assert_eq!(delta, EffectDelta::default());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn leverage_branches_differ_only_in_reputation() {
        let registry = registry();
        let instance = agent_instance();
        let choice = agent_choice(EffectTag::AgentLeverage);

        let discovered =
            resolve_choice(&registry, &instance, 0, choice, &mut SequenceRng::new(vec![0.1]))
                .unwrap();
        let unnoticed =
            resolve_choice(&registry, &instance, 0, choice, &mut SequenceRng::new(vec![0.8]))
                .unwrap();

        assert_eq!(discovered.reputation_delta, -3);
        assert_eq!(unnoticed.reputation_delta, 0);
        assert_eq!(discovered.instance, unnoticed.instance);
        assert_eq!(discovered.fatigue_delta, unnoticed.fatigue_delta);
        assert_eq!(discovered.message, unnoticed.message);
        assert_eq!(discovered.effect, Some(EffectTag::AgentLeverage));
    }

    #[test]
    fn choice_is_recorded_in_context_and_history() {
        let registry = registry();
        let instance = agent_instance();
        let choice = agent_choice(EffectTag::DeclineAgent);
        let mut rng = SequenceRng::new(vec![0.5]);

        let resolution = resolve_choice(&registry, &instance, 0, choice, &mut rng).unwrap();
        assert_eq!(
            resolution.instance.context.player_choice,
            Some(EffectTag::DeclineAgent)
        );
        assert_eq!(resolution.instance.choice_at(0), Some(choice));
        assert_eq!(resolution.reputation_delta, 1);
        assert!(instance.context.player_choice.is_none(), "input untouched");
    }

    #[test]
    fn short_history_is_grown() {
        let registry = registry();
        let mut instance = agent_instance();
        instance.choice_history.clear();
        let choice = agent_choice(EffectTag::ReportAgent);
        let mut rng = SequenceRng::new(vec![0.5]);

        let resolution = resolve_choice(&registry, &instance, 0, choice, &mut rng).unwrap();
        assert_eq!(resolution.instance.choice_history, vec![Some(choice)]);
    }

    #[test]
    fn stale_choices_are_neutral() {
        let registry = registry();
        let instance = agent_instance();
        let mut rng = SequenceRng::new(vec![0.0]);

        // Index past the choice list.
        let past_end = resolve_choice(&registry, &instance, 0, 99, &mut rng).unwrap();
        assert_eq!(past_end.effect, None);
        assert_eq!((past_end.reputation_delta, past_end.fatigue_delta), (0, 0));
        assert_eq!(past_end.instance, instance);

        // Stage not reached yet.
        let early = resolve_choice(&registry, &instance, 2, 0, &mut rng).unwrap();
        assert_eq!(early.instance, instance);

        // Template retired since the save was written.
        let mut retired = instance.clone();
        retired.template_id = TemplateId::Retired;
        let gone = resolve_choice(&registry, &retired, 0, 0, &mut rng).unwrap();
        assert_eq!(gone.effect, None);
        assert_eq!(gone.instance, retired);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn answered_stage_cannot_be_answered_again() {
        let registry = registry();
        let report = agent_choice(EffectTag::ReportAgent);
        let leverage = agent_choice(EffectTag::AgentLeverage);
        let mut rng = SequenceRng::new(vec![0.0]);

        let first = resolve_choice(&registry, &agent_instance(), 0, report, &mut rng).unwrap();
        assert_eq!((first.reputation_delta, first.fatigue_delta), (2, 2));

        let repeat = resolve_choice(&registry, &first.instance, 0, report, &mut rng).unwrap();
        assert_eq!(repeat.effect, None);
        assert_eq!((repeat.reputation_delta, repeat.fatigue_delta), (0, 0));
        assert_eq!(repeat.instance, first.instance);

        let switched = resolve_choice(&registry, &first.instance, 0, leverage, &mut rng).unwrap();
        assert_eq!(switched.effect, None);
        assert_eq!(switched.instance.choice_at(0), Some(report));
        assert_eq!(
            switched.instance.context.player_choice,
            Some(EffectTag::ReportAgent)
        );
        assert_eq!(rng.consumed(), 0);
    }
}
