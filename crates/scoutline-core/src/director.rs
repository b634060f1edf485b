//! The narrative director: both story engines behind one weekly call.
//!
//! Storylines are always processed before event chains. Both share the
//! caller's random stream, so this order is part of the replay contract.

use scoutline_types::{EngineVariant, InstanceId, NarrativeEvent, WorldSnapshot};
use tracing::debug;

use crate::catalog;
use crate::choice::ChoiceResolution;
use crate::config::{ScoutlineConfig, VariantConfig};
use crate::engine::StoryEngine;
use crate::error::EngineError;
use crate::rng::StoryRng;
use crate::save::StoryState;

/// Everything one weekly tick produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyReport {
    /// Story state after the tick.
    pub state: StoryState,
    /// Events for the inbox, storylines first.
    pub events: Vec<NarrativeEvent>,
    /// Instances started this week, storylines first.
    pub triggered: Vec<InstanceId>,
}

/// A choice applied through the director.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChoice {
    /// Story state with the updated instance in place.
    pub state: StoryState,
    /// Deltas and the updated instance.
    pub resolution: ChoiceResolution,
}

/// Owns the storyline and event-chain engines.
#[derive(Debug, Clone)]
pub struct NarrativeDirector {
    storylines: StoryEngine,
    event_chains: StoryEngine,
}

impl NarrativeDirector {
    /// Build both engines over the shipped catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if either variant's parameters or catalog
    /// are invalid.
    pub fn new(
        storylines: &VariantConfig,
        event_chains: &VariantConfig,
    ) -> Result<Self, EngineError> {
        let engine = |variant: EngineVariant, config: &VariantConfig| {
            StoryEngine::new(variant, config, catalog::registry_for(variant)?)
        };
        Ok(Self {
            storylines: engine(EngineVariant::Storyline, storylines)?,
            event_chains: engine(EngineVariant::EventChain, event_chains)?,
        })
    }

    /// Build both engines from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the configuration or catalog is invalid.
    pub fn from_config(config: &ScoutlineConfig) -> Result<Self, EngineError> {
        Self::new(&config.storylines, &config.event_chains)
    }

    /// The engine driving `variant`.
    pub const fn engine(&self, variant: EngineVariant) -> &StoryEngine {
        match variant {
            EngineVariant::Storyline => &self.storylines,
            EngineVariant::EventChain => &self.event_chains,
        }
    }

    /// Run one week of both engines.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] for contract violations; `state` is left
    /// untouched in that case.
    pub fn weekly_tick(
        &self,
        snapshot: &WorldSnapshot,
        state: &StoryState,
        rng: &mut dyn StoryRng,
    ) -> Result<WeeklyReport, EngineError> {
        let storylines = self
            .storylines
            .run_week(snapshot, state.instances(EngineVariant::Storyline), rng)?;
        let event_chains = self
            .event_chains
            .run_week(snapshot, state.instances(EngineVariant::EventChain), rng)?;

        let mut events = storylines.events;
        events.extend(event_chains.events);
        let triggered: Vec<InstanceId> = storylines
            .triggered
            .into_iter()
            .chain(event_chains.triggered)
            .collect();

        debug!(
            date = %snapshot.date,
            events = events.len(),
            triggered = triggered.len(),
            "weekly story tick"
        );

        Ok(WeeklyReport {
            state: StoryState {
                storylines: storylines.instances,
                event_chains: event_chains.instances,
            },
            events,
            triggered,
        })
    }

    /// Apply the player's pick to the instance keyed `instance_id`.
    ///
    /// Returns `Ok(None)` if no such instance is on file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rng`] if an effect sub-roll fails.
    pub fn resolve_choice(
        &self,
        state: &StoryState,
        instance_id: &InstanceId,
        stage: u32,
        choice: u32,
        rng: &mut dyn StoryRng,
    ) -> Result<Option<ResolvedChoice>, EngineError> {
        let Some((variant, instance)) = state.find(instance_id) else {
            debug!(instance = %instance_id, "choice for unknown instance, ignoring");
            return Ok(None);
        };
        let resolution = self
            .engine(variant)
            .resolve_choice(instance, stage, choice, rng)?;

        let mut updated = state.clone();
        updated.replace(variant, resolution.instance.clone());
        Ok(Some(ResolvedChoice {
            state: updated,
            resolution,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoutline_types::EffectTag;

    use super::*;
    use crate::rng::{SeededRng, SequenceRng};
    use crate::testing;

    fn eager() -> NarrativeDirector {
        let storylines = VariantConfig {
            trigger_chance: 1.0,
            ..VariantConfig::storyline()
        };
        let chains = VariantConfig {
            trigger_chance: 1.0,
            ..VariantConfig::event_chain()
        };
        NarrativeDirector::new(&storylines, &chains).unwrap()
    }

    #[test]
    fn storylines_tick_before_event_chains() {
        let director = eager();
        let mut rng = SequenceRng::new(vec![0.0]);
        let report = director
            .weekly_tick(&testing::snapshot(1, 1), &StoryState::default(), &mut rng)
            .unwrap();

        let triggered: Vec<_> = report.triggered.iter().map(InstanceId::as_str).collect();
        assert_eq!(
            triggered,
            vec!["storyline-rival_poaching-w1", "chain-injury_comeback-w1"]
        );
        let events: Vec<_> = report.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            events,
            vec![
                "storyline-rival_poaching-w1-s0",
                "chain-injury_comeback-w1-s0"
            ]
        );
        assert_eq!(report.state.storylines.len(), 1);
        assert_eq!(report.state.event_chains.len(), 1);
    }

    #[test]
    fn choice_updates_state_in_place() {
        let director = eager();
        let mut rng = SequenceRng::new(vec![0.0]);
        let report = director
            .weekly_tick(&testing::snapshot(1, 1), &StoryState::default(), &mut rng)
            .unwrap();
        let event = report.events.first().unwrap();
        let (_, instance) = report.state.find_by_event(&event.id).unwrap();

        let resolved = director
            .resolve_choice(&report.state, &instance.id, 0, 0, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.resolution.effect, Some(EffectTag::MoveFirst));
        assert_eq!(
            (resolved.resolution.reputation_delta, resolved.resolution.fatigue_delta),
            (2, 5)
        );
        let stored = resolved.state.storylines.first().unwrap();
        assert_eq!(stored.context.player_choice, Some(EffectTag::MoveFirst));
        assert_eq!(resolved.state.event_chains, report.state.event_chains);
    }

    #[test]
    fn unknown_instance_is_ignored() {
        let director = eager();
        let mut rng = SequenceRng::new(vec![0.0]);
        let result = director
            .resolve_choice(
                &StoryState::default(),
                &InstanceId::from("storyline-agent_offer-w9"),
                0,
                0,
                &mut rng,
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn shipped_balance_is_reproducible() {
        let director = NarrativeDirector::from_config(&ScoutlineConfig::default()).unwrap();
        let season = || {
            let mut rng = SeededRng::new(77);
            let mut state = StoryState::default();
            let mut events = Vec::new();
            for week in 1..=38 {
                let report = director
                    .weekly_tick(&testing::snapshot(1, week), &state, &mut rng)
                    .unwrap();
                events.extend(report.events);
                state = report.state;
            }
            (state, events)
        };
        assert_eq!(season(), season());
    }
}
