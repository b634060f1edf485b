//! Headless season runner for the Scoutline story engine.
//!
//! Plays the narrative director against a seeded demo world without any
//! game client attached. Every inbox event is logged; choice-bearing
//! events are answered by a random policy and their deltas are folded back
//! into the scout's stats.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `scoutline-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the director and the demo world
//! 4. Run the configured seasons week by week
//! 5. Optionally write the story save fragment to the path given as the
//!    first argument
//!
//! # Random streams
//!
//! The narrative stream is `simulation.seed` stream 0 and is the only one
//! the director ever sees. The choice policy (stream 1) and world drift
//! (stream 2) draw from their own substreams.

mod error;
mod world;

use std::path::Path;

use scoutline_core::rng::StoryRng;
use scoutline_core::{NarrativeDirector, ScoutlineConfig, SeededRng, StoryState};
use scoutline_types::{EngineVariant, GameDate, NarrativeEvent};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::SimError;
use crate::world::DemoWorld;

const CONFIG_PATH: &str = "scoutline-config.yaml";
const SCOUT_NAME: &str = "Alex Mercer";

const NARRATIVE_STREAM: u64 = 0;
const POLICY_STREAM: u64 = 1;
const DRIFT_STREAM: u64 = 2;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunSummary {
    /// Weeks simulated.
    weeks: u32,
    /// Every event delivered to the inbox, in order.
    events: Vec<NarrativeEvent>,
    /// Number of choices the policy made.
    choices: usize,
    /// Story state at the end of the run.
    state: StoryState,
    /// The world at the end of the run.
    world: DemoWorld,
}

/// Application entry point for the headless runner.
///
/// # Errors
///
/// Returns an error if configuration, the engine, or the save write fails.
fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!(
        seed = config.simulation.seed,
        seasons = config.simulation.seasons,
        weeks_per_season = config.simulation.weeks_per_season,
        "scoutline-sim starting"
    );

    // 3-4. Build and run.
    let summary = run(&config)?;

    let scout = &summary.world.snapshot().scout;
    info!(
        weeks = summary.weeks,
        events = summary.events.len(),
        choices = summary.choices,
        storylines = summary.state.storylines.len(),
        event_chains = summary.state.event_chains.len(),
        active_storylines = summary.state.active(EngineVariant::Storyline).count(),
        active_event_chains = summary.state.active(EngineVariant::EventChain).count(),
        reputation = scout.reputation,
        fatigue = scout.fatigue,
        career_tier = scout.career_tier,
        "Run complete"
    );

    // 5. Save fragment.
    if let Some(path) = std::env::args().nth(1) {
        std::fs::write(&path, summary.state.to_json()?)?;
        info!(path = %path, "Story state written");
    }

    Ok(())
}

/// Load configuration from `scoutline-config.yaml`.
///
/// Falls back to defaults (with environment overrides applied) if the file
/// does not exist.
fn load_config() -> Result<ScoutlineConfig, SimError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(ScoutlineConfig::from_file(config_path)?)
    } else {
        Ok(ScoutlineConfig::from_env()?)
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(config: &ScoutlineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Play the configured seasons from an empty story state.
fn run(config: &ScoutlineConfig) -> Result<RunSummary, SimError> {
    let sim = &config.simulation;
    let last_season = sim
        .starting_season
        .checked_add(sim.seasons.saturating_sub(1))
        .ok_or(SimError::SeasonOverflow {
            start: sim.starting_season,
            seasons: sim.seasons,
        })?;

    let director = NarrativeDirector::from_config(config)?;
    let mut story_rng = SeededRng::with_stream(sim.seed, NARRATIVE_STREAM);
    let mut policy_rng = SeededRng::with_stream(sim.seed, POLICY_STREAM);
    let mut drift_rng = SeededRng::with_stream(sim.seed, DRIFT_STREAM);

    let mut world = DemoWorld::new(SCOUT_NAME, GameDate::new(sim.starting_season, 1));
    let mut state = StoryState::default();
    let mut events = Vec::new();
    let mut choices = 0_usize;
    let mut weeks = 0_u32;

    for season in sim.starting_season..=last_season {
        for week in 1..=sim.weeks_per_season {
            let date = GameDate::new(season, week);
            world.advance_to(date, &mut drift_rng)?;

            let report = director.weekly_tick(world.snapshot(), &state, &mut story_rng)?;
            for id in &report.triggered {
                info!(%date, instance = %id, "Story started");
            }
            state = report.state;

            for event in &report.events {
                info!(
                    %date,
                    event = %event.id,
                    category = ?event.category,
                    escalation = event.escalation_level,
                    title = %event.title,
                    "Inbox"
                );
                debug!(body = %event.body, follow_up = ?event.follow_up, "Inbox body");

                let (Some(chain), Some(stage)) = (&event.chain_id, event.chain_step) else {
                    continue;
                };
                let Some(choice) = choose(event, &mut policy_rng)? else {
                    continue;
                };
                let Some(resolved) =
                    director.resolve_choice(&state, chain, stage, choice, &mut story_rng)?
                else {
                    continue;
                };
                world.apply(&resolved.resolution);
                state = resolved.state;
                choices = choices.saturating_add(1);
                info!(
                    event = %event.id,
                    effect = ?resolved.resolution.effect,
                    reputation_delta = resolved.resolution.reputation_delta,
                    fatigue_delta = resolved.resolution.fatigue_delta,
                    message = resolved.resolution.message.unwrap_or_default(),
                    "Choice made"
                );
            }

            events.extend(report.events);
            weeks = weeks.saturating_add(1);
        }
    }

    Ok(RunSummary {
        weeks,
        events,
        choices,
        state,
        world,
    })
}

/// Uniformly pick one of the event's choices, if it has any.
fn choose(event: &NarrativeEvent, rng: &mut dyn StoryRng) -> Result<Option<u32>, SimError> {
    let Some(last) = event.choices.len().checked_sub(1) else {
        return Ok(None);
    };
    let last = i64::try_from(last).unwrap_or(i64::MAX);
    let picked = rng.next_int(0, last)?;
    Ok(u32::try_from(picked).ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoutline_core::SequenceRng;
    use scoutline_core::config::VariantConfig;
    use scoutline_types::{ChoiceDescriptor, EffectTag, EventCategory, EventId};

    use super::*;

    fn busy_config(seed: u64) -> ScoutlineConfig {
        let mut config = ScoutlineConfig::default();
        config.simulation.seed = seed;
        config.storylines = VariantConfig {
            trigger_chance: 0.4,
            ..VariantConfig::storyline()
        };
        config.event_chains = VariantConfig {
            trigger_chance: 0.5,
            ..VariantConfig::event_chain()
        };
        config
    }

    fn event(choices: &[EffectTag]) -> NarrativeEvent {
        NarrativeEvent {
            id: EventId::from("storyline-agent_offer-w1-s0"),
            category: EventCategory::Agent,
            week: 1,
            season: 1,
            title: String::new(),
            body: String::new(),
            related_ids: Vec::new(),
            acknowledged: false,
            choices: choices
                .iter()
                .map(|&effect| ChoiceDescriptor {
                    label: effect.to_string(),
                    effect,
                })
                .collect(),
            chain_id: None,
            chain_step: Some(0),
            escalation_level: 0,
            follow_up: None,
        }
    }

    #[test]
    fn runs_are_reproducible() {
        let first = run(&busy_config(8)).unwrap();
        let second = run(&busy_config(8)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.weeks, 76);
        assert!(!first.events.is_empty());
        assert!(first.choices > 0);
    }

    #[test]
    fn different_seeds_tell_different_stories() {
        let a = run(&busy_config(1)).unwrap();
        let b = run(&busy_config(2)).unwrap();
        assert_ne!(a.events, b.events);
    }

    #[test]
    fn starting_season_offsets_the_calendar() {
        let mut config = busy_config(4);
        config.simulation.starting_season = 3;
        config.simulation.seasons = 1;
        let summary = run(&config).unwrap();
        assert_eq!(summary.weeks, 38);
        assert!(summary.events.iter().all(|e| e.season == 3));
        assert_eq!(summary.world.snapshot().date, GameDate::new(3, 38));
    }

    #[test]
    fn active_stories_stay_within_their_caps() {
        let summary = run(&busy_config(5)).unwrap();
        let storylines = summary.state.active(EngineVariant::Storyline).count();
        let chains = summary.state.active(EngineVariant::EventChain).count();
        assert!(storylines <= 2, "{storylines} storylines active");
        assert!(chains <= 3, "{chains} event chains active");
        assert!(summary.state.storylines.len() >= storylines);
    }

    #[test]
    fn season_overflow_is_reported() {
        let mut config = ScoutlineConfig::default();
        config.simulation.starting_season = u32::MAX;
        assert!(matches!(
            run(&config),
            Err(SimError::SeasonOverflow { .. })
        ));
    }

    #[test]
    fn policy_skips_events_without_choices() {
        let mut rng = SequenceRng::new(vec![0.5]);
        assert_eq!(choose(&event(&[]), &mut rng).unwrap(), None);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn policy_covers_every_choice() {
        let offer = event(&[
            EffectTag::AgentLeverage,
            EffectTag::DeclineAgent,
            EffectTag::ReportAgent,
        ]);
        let mut rng = SequenceRng::new(vec![0.0, 0.5, 0.99]);
        let picks: Vec<_> = (0..3)
            .map(|_| choose(&offer, &mut rng).unwrap())
            .collect();
        assert_eq!(picks, vec![Some(0), Some(1), Some(2)]);
    }
}
