//! The weekly story scheduler.
//!
//! One [`StoryEngine`] drives one variant (storylines or event chains). Each
//! week it runs two steps:
//!
//! 1. **Trigger** -- capacity check, weekly roll, eligibility filter, uniform
//!    pick, context construction. At most one instance starts per week.
//! 2. **Advance** -- every unresolved instance whose next-due week has
//!    arrived fires its current stage, in insertion order.
//!
//! Both steps consume the same random stream in a fixed order, so given the
//! same seed, instances, and snapshots, every outcome is reproducible.
//!
//! The engine is a pure function of its inputs: it never mutates the
//! instances it is handed and returns updated copies instead.

use scoutline_types::{AbsoluteWeek, EngineVariant, InstanceId, NarrativeEvent, WorldSnapshot};
use tracing::{debug, info};

use crate::calendar::Calendar;
use crate::choice::{self, ChoiceResolution};
use crate::config::VariantConfig;
use crate::context::InstanceContext;
use crate::error::EngineError;
use crate::instance::{Instance, Resolution};
use crate::rng::StoryRng;
use crate::template::{ChoiceSpec, RegistryError, Template, TemplateRegistry};

/// Result of advancing one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The instance after the step (unchanged when nothing was due).
    pub instance: Instance,
    /// The event the stage emitted, if it fired.
    pub event: Option<NarrativeEvent>,
}

/// Result of advancing every due instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Events emitted this week, in processing order.
    pub events: Vec<NarrativeEvent>,
    /// All instances after the step, in input order.
    pub instances: Vec<Instance>,
}

/// Result of a full weekly tick of one engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekOutcome {
    /// Instance started this week, if any.
    pub triggered: Option<InstanceId>,
    /// Events emitted this week, in processing order.
    pub events: Vec<NarrativeEvent>,
    /// All instances after the tick; a new instance is appended last.
    pub instances: Vec<Instance>,
}

/// Scheduler for one engine variant.
#[derive(Debug, Clone)]
pub struct StoryEngine {
    variant: EngineVariant,
    calendar: Calendar,
    trigger_chance: f64,
    max_concurrent: usize,
    registry: TemplateRegistry,
}

impl StoryEngine {
    /// Build an engine from its variant parameters and template catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for invalid parameters,
    /// [`EngineError::Calendar`] for a zero-length season, and
    /// [`EngineError::Registry`] if the registry serves the other variant.
    pub fn new(
        variant: EngineVariant,
        config: &VariantConfig,
        registry: TemplateRegistry,
    ) -> Result<Self, EngineError> {
        config.validate(variant.key_prefix())?;
        if registry.variant() != variant {
            return Err(RegistryError::VariantMismatch {
                expected: variant,
                found: registry.variant(),
            }
            .into());
        }
        Ok(Self {
            variant,
            calendar: Calendar::new(config.weeks_per_season)?,
            trigger_chance: config.trigger_chance,
            max_concurrent: config.max_concurrent,
            registry,
        })
    }

    /// The variant this engine drives.
    pub const fn variant(&self) -> EngineVariant {
        self.variant
    }

    /// The variant's calendar.
    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// The variant's template catalog.
    pub const fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Maximum number of unresolved instances at trigger time.
    pub const fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Absolute week of the snapshot on this variant's calendar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Calendar`] if the snapshot date does not exist
    /// on this calendar.
    pub fn current_week(&self, snapshot: &WorldSnapshot) -> Result<AbsoluteWeek, EngineError> {
        Ok(self.calendar.to_absolute(snapshot.date)?)
    }

    /// Try to start one new instance this week.
    ///
    /// Returns `Ok(None)` when capacity is full, the weekly roll fails, or
    /// no template is eligible. Draws, in order: one for the roll, one for
    /// the pick, then whatever the context constructor draws.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] only for contract violations.
    pub fn try_trigger(
        &self,
        snapshot: &WorldSnapshot,
        instances: &[Instance],
        rng: &mut dyn StoryRng,
    ) -> Result<Option<Instance>, EngineError> {
        let now = self.current_week(snapshot)?;

        let active = instances.iter().filter(|i| i.is_active()).count();
        if active >= self.max_concurrent {
            debug!(variant = %self.variant, active, "at capacity, skipping trigger");
            return Ok(None);
        }

        if !rng.chance(self.trigger_chance)? {
            return Ok(None);
        }

        let candidates: Vec<&'static Template> = self
            .registry
            .templates()
            .filter(|t| !blocks_template(instances, t, now))
            .filter(|t| (t.eligible)(snapshot))
            .collect();
        if candidates.is_empty() {
            debug!(variant = %self.variant, week = %now, "no eligible template");
            return Ok(None);
        }

        let template = *rng.pick(&candidates)?;
        let details = (template.build_context)(snapshot, rng)?;
        let instance = Instance::start(
            self.variant,
            template.id,
            now,
            template.stage_count(),
            InstanceContext::new(details),
        );

        info!(
            variant = %self.variant,
            instance = %instance.id,
            template = %template.id,
            week = %now,
            "story triggered"
        );
        Ok(Some(instance))
    }

    /// Fire the current stage of `instance` if it is due.
    ///
    /// Instances that are resolved or not yet due come back unchanged and
    /// consume no draws.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] only for contract violations.
    pub fn advance_instance(
        &self,
        instance: &Instance,
        snapshot: &WorldSnapshot,
        rng: &mut dyn StoryRng,
    ) -> Result<StepOutcome, EngineError> {
        let now = self.current_week(snapshot)?;
        if !instance.is_due(now) {
            return Ok(unchanged(instance));
        }

        let Some(template) = self.registry.get(instance.template_id) else {
            return Ok(terminate(instance, Resolution::UnknownTemplate));
        };
        let stage_index = instance.current_stage;
        let Some(stage) = template.stage(stage_index) else {
            return Ok(terminate(instance, Resolution::StagesExhausted));
        };
        if let Some(prerequisite) = stage.prerequisite
            && !prerequisite(snapshot, instance)
        {
            return Ok(terminate(instance, Resolution::HardAbort));
        }
        let Some(draft) = (stage.generate)(instance, snapshot, rng)? else {
            return Ok(terminate(instance, Resolution::SoftAbort));
        };

        let next_index = stage_index.saturating_add(1);
        let next_due = match template.stage(next_index) {
            Some(next) => Some(self.calendar.add_weeks(now, next.week_delay)?),
            None => None,
        };
        let follow_up = match next_due {
            Some(week) => Some(self.calendar.from_absolute(week)?),
            None => None,
        };

        let event = NarrativeEvent {
            id: instance.event_key(stage_index),
            category: draft.category,
            week: snapshot.date.week,
            season: snapshot.date.season,
            title: draft.title,
            body: draft.body,
            related_ids: draft.related.iter().map(ToString::to_string).collect(),
            acknowledged: false,
            choices: stage.choices.iter().map(ChoiceSpec::descriptor).collect(),
            chain_id: Some(instance.id.clone()),
            chain_step: Some(stage_index),
            escalation_level: stage.escalation,
            follow_up,
        };

        let mut updated = instance.clone();
        updated.current_stage = next_index;
        updated.event_ids.push(event.id.clone());
        match next_due {
            Some(week) => updated.next_step_week = week,
            None => updated.resolve(Resolution::Completed),
        }

        debug!(
            instance = %updated.id,
            stage = stage_index,
            event = %event.id,
            resolved = updated.resolved,
            "stage fired"
        );
        Ok(StepOutcome {
            instance: updated,
            event: Some(event),
        })
    }

    /// Advance every due instance, in input order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] only for contract violations.
    pub fn advance_all(
        &self,
        snapshot: &WorldSnapshot,
        instances: &[Instance],
        rng: &mut dyn StoryRng,
    ) -> Result<AdvanceOutcome, EngineError> {
        let mut outcome = AdvanceOutcome {
            events: Vec::new(),
            instances: Vec::with_capacity(instances.len()),
        };
        for instance in instances {
            let step = self.advance_instance(instance, snapshot, rng)?;
            outcome.events.extend(step.event);
            outcome.instances.push(step.instance);
        }
        Ok(outcome)
    }

    /// Trigger, then advance everything, so a new instance emits its first
    /// event in the same week.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] only for contract violations.
    pub fn run_week(
        &self,
        snapshot: &WorldSnapshot,
        instances: &[Instance],
        rng: &mut dyn StoryRng,
    ) -> Result<WeekOutcome, EngineError> {
        let started = self.try_trigger(snapshot, instances, rng)?;
        let triggered = started.as_ref().map(|i| i.id.clone());

        let mut working = instances.to_vec();
        working.extend(started);
        let advanced = self.advance_all(snapshot, &working, rng)?;

        Ok(WeekOutcome {
            triggered,
            events: advanced.events,
            instances: advanced.instances,
        })
    }

    /// Apply the player's pick at `stage` of `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rng`] if an effect sub-roll fails.
    pub fn resolve_choice(
        &self,
        instance: &Instance,
        stage: u32,
        choice: u32,
        rng: &mut dyn StoryRng,
    ) -> Result<ChoiceResolution, EngineError> {
        Ok(choice::resolve_choice(
            &self.registry,
            instance,
            stage,
            choice,
            rng,
        )?)
    }
}

/// Whether `template` may not start at `now`: it is already running, or an
/// instance with the same key exists from an earlier pass over this week.
fn blocks_template(instances: &[Instance], template: &Template, now: AbsoluteWeek) -> bool {
    instances
        .iter()
        .any(|i| i.template_id == template.id && (i.is_active() || i.start_week == now))
}

fn unchanged(instance: &Instance) -> StepOutcome {
    StepOutcome {
        instance: instance.clone(),
        event: None,
    }
}

fn terminate(instance: &Instance, why: Resolution) -> StepOutcome {
    let mut updated = instance.clone();
    updated.resolve(why);
    debug!(
        instance = %updated.id,
        template = %updated.template_id,
        stage = updated.current_stage,
        resolution = ?why,
        "story resolved without event"
    );
    StepOutcome {
        instance: updated,
        event: None,
    }
}
