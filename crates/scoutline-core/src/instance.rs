//! Persisted story instances.
//!
//! An [`Instance`] is the save-file record of one running (or resolved)
//! story. It references its template by [`TemplateId`] only, never by any
//! live handle, so save data carries no executable logic. The template is
//! looked up in the registry every time the instance is advanced.
//!
//! Lifecycle: created by the scheduler's trigger step at stage 0, advanced
//! one stage per due tick, and terminated (never deleted) when its stages
//! are exhausted or a stage aborts.

use serde::{Deserialize, Serialize};

use scoutline_types::{AbsoluteWeek, EngineVariant, EventId, InstanceId, TemplateId};

use crate::context::InstanceContext;

/// Why an instance stopped advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The final stage fired.
    Completed,
    /// A stage generator decided the moment had passed.
    SoftAbort,
    /// A stage prerequisite no longer held.
    HardAbort,
    /// The template id is not in the registry (stale save).
    UnknownTemplate,
    /// The stage pointer ran past the template's stage list (stale save).
    StagesExhausted,
}

/// One running or resolved occurrence of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Deterministic key: `<variant>-<template>-w<start week>`.
    pub id: InstanceId,
    /// Template this instance runs.
    pub template_id: TemplateId,
    /// Absolute week the instance was created.
    pub start_week: AbsoluteWeek,
    /// Index of the next stage to fire. Never decreases.
    pub current_stage: u32,
    /// Number of stages in the template at creation.
    pub max_steps: u32,
    /// Terminal once true.
    pub resolved: bool,
    /// Chosen option per stage; `None` until the player picks.
    pub choice_history: Vec<Option<u32>>,
    /// Template-specific context plus the latest choice.
    pub context: InstanceContext,
    /// Absolute week the next stage is due.
    pub next_step_week: AbsoluteWeek,
    /// Events emitted so far, in stage order.
    pub event_ids: Vec<EventId>,
    /// Why the instance ended, once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl Instance {
    /// Create a fresh instance due immediately at `start_week`.
    pub fn start(
        variant: EngineVariant,
        template_id: TemplateId,
        start_week: AbsoluteWeek,
        max_steps: u32,
        context: InstanceContext,
    ) -> Self {
        let slots = usize::try_from(max_steps).unwrap_or(0);
        Self {
            id: instance_key(variant, template_id, start_week),
            template_id,
            start_week,
            current_stage: 0,
            max_steps,
            resolved: false,
            choice_history: vec![None; slots],
            context,
            next_step_week: start_week,
            event_ids: Vec::new(),
            resolution: None,
        }
    }

    /// Whether the instance still occupies a concurrency slot.
    pub const fn is_active(&self) -> bool {
        !self.resolved
    }

    /// Whether the next stage is due at `now`.
    pub fn is_due(&self, now: AbsoluteWeek) -> bool {
        !self.resolved && self.next_step_week <= now
    }

    /// Mark the instance terminal.
    pub(crate) const fn resolve(&mut self, why: Resolution) {
        self.resolved = true;
        self.resolution = Some(why);
    }

    /// Key for the event emitted by `stage`.
    pub fn event_key(&self, stage: u32) -> EventId {
        EventId(format!("{}-s{stage}", self.id))
    }

    /// Choice recorded for `stage`, if any.
    pub fn choice_at(&self, stage: u32) -> Option<u32> {
        usize::try_from(stage)
            .ok()
            .and_then(|s| self.choice_history.get(s).copied().flatten())
    }
}

/// Deterministic instance key.
///
/// Unique per variant: at most one instance is created per tick, and a
/// template cannot run twice concurrently.
pub fn instance_key(variant: EngineVariant, template_id: TemplateId, start: AbsoluteWeek) -> InstanceId {
    InstanceId(format!("{}-{}-{start}", variant.key_prefix(), template_id.as_str()))
}
