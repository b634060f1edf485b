//! Story templates and the template registry.
//!
//! A [`Template`] is immutable authored content: an ordered list of
//! [`Stage`]s, an eligibility predicate, and a context constructor. All of
//! it is plain data and plain function pointers, so a registry can be shared
//! by any number of game sessions without synchronisation.
//!
//! Malformed template data is an authoring bug and is rejected loudly when
//! the registry is built, not when a player happens to reach the stage.

use std::collections::BTreeMap;
use std::fmt;

use scoutline_types::{
    ChoiceDescriptor, EffectTag, EngineVariant, EntityRef, EventCategory, TemplateId,
    WorldSnapshot,
};

use crate::context::StoryContext;
use crate::instance::Instance;
use crate::rng::{RngError, StoryRng};

/// Eligibility predicate over the world.
pub type EligibilityFn = fn(&WorldSnapshot) -> bool;

/// Builds the context record of a new instance.
pub type ContextFn = fn(&WorldSnapshot, &mut dyn StoryRng) -> Result<StoryContext, RngError>;

/// Stage prerequisite; `false` hard-aborts the instance.
pub type PrerequisiteFn = fn(&WorldSnapshot, &Instance) -> bool;

/// Stage event generator; `Ok(None)` soft-aborts the instance.
pub type GenerateFn =
    fn(&Instance, &WorldSnapshot, &mut dyn StoryRng) -> Result<Option<EventDraft>, RngError>;

/// Errors in authored template data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two templates share an id.
    #[error("duplicate template id {0}")]
    DuplicateId(TemplateId),

    /// A template has no stages.
    #[error("template {0} has no stages")]
    NoStages(TemplateId),

    /// A template was registered with the wrong engine variant.
    #[error("template {id} does not belong to the {variant} engine")]
    WrongVariant {
        /// The misplaced template.
        id: TemplateId,
        /// The registry's variant.
        variant: EngineVariant,
    },

    /// Stage 0 must fire the week the instance starts.
    #[error("template {id} stage 0 has week delay {delay}, expected 0")]
    DelayedOpening {
        /// The template.
        id: TemplateId,
        /// The authored delay.
        delay: u32,
    },

    /// A registry was handed to an engine of the other variant.
    #[error("registry serves the {found} engine, expected {expected}")]
    VariantMismatch {
        /// The engine's variant.
        expected: EngineVariant,
        /// The registry's variant.
        found: EngineVariant,
    },

    /// A choice list names the neutral fallback tag.
    #[error("template {id} stage {stage} offers the unrecognized effect tag")]
    UnrecognizedEffect {
        /// The template.
        id: TemplateId,
        /// The stage index.
        stage: usize,
    },
}

/// One labelled choice and the effect tag it records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceSpec {
    /// Button label.
    pub label: &'static str,
    /// Tag written into the instance context when picked.
    pub effect: EffectTag,
}

impl ChoiceSpec {
    /// Build a choice spec.
    pub const fn new(label: &'static str, effect: EffectTag) -> Self {
        Self { label, effect }
    }

    /// The descriptor attached to emitted events.
    pub fn descriptor(&self) -> ChoiceDescriptor {
        ChoiceDescriptor {
            label: self.label.to_owned(),
            effect: self.effect,
        }
    }
}

/// Narrative content produced by a stage generator.
///
/// The engine stamps id, date, choices, and chain metadata onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Inbox category.
    pub category: EventCategory,
    /// Headline.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Entities the event refers to.
    pub related: Vec<EntityRef>,
}

impl EventDraft {
    /// Start a draft with no related entities.
    pub fn new(category: EventCategory, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            body: body.into(),
            related: Vec::new(),
        }
    }

    /// Attach a related entity.
    #[must_use]
    pub fn with(mut self, entity: EntityRef) -> Self {
        self.related.push(entity);
        self
    }
}

/// One step of a template.
pub struct Stage {
    /// Weeks after the previous stage (or after start, for stage 0).
    pub week_delay: u32,
    /// Descriptive severity carried onto the event.
    pub escalation: u8,
    /// Optional condition re-checked when the stage comes due.
    pub prerequisite: Option<PrerequisiteFn>,
    /// Produces the stage's event.
    pub generate: GenerateFn,
    /// Ordered choices offered with the event; empty for none.
    pub choices: &'static [ChoiceSpec],
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("week_delay", &self.week_delay)
            .field("escalation", &self.escalation)
            .field("has_prerequisite", &self.prerequisite.is_some())
            .field("choices", &self.choices)
            .finish_non_exhaustive()
    }
}

/// An authored multi-stage story.
pub struct Template {
    /// Unique id.
    pub id: TemplateId,
    /// Display name.
    pub name: &'static str,
    /// Ordered stages.
    pub stages: &'static [Stage],
    /// Whether the template may start in this world.
    pub eligible: EligibilityFn,
    /// Builds the context of a new instance.
    pub build_context: ContextFn,
}

impl Template {
    /// Stage at `index`, if it exists.
    pub fn stage(&self, index: u32) -> Option<&Stage> {
        usize::try_from(index).ok().and_then(|i| self.stages.get(i))
    }

    /// Number of stages.
    pub fn stage_count(&self) -> u32 {
        u32::try_from(self.stages.len()).unwrap_or(u32::MAX)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

/// Validated, immutable catalog of one variant's templates.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    variant: EngineVariant,
    templates: &'static [Template],
    by_id: BTreeMap<TemplateId, usize>,
}

impl TemplateRegistry {
    /// Validate and index a template list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for duplicate ids, templates of another
    /// variant, empty stage lists, a delayed stage 0, or a choice that
    /// records the neutral fallback tag.
    pub fn new(
        variant: EngineVariant,
        templates: &'static [Template],
    ) -> Result<Self, RegistryError> {
        let mut by_id = BTreeMap::new();
        for (index, template) in templates.iter().enumerate() {
            validate_template(variant, template)?;
            if by_id.insert(template.id, index).is_some() {
                return Err(RegistryError::DuplicateId(template.id));
            }
        }
        Ok(Self {
            variant,
            templates,
            by_id,
        })
    }

    /// The variant this registry serves.
    pub const fn variant(&self) -> EngineVariant {
        self.variant
    }

    /// Look up a template; unknown ids return `None`.
    pub fn get(&self, id: TemplateId) -> Option<&'static Template> {
        let templates = self.templates;
        self.by_id.get(&id).and_then(|&i| templates.get(i))
    }

    /// All templates in authored order.
    pub fn templates(&self) -> impl Iterator<Item = &'static Template> {
        self.templates.iter()
    }

    /// Number of registered templates.
    pub const fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry is empty.
    pub const fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Effect tag of `(template, stage, choice)`, from the stage's own
    /// choice list. `None` for any stale coordinate.
    pub fn effect_for(&self, id: TemplateId, stage: u32, choice: u32) -> Option<EffectTag> {
        let stage = self.get(id)?.stage(stage)?;
        let choice = usize::try_from(choice).ok()?;
        stage.choices.get(choice).map(|c| c.effect)
    }
}

fn validate_template(variant: EngineVariant, template: &Template) -> Result<(), RegistryError> {
    if template.id.variant() != Some(variant) {
        return Err(RegistryError::WrongVariant {
            id: template.id,
            variant,
        });
    }
    let Some(opening) = template.stages.first() else {
        return Err(RegistryError::NoStages(template.id));
    };
    if opening.week_delay != 0 {
        return Err(RegistryError::DelayedOpening {
            id: template.id,
            delay: opening.week_delay,
        });
    }
    for (stage, spec) in template.stages.iter().enumerate() {
        if spec.choices.iter().any(|c| c.effect == EffectTag::Unrecognized) {
            return Err(RegistryError::UnrecognizedEffect {
                id: template.id,
                stage,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use scoutline_types::ContactId;

    use super::*;
    use crate::context::MentorContext;

    fn always(_: &WorldSnapshot) -> bool {
        true
    }

    fn context(_: &WorldSnapshot, _: &mut dyn StoryRng) -> Result<StoryContext, RngError> {
        Ok(StoryContext::MentorFarewell(MentorContext {
            contact_id: ContactId::from_u128(1),
            contact_name: "Old Tam".to_owned(),
        }))
    }

    fn note(
        _: &Instance,
        _: &WorldSnapshot,
        _: &mut dyn StoryRng,
    ) -> Result<Option<EventDraft>, RngError> {
        Ok(Some(EventDraft::new(EventCategory::Mentorship, "Note", "A note.")))
    }

    const CHOICES: &[ChoiceSpec] = &[
        ChoiceSpec::new("Go", EffectTag::AttendFarewell),
        ChoiceSpec::new("Write", EffectTag::SendNote),
    ];

    static GOOD_STAGES: [Stage; 2] = [
        Stage {
            week_delay: 0,
            escalation: 1,
            prerequisite: None,
            generate: note,
            choices: CHOICES,
        },
        Stage {
            week_delay: 4,
            escalation: 2,
            prerequisite: None,
            generate: note,
            choices: &[],
        },
    ];

    static DELAYED_STAGES: [Stage; 1] = [Stage {
        week_delay: 2,
        escalation: 1,
        prerequisite: None,
        generate: note,
        choices: &[],
    }];

    static GOOD: [Template; 1] = [Template {
        id: TemplateId::MentorFarewell,
        name: "Farewell",
        stages: &GOOD_STAGES,
        eligible: always,
        build_context: context,
    }];

    static DUPLICATED: [Template; 2] = [
        Template {
            id: TemplateId::MentorFarewell,
            name: "Farewell",
            stages: &GOOD_STAGES,
            eligible: always,
            build_context: context,
        },
        Template {
            id: TemplateId::MentorFarewell,
            name: "Farewell again",
            stages: &GOOD_STAGES,
            eligible: always,
            build_context: context,
        },
    ];

    static DELAYED: [Template; 1] = [Template {
        id: TemplateId::MentorFarewell,
        name: "Late",
        stages: &DELAYED_STAGES,
        eligible: always,
        build_context: context,
    }];

    static EMPTY: [Template; 1] = [Template {
        id: TemplateId::MentorFarewell,
        name: "Empty",
        stages: &[],
        eligible: always,
        build_context: context,
    }];

    #[test]
    fn lookup_by_id() {
        let registry = TemplateRegistry::new(EngineVariant::Storyline, &GOOD).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(TemplateId::MentorFarewell).map(|t| t.name), Some("Farewell"));
        assert!(registry.get(TemplateId::PressLeak).is_none());
        assert!(registry.get(TemplateId::Retired).is_none());
    }

    #[test]
    fn effect_lookup_uses_stage_choices() {
        let registry = TemplateRegistry::new(EngineVariant::Storyline, &GOOD).unwrap();
        assert_eq!(
            registry.effect_for(TemplateId::MentorFarewell, 0, 1),
            Some(EffectTag::SendNote)
        );
        assert_eq!(registry.effect_for(TemplateId::MentorFarewell, 0, 2), None);
        assert_eq!(registry.effect_for(TemplateId::MentorFarewell, 1, 0), None);
        assert_eq!(registry.effect_for(TemplateId::MentorFarewell, 9, 0), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = TemplateRegistry::new(EngineVariant::Storyline, &DUPLICATED).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(TemplateId::MentorFarewell));
    }

    #[test]
    fn rejects_wrong_variant() {
        let err = TemplateRegistry::new(EngineVariant::EventChain, &GOOD).unwrap_err();
        assert!(matches!(err, RegistryError::WrongVariant { .. }));
    }

    #[test]
    fn rejects_delayed_opening() {
        let err = TemplateRegistry::new(EngineVariant::Storyline, &DELAYED).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DelayedOpening {
                id: TemplateId::MentorFarewell,
                delay: 2
            }
        );
    }

    #[test]
    fn rejects_empty_stage_list() {
        let err = TemplateRegistry::new(EngineVariant::Storyline, &EMPTY).unwrap_err();
        assert_eq!(err, RegistryError::NoStages(TemplateId::MentorFarewell));
    }
}
