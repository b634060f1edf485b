//! The authored template catalog.
//!
//! Storylines are personal career arcs on the 38-week calendar; event chains
//! are world-driven sequences on the 52-week calendar. Each template module
//! holds its eligibility rule, context constructor, and stage prose.

pub mod chains;
pub mod storylines;

use scoutline_types::{EffectTag, EngineVariant};

use crate::context::StoryContext;
use crate::instance::Instance;
use crate::rng::{RngError, StoryRng};
use crate::template::{RegistryError, TemplateRegistry};

/// Validated registry of the storyline templates.
///
/// # Errors
///
/// Returns [`RegistryError`] if the authored data is malformed.
pub fn storyline_registry() -> Result<TemplateRegistry, RegistryError> {
    TemplateRegistry::new(EngineVariant::Storyline, &storylines::TEMPLATES)
}

/// Validated registry of the event-chain templates.
///
/// # Errors
///
/// Returns [`RegistryError`] if the authored data is malformed.
pub fn event_chain_registry() -> Result<TemplateRegistry, RegistryError> {
    TemplateRegistry::new(EngineVariant::EventChain, &chains::TEMPLATES)
}

/// Registry for `variant`.
///
/// # Errors
///
/// Returns [`RegistryError`] if the authored data is malformed.
pub fn registry_for(variant: EngineVariant) -> Result<TemplateRegistry, RegistryError> {
    match variant {
        EngineVariant::Storyline => storyline_registry(),
        EngineVariant::EventChain => event_chain_registry(),
    }
}

// ---------------------------------------------------------------------------
// Shared prose helpers
// ---------------------------------------------------------------------------

const FIRST_NAMES: &[&str] = &[
    "Mateo", "Kwame", "Luca", "Yusuf", "Rafael", "Emil", "Tiago", "Noah", "Ayo", "Santiago",
    "Jules", "Kenji",
];

const LAST_NAMES: &[&str] = &[
    "Okafor", "Bianchi", "Haddad", "Moreno", "Kowalski", "Diallo", "Lindgren", "Sato",
    "Ferraz", "Mensah", "Duval", "Novak",
];

/// A freshly invented player name. Consumes two draws.
pub(crate) fn invented_name(rng: &mut dyn StoryRng) -> Result<String, RngError> {
    let first = rng.pick(FIRST_NAMES)?;
    let last = rng.pick(LAST_NAMES)?;
    Ok(format!("{first} {last}"))
}

/// The latest choice recorded on the instance.
pub(crate) const fn last_choice(instance: &Instance) -> Option<EffectTag> {
    instance.context.player_choice
}

/// The instance's template-specific context.
pub(crate) const fn details(instance: &Instance) -> &StoryContext {
    &instance.context.details
}
