//! Save-file fragment holding every story instance.
//!
//! One array per engine variant, in insertion order. The order is part of
//! the replay contract: instances are advanced in exactly this order.

use serde::{Deserialize, Serialize};

use scoutline_types::{EngineVariant, EventId, InstanceId};

use crate::instance::Instance;

/// Errors that can occur when reading or writing the story save fragment.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The fragment could not be encoded or decoded.
    #[error("story save JSON error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },
}

/// Persisted state of both story engines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryState {
    /// Storyline instances, oldest first.
    #[serde(default)]
    pub storylines: Vec<Instance>,
    /// Event-chain instances, oldest first.
    #[serde(default)]
    pub event_chains: Vec<Instance>,
}

impl StoryState {
    /// Encode as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. Missing arrays load as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Json`] if the input is not a valid fragment.
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Instances of one variant.
    pub fn instances(&self, variant: EngineVariant) -> &[Instance] {
        match variant {
            EngineVariant::Storyline => &self.storylines,
            EngineVariant::EventChain => &self.event_chains,
        }
    }

    /// Unresolved instances of one variant.
    pub fn active(&self, variant: EngineVariant) -> impl Iterator<Item = &Instance> {
        self.instances(variant).iter().filter(|i| i.is_active())
    }

    /// Look up an instance by key in either array.
    pub fn find(&self, id: &InstanceId) -> Option<(EngineVariant, &Instance)> {
        self.all().find(|(_, i)| &i.id == id)
    }

    /// The instance that emitted `event`, if it is still on file.
    pub fn find_by_event(&self, event: &EventId) -> Option<(EngineVariant, &Instance)> {
        self.all().find(|(_, i)| i.event_ids.contains(event))
    }

    /// Replace the stored copy of `instance`, matched by key.
    ///
    /// Returns `false` if no instance with that key exists.
    pub(crate) fn replace(&mut self, variant: EngineVariant, instance: Instance) -> bool {
        let list = match variant {
            EngineVariant::Storyline => &mut self.storylines,
            EngineVariant::EventChain => &mut self.event_chains,
        };
        match list.iter_mut().find(|i| i.id == instance.id) {
            Some(slot) => {
                *slot = instance;
                true
            }
            None => false,
        }
    }

    fn all(&self) -> impl Iterator<Item = (EngineVariant, &Instance)> {
        let storylines = self.storylines.iter().map(|i| (EngineVariant::Storyline, i));
        let chains = self.event_chains.iter().map(|i| (EngineVariant::EventChain, i));
        storylines.chain(chains)
    }
}
