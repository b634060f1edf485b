//! Type-safe identifiers.
//!
//! World entities (players, clubs, contacts, rival scouts) are owned by
//! collaborators outside the story engine and carry UUID identities. Story
//! instances and the events they emit use deterministic string keys instead,
//! so that a seeded replay produces byte-identical saves.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create an identifier from a fixed integer (seeded worlds, fixtures).
            pub const fn from_u128(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around a deterministic string key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }
    };
}

define_id! {
    /// Unique identifier for a player tracked by the scout.
    PlayerId
}

define_id! {
    /// Unique identifier for a club.
    ClubId
}

define_id! {
    /// Unique identifier for one of the scout's contacts.
    ContactId
}

define_id! {
    /// Unique identifier for a rival scout.
    RivalScoutId
}

define_key! {
    /// Key of one running or resolved story instance.
    InstanceId
}

define_key! {
    /// Key of one narrative event emitted by a story instance.
    EventId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_wrap_their_uuid() {
        let uuid = Uuid::from_u128(42);
        assert_eq!(ClubId::from(uuid).into_inner(), uuid);
        assert_eq!(PlayerId::from(uuid), PlayerId::from_u128(42));
    }

    #[test]
    fn fixed_ids_are_stable() {
        assert_eq!(PlayerId::from_u128(7), PlayerId::from_u128(7));
        assert_eq!(PlayerId::from_u128(7).to_string(), Uuid::from_u128(7).to_string());
    }

    #[test]
    fn keys_serialize_as_plain_strings() {
        let id = InstanceId::from("storyline-rival_poaching-w12");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"storyline-rival_poaching-w12\""));
        let back: Result<InstanceId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(back.ok(), Some(id));
    }
}
