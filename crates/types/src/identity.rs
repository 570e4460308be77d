use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a content object: its base class plus record id.
///
/// Workflow instances are keyed by this pair, so two objects sharing a base
/// class and id are the same target regardless of their concrete subclass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentIdentity {
    pub base_class: String,
    pub id: u64,
}

impl ContentIdentity {
    pub fn new<T: Into<String>>(base_class: T, id: u64) -> Self {
        Self {
            base_class: base_class.into(),
            id,
        }
    }

    /// Records that were never written carry id 0.
    pub fn is_saved(&self) -> bool {
        self.id != 0
    }
}

impl fmt::Display for ContentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.base_class, self.id)
    }
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(
    /// Identifier of a workflow definition.
    DefinitionId
);
record_id!(
    /// Identifier of a running or finished workflow instance.
    InstanceId
);
record_id!(
    /// Identifier of a transition between two workflow actions.
    TransitionId
);

/// An authenticated member acting on content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    pub email: String,
}

impl Member {
    pub fn new<T: Into<String>>(id: u64, email: T) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
