//! Abilities domain: identities and trigger policies.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Priority index identifying an ability on its body. Built-ins use negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct AbilityId(pub i32);

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What starts an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum StartPolicy {
    /// Active as soon as the body is initialized.
    Automatic,
    /// Only through an explicit enable request.
    #[default]
    Manual,
    /// When the key is pressed this frame.
    KeyDown(KeyCode),
}

/// What ends an ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum EndPolicy {
    /// When the ability reports it is done.
    Automatic,
    /// Only through an explicit disable request.
    #[default]
    Manual,
    /// When the key is released.
    KeyUp(KeyCode),
}

/// Whether enabling an ability takes over the exclusive slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Exclusivity {
    #[default]
    Exclusive,
    /// Runs alongside the current exclusive ability without replacing it.
    Concurrent,
}

/// Declarative veto over other abilities' transitions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum BlockRule {
    #[default]
    None,
    All,
    /// Block only the abilities with these names.
    Only(Vec<String>),
}

impl BlockRule {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            BlockRule::None => false,
            BlockRule::All => true,
            BlockRule::Only(names) => names.iter().any(|n| n == name),
        }
    }

    /// Names this rule refers to, for validation.
    pub fn named(&self) -> &[String] {
        match self {
            BlockRule::Only(names) => names,
            _ => &[],
        }
    }
}
