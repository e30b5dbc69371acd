//! Conflict value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule::{Rule, RuleId};
use crate::vocabulary::{Noun, Property};

/// How a detected conflict should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Keep the highest-priority rule.
    Priority,
    /// Keep the most recently created rule.
    Newest,
    /// Replace the conflicting rules with one synthesized composite rule.
    Fusion,
    /// Deactivate every conflicting rule.
    Cancel,
    /// Any strategy name this version does not know. Resolving it is a no-op.
    #[serde(other)]
    Unrecognized,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priority => write!(f, "priority"),
            Self::Newest => write!(f, "newest"),
            Self::Fusion => write!(f, "fusion"),
            Self::Cancel => write!(f, "cancel"),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// One detected contradiction between a proposed rule and the live rules.
///
/// Produced and consumed within a single evaluation; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConflict {
    /// The noun all conflicting rules bind.
    pub noun: Noun,

    /// Properties involved, matched rules first and the proposed rule last.
    pub properties: Vec<Property>,

    /// Rules in conflict, in the same order as `properties`.
    pub conflicting_rules: Vec<Rule>,

    /// Strategy chosen for this conflict.
    pub resolution: ResolutionStrategy,
}

impl RuleConflict {
    /// Ids of every rule in the conflict.
    pub fn rule_ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.conflicting_rules.iter().map(|r| r.id)
    }

    /// Properties joined with `/`, e.g. `SOLID/GHOST`.
    #[must_use]
    pub fn property_list(&self) -> String {
        self.properties
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Human-readable description of the conflict.
    #[must_use]
    pub fn notice(&self) -> String {
        format!(
            "Rule conflict on {}: {} (resolved by {})",
            self.noun,
            self.property_list(),
            self.resolution
        )
    }

    /// Human-readable notice shown when the conflict cancels its rules.
    #[must_use]
    pub fn cancellation_notice(&self) -> String {
        format!(
            "Rules cancelled: {} IS {} cannot coexist",
            self.noun,
            self.property_list()
        )
    }
}
