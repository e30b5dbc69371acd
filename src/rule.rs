//! Rule types.
//!
//! A rule binds a property to a noun. Rules are never deleted once they
//! enter a table; resolution only flips `active`, so recency and
//! cancellation history stay available.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::vocabulary::{Noun, Property};

/// Priority given to rules synthesized by fusion resolution.
///
/// Sits above the ordinary fusion source priority so a synthesized rule
/// outranks the fusion rules it may have replaced.
pub const SYNTHESIZED_FUSION_PRIORITY: i32 = 350;

/// Unique identifier for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Uuid);

impl RuleId {
    /// Creates a new random rule ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSource {
    /// Selected by the player in the setup menu.
    Base,
    /// Generated by a line clear.
    LineClear,
    /// Synthesized by the resolver.
    Fusion,
}

impl RuleSource {
    /// Default priority for rules of this source.
    #[must_use]
    pub const fn default_priority(self) -> i32 {
        match self {
            Self::Base => 100,
            Self::LineClear => 200,
            Self::Fusion => 300,
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::LineClear => write!(f, "line-clear"),
            Self::Fusion => write!(f, "fusion"),
        }
    }
}

/// A single `NOUN IS PROPERTY` binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier for this rule.
    pub id: RuleId,

    /// Subject of the rule.
    pub noun: Noun,

    /// Behavior bound to the subject.
    pub property: Property,

    /// Inactive rules stay in the table but no longer affect gameplay.
    pub active: bool,

    /// When the rule was created; used for recency tie-breaks.
    pub created_at: DateTime<Utc>,

    /// Higher wins priority-based resolution.
    pub priority: i32,

    /// Provenance of the rule.
    pub source: RuleSource,

    /// Minimum gap between two triggers of this rule's effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown_ms: Option<u64>,

    /// When the rule's effect last fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered: Option<DateTime<Utc>>,
}

impl Rule {
    /// Creates an active rule with the source's default priority.
    #[must_use]
    pub fn new(noun: Noun, property: Property, source: RuleSource) -> Self {
        Self {
            id: RuleId::new(),
            noun,
            property,
            active: true,
            created_at: Utc::now(),
            priority: source.default_priority(),
            source,
            cooldown_ms: None,
            last_triggered: None,
        }
    }

    /// Overrides the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Gates the rule's effect behind a cooldown.
    #[must_use]
    pub fn with_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = Some(cooldown_ms);
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Returns true if the rule's effect may fire at `now`.
    #[must_use]
    pub fn ready_to_trigger(&self, now: DateTime<Utc>) -> bool {
        let (Some(cooldown), Some(last)) = (self.cooldown_ms, self.last_triggered) else {
            return true;
        };
        let cooldown = Duration::milliseconds(i64::try_from(cooldown).unwrap_or(i64::MAX));
        now - last >= cooldown
    }

    /// Records that the rule's effect fired at `now`.
    pub fn mark_triggered(&mut self, now: DateTime<Utc>) {
        self.last_triggered = Some(now);
    }

    /// The statement form, e.g. `I IS LIGHTNING`.
    #[must_use]
    pub fn statement(&self) -> String {
        format!("{} IS {}", self.noun, self.property)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rule {}

impl std::hash::Hash for Rule {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
