//! Pre-commit safety analysis.
//!
//! Advisory only: a rule with warnings is still committed. The warnings let
//! the game tell the player that a combination is about to get out of hand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule::Rule;
use crate::vocabulary::{Noun, Property};

/// Property pairs whose combination grows the board without bound.
const DANGEROUS_PAIRS: [(Property, Property); 3] = [
    (Property::Multiply, Property::Bomb),
    (Property::Spawn, Property::Multiply),
    (Property::Transform, Property::Multiply),
];

/// A risk found by [`validate_rule_safety`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "risk", rename_all = "snake_case")]
pub enum SafetyWarning {
    /// MULTIPLY on a noun that already spawns, transforms or teleports.
    InfiniteLoop {
        /// Noun receiving MULTIPLY.
        noun: Noun,
        /// The active SPAWN, TRANSFORM or TELEPORT property on that noun.
        existing: Property,
    },

    /// One of the dangerous property pairs would be active at once.
    ExponentialGrowth {
        /// First property of the pair, in table order.
        first: Property,
        /// Second property of the pair, in table order.
        second: Property,
    },

    /// BLOCK IS LOSE with nothing able to win.
    UnwinnableState,
}

impl fmt::Display for SafetyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InfiniteLoop { noun, existing } => write!(
                f,
                "Infinite loop risk: {noun} IS MULTIPLY combined with {noun} IS {existing}"
            ),
            Self::ExponentialGrowth { first, second } => write!(
                f,
                "Exponential growth risk: {first} and {second} are both active"
            ),
            Self::UnwinnableState => {
                write!(f, "Unwinnable state risk: BLOCK IS LOSE with no WIN rule active")
            }
        }
    }
}

/// Result of [`validate_rule_safety`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    /// True iff no warning fired.
    pub safe: bool,
    /// Warnings in check order: loop, growth, unwinnable.
    pub warnings: Vec<SafetyWarning>,
}

impl SafetyReport {
    fn from_warnings(warnings: Vec<SafetyWarning>) -> Self {
        Self {
            safe: warnings.is_empty(),
            warnings,
        }
    }

    /// Warnings rendered for display.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Checks a proposed rule for dangerous interactions with the active rules.
///
/// Never blocks the rule; returns zero or more warnings.
#[must_use]
pub fn validate_rule_safety(new_rule: &Rule, existing_rules: &[Rule]) -> SafetyReport {
    let mut warnings = Vec::new();
    let active = || existing_rules.iter().filter(|r| r.active);

    if new_rule.property == Property::Multiply {
        let looping = active().find(|r| {
            r.noun == new_rule.noun
                && matches!(r.property, Property::Spawn | Property::Transform | Property::Teleport)
        });
        if let Some(r) = looping {
            warnings.push(SafetyWarning::InfiniteLoop {
                noun: new_rule.noun,
                existing: r.property.clone(),
            });
        }
    }

    for (a, b) in &DANGEROUS_PAIRS {
        let partner = if new_rule.property == *a {
            b
        } else if new_rule.property == *b {
            a
        } else {
            continue;
        };
        if active().any(|r| r.property == *partner) {
            warnings.push(SafetyWarning::ExponentialGrowth {
                first: a.clone(),
                second: b.clone(),
            });
        }
    }

    if new_rule.noun == Noun::Block
        && new_rule.property == Property::Lose
        && !active().any(|r| r.property == Property::Win)
    {
        warnings.push(SafetyWarning::UnwinnableState);
    }

    for w in &warnings {
        tracing::warn!(rule = %new_rule.statement(), warning = %w, "unsafe rule combination");
    }

    SafetyReport::from_warnings(warnings)
}

#[cfg(test)]
mod tests {
    use crate::rule::RuleSource;

    use super::*;

    fn rule(noun: Noun, property: Property) -> Rule {
        Rule::new(noun, property, RuleSource::LineClear)
    }

    #[test]
    fn empty_existing_set_is_safe() {
        for p in Property::SIMPLE {
            let report = validate_rule_safety(&rule(Noun::I, p), &[]);
            assert!(report.safe);
            assert!(report.warnings.is_empty());
        }
    }

    #[test]
    fn block_lose_without_win_fires_on_empty_set() {
        let report = validate_rule_safety(&rule(Noun::Block, Property::Lose), &[]);
        assert!(!report.safe);
        assert_eq!(report.warnings, vec![SafetyWarning::UnwinnableState]);
    }

    #[test]
    fn block_lose_with_win_is_safe() {
        let existing = vec![rule(Noun::T, Property::Win)];
        let report = validate_rule_safety(&rule(Noun::Block, Property::Lose), &existing);
        assert!(report.safe);
    }

    #[test]
    fn block_lose_with_inactive_win_is_unsafe() {
        let mut win = rule(Noun::T, Property::Win);
        win.active = false;
        let report = validate_rule_safety(&rule(Noun::Block, Property::Lose), &[win]);
        assert_eq!(report.warnings, vec![SafetyWarning::UnwinnableState]);
    }

    #[test]
    fn lose_on_other_noun_is_not_checked() {
        let report = validate_rule_safety(&rule(Noun::I, Property::Lose), &[]);
        assert!(report.safe);
    }

    #[test]
    fn multiply_after_spawn_on_same_noun_warns_twice() {
        let existing = vec![rule(Noun::O, Property::Spawn)];
        let report = validate_rule_safety(&rule(Noun::O, Property::Multiply), &existing);

        assert!(!report.safe);
        assert_eq!(
            report.warnings,
            vec![
                SafetyWarning::InfiniteLoop {
                    noun: Noun::O,
                    existing: Property::Spawn,
                },
                SafetyWarning::ExponentialGrowth {
                    first: Property::Spawn,
                    second: Property::Multiply,
                },
            ]
        );
    }

    #[test]
    fn multiply_after_teleport_warns_only_about_the_loop() {
        let existing = vec![rule(Noun::O, Property::Teleport)];
        let report = validate_rule_safety(&rule(Noun::O, Property::Multiply), &existing);

        assert!(!report.safe);
        assert_eq!(
            report.warnings,
            vec![SafetyWarning::InfiniteLoop {
                noun: Noun::O,
                existing: Property::Teleport,
            }]
        );
    }

    #[test]
    fn infinite_loop_requires_same_noun() {
        let existing = vec![rule(Noun::O, Property::Teleport)];
        let report = validate_rule_safety(&rule(Noun::I, Property::Multiply), &existing);
        assert!(report.safe);
    }

    #[test]
    fn growth_pairs_checked_in_both_orders() {
        let existing = vec![rule(Noun::S, Property::Multiply)];
        let report = validate_rule_safety(&rule(Noun::Z, Property::Bomb), &existing);
        assert_eq!(
            report.warnings,
            vec![SafetyWarning::ExponentialGrowth {
                first: Property::Multiply,
                second: Property::Bomb,
            }]
        );

        let existing = vec![rule(Noun::S, Property::Bomb)];
        let report = validate_rule_safety(&rule(Noun::Z, Property::Multiply), &existing);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn messages_are_readable() {
        let report = validate_rule_safety(&rule(Noun::Block, Property::Lose), &[]);
        let messages = report.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("BLOCK IS LOSE"));
    }
}
