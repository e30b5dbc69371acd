//! Conflict detection and strategy selection.
//!
//! The conflict table is closed-world: two properties contradict only if the
//! table says so, however opposed they may sound.

use crate::rule::{Rule, RuleSource};
use crate::vocabulary::Property;

use super::types::{ResolutionStrategy, RuleConflict};

/// Returns true if the two properties may not be bound to the same noun.
///
/// Symmetric. Identical properties never conflict, and neither do fusion
/// properties.
#[must_use]
pub fn properties_conflict(a: &Property, b: &Property) -> bool {
    use Property::{Bomb, Fast, Freeze, Ghost, Heal, Lose, Melt, Shield, Solid, Win};

    if a == b {
        return false;
    }
    if a.is_color() && b.is_color() {
        return true;
    }

    matches!(
        (a, b),
        (Solid, Ghost)
            | (Ghost, Solid)
            | (Win, Lose)
            | (Lose, Win)
            | (Freeze, Fast)
            | (Fast, Freeze)
            | (Melt, Shield)
            | (Shield, Melt)
            | (Bomb, Heal)
            | (Heal, Bomb)
    )
}

/// Picks the resolution strategy for a proposed rule and the active rules it
/// contradicts. The first matching case wins:
///
/// 1. the proposed rule outranks every match → `Priority`
/// 2. two or more matches were synthesized by fusion → `Cancel`
/// 3. WIN and LOSE would both land on the noun → `Cancel`
/// 4. otherwise → `Newest`
#[must_use]
pub fn select_strategy(new_rule: &Rule, matched: &[&Rule]) -> ResolutionStrategy {
    let outranks = matched
        .iter()
        .map(|r| r.priority)
        .max()
        .map_or(true, |max| new_rule.priority > max);
    if outranks {
        return ResolutionStrategy::Priority;
    }

    let fusion_count = matched
        .iter()
        .filter(|r| r.source == RuleSource::Fusion)
        .count();
    if fusion_count >= 2 {
        return ResolutionStrategy::Cancel;
    }

    let combined = || std::iter::once(&new_rule.property).chain(matched.iter().map(|r| &r.property));
    let has_win = combined().any(|p| *p == Property::Win);
    let has_lose = combined().any(|p| *p == Property::Lose);
    if has_win && has_lose {
        return ResolutionStrategy::Cancel;
    }

    ResolutionStrategy::Newest
}

/// Finds the active rules on the same noun whose property contradicts the
/// proposed rule's.
///
/// Returns `None` when nothing contradicts. Inactive rules and rules on other
/// nouns are ignored.
#[must_use]
pub fn detect_conflicts(new_rule: &Rule, existing_rules: &[Rule]) -> Option<RuleConflict> {
    let matched: Vec<&Rule> = existing_rules
        .iter()
        .filter(|r| {
            r.active
                && r.noun == new_rule.noun
                && r.property != new_rule.property
                && properties_conflict(&new_rule.property, &r.property)
        })
        .collect();

    if matched.is_empty() {
        return None;
    }

    let resolution = select_strategy(new_rule, &matched);

    let mut conflicting_rules: Vec<Rule> = matched.into_iter().cloned().collect();
    conflicting_rules.push(new_rule.clone());
    let properties = conflicting_rules.iter().map(|r| r.property.clone()).collect();

    tracing::debug!(
        noun = %new_rule.noun,
        property = %new_rule.property,
        matched = conflicting_rules.len() - 1,
        strategy = %resolution,
        "rule conflict detected"
    );

    Some(RuleConflict {
        noun: new_rule.noun,
        properties,
        conflicting_rules,
        resolution,
    })
}
