//! Conflict resolution.
//!
//! Applying a strategy either picks a surviving rule, synthesizes a fusion
//! rule for the caller to insert, or deactivates the conflicting rules in
//! the caller's table. Nothing is ever removed from the table.

use crate::rule::{Rule, RuleSource, SYNTHESIZED_FUSION_PRIORITY};
use crate::table::RuleTable;
use crate::vocabulary::{Noun, Property};

use super::types::{ResolutionStrategy, RuleConflict};

/// Rule with the highest priority.
///
/// Ties go to the newer `created_at`, then to the later position in the
/// list, so the proposed rule (always last) wins a full tie.
fn highest_priority(rules: &[Rule]) -> Option<&Rule> {
    let (first, rest) = rules.split_first()?;
    let mut best = first;
    for r in rest {
        if r.priority > best.priority
            || (r.priority == best.priority && r.created_at >= best.created_at)
        {
            best = r;
        }
    }
    Some(best)
}

/// Rule with the newest `created_at`; ties go to the later position.
fn newest(rules: &[Rule]) -> Option<&Rule> {
    let (first, rest) = rules.split_first()?;
    let mut best = first;
    for r in rest {
        if r.created_at >= best.created_at {
            best = r;
        }
    }
    Some(best)
}

/// Synthesizes a composite rule binding every conflicting property to `noun`.
///
/// The property name is `FUSION_` followed by the sorted component names, so
/// the result does not depend on the order of `properties`. Fusion inputs
/// are expanded into their simple components. Returns `None` when there is
/// nothing to fuse.
#[must_use]
pub fn create_fusion_rule(noun: Noun, properties: &[Property]) -> Option<Rule> {
    let Some(fused) = Property::fusion(properties.to_vec()) else {
        tracing::warn!(noun = %noun, "fusion requested with no properties");
        return None;
    };
    let rule = Rule::new(noun, fused, RuleSource::Fusion).with_priority(SYNTHESIZED_FUSION_PRIORITY);

    tracing::info!(rule = %rule.statement(), id = %rule.id, "fusion rule synthesized");
    Some(rule)
}

/// Applies the conflict's strategy.
///
/// - `Priority` / `Newest`: returns a copy of the surviving rule. Flags are
///   not touched; deactivating the losers is up to the caller.
/// - `Fusion`: returns a fresh fusion rule the caller must insert, or
///   `None` if the conflict lists no properties.
/// - `Cancel`: deactivates every conflicting rule present in `table` and
///   returns `None`. Rules missing from the table are skipped.
/// - `Unrecognized`: no-op, returns `None`.
pub fn resolve_conflict(conflict: &RuleConflict, table: &mut RuleTable) -> Option<Rule> {
    match conflict.resolution {
        ResolutionStrategy::Priority => highest_priority(&conflict.conflicting_rules).cloned(),
        ResolutionStrategy::Newest => newest(&conflict.conflicting_rules).cloned(),
        ResolutionStrategy::Fusion => create_fusion_rule(conflict.noun, &conflict.properties),
        ResolutionStrategy::Cancel => {
            let mut cancelled = 0usize;
            for id in conflict.rule_ids() {
                if table.deactivate(id) {
                    cancelled += 1;
                }
            }
            tracing::info!(
                noun = %conflict.noun,
                cancelled,
                notice = %conflict.cancellation_notice(),
                "conflicting rules cancelled"
            );
            None
        }
        ResolutionStrategy::Unrecognized => {
            tracing::warn!(noun = %conflict.noun, "unrecognized resolution strategy; ignoring conflict");
            None
        }
    }
}
