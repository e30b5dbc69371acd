//! Rule admission.
//!
//! Composes the resolver steps in the order the game loop runs them when a
//! gameplay event proposes a rule: safety analysis, detection, insertion,
//! resolution. The resolver functions remain usable on their own.

use crate::conflict::{detect_conflicts, resolve_conflict, ResolutionStrategy, RuleConflict};
use crate::rule::{Rule, RuleId};
use crate::safety::{validate_rule_safety, SafetyReport};
use crate::table::RuleTable;

/// Everything that happened while admitting a rule.
#[derive(Debug, Clone)]
pub struct AdmissionOutcome {
    /// Id of the proposed rule, now present in the table.
    pub rule_id: RuleId,
    /// The conflict the rule caused, if any.
    pub conflict: Option<RuleConflict>,
    /// Surviving rule for priority/newest resolution.
    pub winner: Option<RuleId>,
    /// Id of the fusion rule inserted by fusion resolution.
    pub fusion_rule: Option<RuleId>,
    /// Advisory safety analysis, computed before insertion.
    pub safety: SafetyReport,
    /// Conflict and cancellation notices, in emission order.
    pub notices: Vec<String>,
}

impl AdmissionOutcome {
    /// Returns true if the proposed rule is still active in `table`.
    #[must_use]
    pub fn is_rule_active(&self, table: &RuleTable) -> bool {
        table.get(self.rule_id).is_some_and(|r| r.active)
    }
}

fn deactivate_all_except(table: &mut RuleTable, conflict: &RuleConflict, keep: Option<RuleId>) {
    for id in conflict.rule_ids() {
        if Some(id) != keep {
            table.deactivate(id);
        }
    }
}

/// Result of settling a conflict against a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Surviving rule for priority/newest resolution.
    pub winner: Option<RuleId>,
    /// Id of the fusion rule inserted by fusion resolution.
    pub fusion_rule: Option<RuleId>,
    /// Conflict and cancellation notices, in emission order.
    pub notices: Vec<String>,
}

/// Resolves `conflict` and applies the outcome to `table`:
/// - priority / newest: the winner stays active, the other conflicting
///   rules are deactivated;
/// - fusion: every conflicting rule is deactivated and the synthesized rule
///   is inserted;
/// - cancel: every conflicting rule present in the table is deactivated.
///
/// Callers may override `conflict.resolution` before settling, which is the
/// only way to reach fusion since detection never selects it.
pub fn settle_conflict(table: &mut RuleTable, conflict: &RuleConflict) -> Settlement {
    let mut settlement = Settlement {
        notices: vec![conflict.notice()],
        ..Settlement::default()
    };

    match (conflict.resolution, resolve_conflict(conflict, table)) {
        (ResolutionStrategy::Priority | ResolutionStrategy::Newest, Some(winner)) => {
            deactivate_all_except(table, conflict, Some(winner.id));
            settlement.winner = Some(winner.id);
        }
        (ResolutionStrategy::Fusion, Some(fused)) => {
            deactivate_all_except(table, conflict, None);
            settlement.fusion_rule = Some(table.insert(fused));
        }
        (ResolutionStrategy::Cancel, _) => {
            settlement.notices.push(conflict.cancellation_notice());
        }
        _ => {}
    }

    settlement
}

/// Admits a proposed rule into `table`.
///
/// The rule is always inserted, then any conflict it causes is settled with
/// [`settle_conflict`]. Under cancel resolution the proposed rule is
/// deactivated along with the rules it contradicts.
pub fn admit_rule(table: &mut RuleTable, rule: Rule) -> AdmissionOutcome {
    let safety = validate_rule_safety(&rule, table.as_slice());
    let conflict = detect_conflicts(&rule, table.as_slice());
    let rule_id = table.insert(rule);

    let settlement = conflict
        .as_ref()
        .map(|c| settle_conflict(table, c))
        .unwrap_or_default();

    AdmissionOutcome {
        rule_id,
        conflict,
        winner: settlement.winner,
        fusion_rule: settlement.fusion_rule,
        safety,
        notices: settlement.notices,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use crate::rule::RuleSource;
    use crate::vocabulary::{Noun, Property};

    use super::*;

    #[test]
    fn admits_rule_without_conflict() {
        let mut table = RuleTable::new();
        let outcome = admit_rule(&mut table, Rule::new(Noun::I, Property::Lightning, RuleSource::Base));

        assert!(outcome.conflict.is_none());
        assert!(outcome.notices.is_empty());
        assert!(outcome.safety.safe);
        assert!(outcome.is_rule_active(&table));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn priority_winner_deactivates_loser() {
        let mut table = RuleTable::new();
        let base = admit_rule(&mut table, Rule::new(Noun::I, Property::Ghost, RuleSource::Base));
        let clear = admit_rule(&mut table, Rule::new(Noun::I, Property::Solid, RuleSource::LineClear));

        assert_eq!(clear.winner, Some(clear.rule_id));
        assert!(clear.is_rule_active(&table));
        assert!(!base.is_rule_active(&table));
        assert_eq!(table.active_properties(Noun::I), vec![&Property::Solid]);
        assert_eq!(clear.notices.len(), 1);
    }

    #[test]
    fn newest_can_reject_a_backdated_proposal() {
        let t0 = Utc::now();
        let mut table = RuleTable::new();
        let current = admit_rule(&mut table, Rule::new(Noun::T, Property::Red, RuleSource::Base).created_at(t0));
        let stale = admit_rule(
            &mut table,
            Rule::new(Noun::T, Property::Blue, RuleSource::Base).created_at(t0 - Duration::seconds(10)),
        );

        assert_eq!(stale.winner, Some(current.rule_id));
        assert!(current.is_rule_active(&table));
        assert!(!stale.is_rule_active(&table));
    }

    #[test]
    fn cancel_deactivates_proposal_too() {
        let mut table = RuleTable::new();
        let win = admit_rule(&mut table, Rule::new(Noun::Block, Property::Win, RuleSource::LineClear));
        let lose = admit_rule(&mut table, Rule::new(Noun::Block, Property::Lose, RuleSource::Base));

        assert_eq!(lose.conflict.as_ref().map(|c| c.resolution), Some(ResolutionStrategy::Cancel));
        assert!(!win.is_rule_active(&table));
        assert!(!lose.is_rule_active(&table));
        assert_eq!(table.len(), 2);
        assert_eq!(lose.notices.len(), 2);
        assert!(lose.notices[1].contains("WIN/LOSE"));
    }

    #[test]
    fn safety_is_reported_even_when_rule_commits() {
        let mut table = RuleTable::new();
        let outcome = admit_rule(&mut table, Rule::new(Noun::Block, Property::Lose, RuleSource::Base));

        assert!(!outcome.safety.safe);
        assert!(outcome.is_rule_active(&table));
    }

    #[test]
    fn settle_fusion_replaces_conflicting_rules() {
        let mut table = RuleTable::new();
        let solid = admit_rule(&mut table, Rule::new(Noun::L, Property::Solid, RuleSource::Base));
        let mut proposal = Rule::new(Noun::L, Property::Ghost, RuleSource::Base);
        proposal.created_at = Utc::now() + Duration::seconds(1);

        let mut conflict = detect_conflicts(&proposal, table.as_slice()).unwrap();
        assert_eq!(conflict.resolution, ResolutionStrategy::Newest);
        let ghost_id = table.insert(proposal);
        conflict.resolution = ResolutionStrategy::Fusion;

        let settlement = settle_conflict(&mut table, &conflict);
        let fused_id = settlement.fusion_rule.unwrap();
        assert!(!table.get(solid.rule_id).unwrap().active);
        assert!(!table.get(ghost_id).unwrap().active);

        let fused = table.get(fused_id).unwrap();
        assert!(fused.active);
        assert_eq!(fused.property.to_string(), "FUSION_GHOST_SOLID");
        assert_eq!(table.len(), 3);
    }
}
