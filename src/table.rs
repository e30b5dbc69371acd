//! Caller-owned rule collection.
//!
//! The game state owns the table for its whole lifetime; engine functions
//! borrow it for a single call. Entries are kept in insertion order and are
//! never removed.

use crate::rule::{Rule, RuleId};
use crate::vocabulary::{Noun, Property};

/// Insertion-ordered rule collection.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule and returns its id.
    pub fn insert(&mut self, rule: Rule) -> RuleId {
        let id = rule.id;
        self.rules.push(rule);
        id
    }

    /// Looks up a rule by id, active or not.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: RuleId) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.id == id)
    }

    /// Sets `active = false` on the rule. Returns false if the id is unknown.
    pub fn deactivate(&mut self, id: RuleId) -> bool {
        match self.get_mut(id) {
            Some(rule) => {
                rule.active = false;
                true
            }
            None => false,
        }
    }

    /// Number of rules ever inserted, including inactive ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule was ever inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// All rules in insertion order, as passed to detection and safety checks.
    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules currently affecting gameplay.
    pub fn active_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.active)
    }

    /// Properties currently bound to `noun` by active rules.
    #[must_use]
    pub fn active_properties(&self, noun: Noun) -> Vec<&Property> {
        self.active_rules()
            .filter(|r| r.noun == noun)
            .map(|r| &r.property)
            .collect()
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleSource;

    #[test]
    fn test_insert_and_get() {
        let mut table = RuleTable::new();
        let id = table.insert(Rule::new(Noun::I, Property::Solid, RuleSource::Base));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(id).map(|r| r.noun), Some(Noun::I));
        assert!(table.get(RuleId::new()).is_none());
    }

    #[test]
    fn test_deactivate_keeps_entry() {
        let mut table = RuleTable::new();
        let id = table.insert(Rule::new(Noun::I, Property::Solid, RuleSource::Base));

        assert!(table.deactivate(id));
        assert_eq!(table.len(), 1);
        assert_eq!(table.active_rules().count(), 0);
        assert!(!table.deactivate(RuleId::new()));
    }

    #[test]
    fn test_active_properties_filters_noun_and_state() {
        let mut table = RuleTable::new();
        table.insert(Rule::new(Noun::I, Property::Solid, RuleSource::Base));
        table.insert(Rule::new(Noun::I, Property::Red, RuleSource::Base));
        table.insert(Rule::new(Noun::O, Property::Ghost, RuleSource::Base));
        let off = table.insert(Rule::new(Noun::I, Property::Bomb, RuleSource::Base));
        table.deactivate(off);

        let props = table.active_properties(Noun::I);
        assert_eq!(props, vec![&Property::Solid, &Property::Red]);
    }
}
