//! # isyou-rules - rule engine for a NOUN IS PROPERTY puzzle
//!
//! Players rebind piece behavior by composing statements such as
//! `I IS LIGHTNING`. This crate decides what happens when statements
//! contradict each other, warns about dangerous combinations before they
//! are applied, and rate-limits the effects rules trigger.
//!
//! ## Core Concepts
//!
//! - **Rule**: a `NOUN IS PROPERTY` binding with priority and provenance
//! - **RuleConflict**: a detected contradiction plus its resolution strategy
//! - **SafetyReport**: advisory warnings about a proposed rule
//! - **ThrottleTable**: per-effect sliding-window counters
//!
//! All state is owned by the caller. Engine functions borrow the rule table
//! or throttle table for a single call and keep nothing afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use isyou_rules::{admit_rule, should_throttle, Noun, Property, Rule, RuleSource, RuleTable, ThrottleTable};
//!
//! let mut rules = RuleTable::new();
//! admit_rule(&mut rules, Rule::new(Noun::I, Property::Ghost, RuleSource::Base));
//! let outcome = admit_rule(&mut rules, Rule::new(Noun::I, Property::Solid, RuleSource::LineClear));
//! assert_eq!(outcome.winner, Some(outcome.rule_id));
//!
//! let mut throttles = ThrottleTable::new();
//! assert!(!should_throttle(&Property::Bomb, &mut throttles));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod admission;
pub mod conflict;
pub mod error;
pub mod rule;
pub mod safety;
pub mod table;
pub mod throttle;
pub mod vocabulary;

// Re-export primary types at crate root for convenience
pub use admission::{admit_rule, settle_conflict, AdmissionOutcome, Settlement};
pub use conflict::{
    create_fusion_rule, detect_conflicts, properties_conflict, resolve_conflict, select_strategy,
    ResolutionStrategy, RuleConflict,
};
pub use error::{RuleEngineError, RuleResult, ValidationError};
pub use rule::{Rule, RuleId, RuleSource, SYNTHESIZED_FUSION_PRIORITY};
pub use safety::{validate_rule_safety, SafetyReport, SafetyWarning};
pub use table::RuleTable;
pub use throttle::{
    should_throttle, should_throttle_at, should_throttle_named, sweep_expired, sweep_expired_at,
    EffectThrottle, ThrottleConfig, ThrottleTable,
};
pub use vocabulary::{FusionProperty, Noun, Property};
