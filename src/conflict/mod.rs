//! Conflict resolver.
//!
//! Detects contradictory rules on the same noun, picks a resolution strategy
//! and applies it to the caller's rule table.

mod detector;
mod resolver;
mod types;

pub use detector::{detect_conflicts, properties_conflict, select_strategy};
pub use resolver::{create_fusion_rule, resolve_conflict};
pub use types::{ResolutionStrategy, RuleConflict};
