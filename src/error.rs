//! Error types for the rule engine.
//!
//! Conflicts, safety warnings and throttle denials are ordinary return
//! values, never errors. The only fallible paths are turning raw keywords
//! into vocabulary tokens and loading throttle configuration.

use thiserror::Error;

/// Validation errors raised while parsing tokens or configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Word is not one of the seven piece letters or BLOCK.
    #[error("Unknown noun '{word}'")]
    UnknownNoun {
        /// The normalized word.
        word: String,
    },

    /// Word is neither a simple property nor a well-formed fusion name.
    #[error("Unknown property '{word}'")]
    UnknownProperty {
        /// The normalized word.
        word: String,
    },

    /// Token was empty after trimming.
    #[error("Token cannot be empty")]
    EmptyToken,

    /// Throttle configuration failed validation.
    #[error("Invalid throttle configuration: {reason}")]
    InvalidThrottleConfig {
        /// What was wrong.
        reason: String,
    },
}

/// Top-level error type for the rule engine.
#[derive(Debug, Error)]
pub enum RuleEngineError {
    /// A token or configuration value was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration could not be read or decoded.
    #[error("Configuration error: {message}")]
    Config {
        /// Underlying cause.
        message: String,
    },

}

impl RuleEngineError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<serde_json::Error> for RuleEngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(format!("invalid JSON: {err}"))
    }
}

impl From<std::io::Error> for RuleEngineError {
    fn from(err: std::io::Error) -> Self {
        Self::config(format!("I/O failure: {err}"))
    }
}

/// Result type alias for rule engine operations.
pub type RuleResult<T> = Result<T, RuleEngineError>;
