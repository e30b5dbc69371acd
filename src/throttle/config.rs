//! Throttle configuration.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{RuleResult, ValidationError};
use crate::vocabulary::Property;

/// Length of a throttle window unless configured otherwise.
pub const DEFAULT_WINDOW_MS: u64 = 1000;

/// Compiled-in per-second limit for an effect category.
///
/// `None` means the effect is never throttled.
#[must_use]
pub const fn default_limit(effect: &Property) -> Option<u32> {
    match effect {
        Property::Bomb => Some(5),
        Property::Multiply => Some(3),
        Property::Spawn => Some(2),
        Property::Teleport => Some(10),
        Property::Lightning => Some(8),
        Property::Transform => Some(4),
        Property::Solid
        | Property::Ghost
        | Property::Win
        | Property::Lose
        | Property::Freeze
        | Property::Fast
        | Property::Slow
        | Property::Melt
        | Property::Shield
        | Property::Heal
        | Property::Magnet
        | Property::Float
        | Property::Sink
        | Property::Red
        | Property::Blue
        | Property::Green
        | Property::Yellow
        | Property::Purple
        | Property::Orange
        | Property::Cyan
        | Property::Fusion(_) => None,
    }
}

/// Per-category effect limits.
///
/// Missing fields fall back to the compiled-in defaults. A `limits` map is
/// merged over the default table: listed effects are overridden or added,
/// unlisted ones keep their compiled-in limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Window length in milliseconds.
    pub window_ms: u64,
    /// Maximum occurrences per window, keyed by effect.
    #[serde(deserialize_with = "merge_default_limits")]
    pub limits: HashMap<Property, u32>,
}

fn merge_default_limits<'de, D>(deserializer: D) -> Result<HashMap<Property, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = HashMap::<Property, u32>::deserialize(deserializer)?;
    let mut limits = ThrottleConfig::default().limits;
    limits.extend(overrides);
    Ok(limits)
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        let limits = Property::SIMPLE
            .into_iter()
            .filter_map(|p| default_limit(&p).map(|limit| (p, limit)))
            .collect();
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            limits,
        }
    }
}

impl ThrottleConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window_ms == 0 {
            return Err(ValidationError::InvalidThrottleConfig {
                reason: "window_ms must be > 0".to_string(),
            });
        }
        if let Some((effect, _)) = self.limits.iter().find(|(_, limit)| **limit == 0) {
            return Err(ValidationError::InvalidThrottleConfig {
                reason: format!("limit for {effect} must be > 0"),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> RuleResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> RuleResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Limit for an effect, or `None` if it is never throttled.
    #[must_use]
    pub fn limit_for(&self, effect: &Property) -> Option<u32> {
        self.limits.get(effect).copied()
    }

    /// Window length as a `Duration`.
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}
