//! Effect throttle manager.
//!
//! Windows are evaluated lazily on the next call; nothing runs on a timer.
//! The throttle table is owned by the game loop and only borrowed here.

use std::collections::HashMap;
use std::time::Instant;

use crate::vocabulary::Property;

use super::config::ThrottleConfig;

/// Counter for one effect category within the current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectThrottle {
    /// Effect category this counter tracks.
    pub effect: Property,
    /// Limit captured when the current window opened.
    pub max_per_second: u32,
    /// Occurrences allowed in the current window.
    pub current_count: u32,
    /// When the current window opened.
    pub window_start: Instant,
}

/// Caller-owned table of per-category counters.
#[derive(Debug, Clone, Default)]
pub struct ThrottleTable {
    config: ThrottleConfig,
    entries: HashMap<Property, EffectThrottle>,
}

impl ThrottleTable {
    /// Creates an empty table using the compiled-in limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table using custom limits.
    #[must_use]
    pub fn with_config(config: ThrottleConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Limits and window length in use.
    #[must_use]
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Counter for `effect`, if a window is open.
    #[must_use]
    pub fn get(&self, effect: &Property) -> Option<&EffectThrottle> {
        self.entries.get(effect)
    }

    /// Number of open windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no window is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over open counters in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &EffectThrottle> {
        self.entries.values()
    }
}

/// Decides whether the next occurrence of `effect` should be suppressed.
///
/// Reads the monotonic clock; see [`should_throttle_at`].
pub fn should_throttle(effect: &Property, table: &mut ThrottleTable) -> bool {
    should_throttle_at(effect, table, Instant::now())
}

/// Decides whether an occurrence of `effect` at `now` should be suppressed.
///
/// - Effects without a limit are never throttled and leave the table alone.
/// - The first occurrence, or the first after the window elapsed, opens a new
///   window with a count of one.
/// - Within a window, occurrences are allowed until the count reaches the
///   limit; further ones are denied without incrementing.
pub fn should_throttle_at(effect: &Property, table: &mut ThrottleTable, now: Instant) -> bool {
    let Some(max_per_second) = table.config.limit_for(effect) else {
        return false;
    };
    let window = table.config.window();

    if let Some(entry) = table.entries.get_mut(effect) {
        if now.saturating_duration_since(entry.window_start) >= window {
            entry.current_count = 1;
            entry.window_start = now;
            entry.max_per_second = max_per_second;
            return false;
        }
        if entry.current_count >= entry.max_per_second {
            tracing::debug!(
                effect = %effect,
                limit = entry.max_per_second,
                "effect throttled"
            );
            return true;
        }
        entry.current_count += 1;
        return false;
    }

    table.entries.insert(
        effect.clone(),
        EffectThrottle {
            effect: effect.clone(),
            max_per_second,
            current_count: 1,
            window_start: now,
        },
    );
    false
}

/// Same as [`should_throttle_at`] for a raw category name.
///
/// The name is trimmed and matched case-insensitively, like every vocabulary
/// token, so `"bomb"` and `" Bomb "` share the BOMB window. Names outside the
/// vocabulary have no limit: never throttled, table untouched.
pub fn should_throttle_named(effect_name: &str, table: &mut ThrottleTable, now: Instant) -> bool {
    match effect_name.parse::<Property>() {
        Ok(effect) => should_throttle_at(&effect, table, now),
        Err(_) => false,
    }
}

/// Removes every entry whose window has fully elapsed.
///
/// Returns the number of entries removed.
pub fn sweep_expired(table: &mut ThrottleTable) -> usize {
    sweep_expired_at(table, Instant::now())
}

/// Removes every entry whose window has fully elapsed at `now`.
pub fn sweep_expired_at(table: &mut ThrottleTable, now: Instant) -> usize {
    let window = table.config.window();
    let before = table.entries.len();
    table
        .entries
        .retain(|_, entry| now.saturating_duration_since(entry.window_start) < window);
    let removed = before - table.entries.len();
    if removed > 0 {
        tracing::debug!(removed, remaining = table.entries.len(), "swept expired throttle windows");
    }
    removed
}
