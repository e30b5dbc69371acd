//! Effect throttling.
//!
//! Bounds how often each effect category may fire within a sliding window so
//! rule-triggered visuals and audio never saturate the runtime.

mod config;
mod manager;

pub use config::{default_limit, ThrottleConfig, DEFAULT_WINDOW_MS};
pub use manager::{
    should_throttle, should_throttle_at, should_throttle_named, sweep_expired, sweep_expired_at,
    EffectThrottle, ThrottleTable,
};
