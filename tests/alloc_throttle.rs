use std::alloc::System;
use std::time::{Duration, Instant};

use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};

use isyou_rules::{should_throttle_at, Property, ThrottleTable};

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[test]
fn throttle_check_steady_state_allocation_budget() {
    let mut table = ThrottleTable::new();
    let t0 = Instant::now();

    // Warm up: create the entries before measuring.
    for effect in [Property::Bomb, Property::Lightning, Property::Solid] {
        should_throttle_at(&effect, &mut table, t0);
    }

    let region = Region::new(GLOBAL);
    for i in 0..10_000u64 {
        let now = t0 + Duration::from_millis(i);
        should_throttle_at(&Property::Bomb, &mut table, now);
        should_throttle_at(&Property::Lightning, &mut table, now);
        should_throttle_at(&Property::Solid, &mut table, now);
    }
    let stats = region.change();

    // The hot path must not allocate per call; the slack only absorbs
    // incidental allocations from the test harness.
    assert!(
        stats.allocations <= 16,
        "throttle check allocated per call: {stats:?}"
    );
}
