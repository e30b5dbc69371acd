use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use isyou_rules::{
    detect_conflicts, should_throttle_at, validate_rule_safety, Noun, Property, Rule, RuleSource,
    RuleTable, ThrottleTable,
};

fn make_table() -> RuleTable {
    // 256 rules spread over every noun so detection scans realistic history.
    (0..256usize)
        .map(|i| {
            let noun = Noun::ALL[i % Noun::ALL.len()];
            let property = Property::SIMPLE[i % Property::SIMPLE.len()].clone();
            let mut rule = Rule::new(noun, property, RuleSource::LineClear);
            rule.active = i % 3 != 0;
            rule
        })
        .collect()
}

fn bench_detect_conflicts(c: &mut Criterion) {
    let table = make_table();
    let proposal = Rule::new(Noun::I, Property::Solid, RuleSource::LineClear);

    let mut group = c.benchmark_group("rules");
    group.throughput(Throughput::Elements(table.len() as u64));
    group.bench_function("detect_conflicts", |b| {
        b.iter(|| detect_conflicts(black_box(&proposal), black_box(table.as_slice())));
    });
    group.bench_function("validate_rule_safety", |b| {
        let multiply = Rule::new(Noun::O, Property::Multiply, RuleSource::LineClear);
        b.iter(|| validate_rule_safety(black_box(&multiply), black_box(table.as_slice())));
    });
    group.finish();
}

fn bench_should_throttle(c: &mut Criterion) {
    c.bench_function("throttle/should_throttle", |b| {
        b.iter_custom(|iters| {
            // Fresh table per sample so window state does not leak between samples.
            let mut table = ThrottleTable::new();
            let t0 = Instant::now();

            let start = Instant::now();
            for i in 0..iters {
                let now = t0 + Duration::from_micros(i);
                black_box(should_throttle_at(&Property::Lightning, &mut table, now));
            }
            start.elapsed()
        });
    });
}

criterion_group!(benches, bench_detect_conflicts, bench_should_throttle);
criterion_main!(benches);
