// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_spring`.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_spring::{Spring, SpringConfig};

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring/settle");

    // Frame rate changes the number of ticks, not the per-tick cost.
    for hz in [60_u32, 120, 240] {
        let dt = 1.0 / f64::from(hz);
        group.bench_with_input(BenchmarkId::from_parameter(hz), &dt, |b, &dt| {
            b.iter(|| {
                let mut spring = Spring::new(SpringConfig::default(), 100.0).with_bounds(10.0..=100.0);
                spring.set_target(black_box(10.0));
                let mut ticks = 0_u32;
                while !spring.is_settled() {
                    spring.tick(dt);
                    ticks += 1;
                }
                black_box(ticks)
            });
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("spring/tick", |b| {
        let mut spring = Spring::new(SpringConfig::default(), 100.0);
        let mut flip = false;
        b.iter(|| {
            if spring.is_settled() {
                flip = !flip;
                spring.set_target(if flip { 10.0 } else { 100.0 });
            }
            black_box(spring.tick(black_box(1.0 / 60.0)))
        });
    });
}

criterion_group!(benches, bench_settle, bench_tick);
criterion_main!(benches);
