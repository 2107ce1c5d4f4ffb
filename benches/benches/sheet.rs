// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_sheet`: snap resolution and a full drag cycle.

use std::time::Duration;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_sheet::{
    NoopHost, SheetConfig, SheetController, SnapEntry, SnapPoint, SnapPoints,
};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap/resolve");

    // Inline storage covers up to four points; larger sets spill to the heap.
    for len in [3_u32, 4, 16, 64] {
        let points = SnapPoints::new(
            (0..len).map(|i| SnapEntry::new(i, f64::from(i) * 100.0 / f64::from(len))),
        )
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(len), &points, |b, points| {
            let mut value = 0.0;
            b.iter(|| {
                value = (value + 7.3) % 100.0;
                black_box(points.resolve(black_box(value)))
            });
        });
    }

    group.finish();
}

fn bench_drag_cycle(c: &mut Criterion) {
    c.bench_function("sheet/drag_release_settle", |b| {
        b.iter_batched(
            || {
                let config = SheetConfig::standard().with_initial(SnapPoint::Half);
                SheetController::new(config, NoopHost::default()).unwrap()
            },
            |mut sheet| {
                sheet.feed_pointer_down(0.0);
                for y in (0..400).step_by(8) {
                    sheet.feed_pointer_move(f64::from(y));
                }
                sheet.feed_pointer_up();
                let mut now = Duration::ZERO;
                while sheet.is_animating() {
                    sheet.on_frame(now);
                    now += Duration::from_micros(16_667);
                }
                black_box(sheet.position())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_resolve, bench_drag_cycle);
criterion_main!(benches);
