//! Benchmark: per-frame carousel work.
//!
//! Run with: `cargo bench -p reel-widgets --bench carousel_bench`
//!
//! Measures the three paths an input loop hits every frame: a coasting
//! tick (placement only, reloads deferred), a drag frame, and an immediate
//! jump (full reload).

use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use reel_widgets::{Carousel, CarouselConfig, DataList, SlotLayout};

const MS_16: Duration = Duration::from_millis(16);

fn carousel(len: usize) -> Carousel {
    let mut c = Carousel::new(CarouselConfig::default(), SlotLayout::default())
        .expect("default config is valid");
    c.set_data(DataList::sample(len));
    c
}

// ===========================================================================
// Tick
// ===========================================================================

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.bench_function("coast_high_speed", |b| {
        let mut base = carousel(100_000);
        base.scroll_to_index(50_000, false);
        base.on_begin_drag();
        for _ in 0..5 {
            base.on_drag(-500.0, MS_16);
        }
        base.on_end_drag();
        b.iter_batched(
            || base.clone(),
            |mut carousel| {
                for _ in 0..20 {
                    black_box(carousel.tick(MS_16));
                }
                carousel
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("animated_jump", |b| {
        let mut base = carousel(100_000);
        base.scroll_to_index(90_000, true);
        b.iter_batched(
            || base.clone(),
            |mut carousel| {
                for _ in 0..20 {
                    black_box(carousel.tick(MS_16));
                }
                carousel
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("at_rest", |b| {
        let mut carousel = carousel(1_000);
        b.iter(|| black_box(carousel.tick(MS_16)));
    });

    group.finish();
}

// ===========================================================================
// Input
// ===========================================================================

fn bench_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("input");

    group.bench_function("drag_frame", |b| {
        let mut carousel = carousel(100_000);
        carousel.scroll_to_index(50_000, false);
        carousel.on_begin_drag();
        let mut sign = 1.0;
        b.iter(|| {
            sign = -sign;
            carousel.on_drag(black_box(sign * 30.0), MS_16);
        });
    });

    group.bench_function("immediate_jump", |b| {
        let mut carousel = carousel(100_000);
        let mut index = 0i64;
        b.iter(|| {
            index = (index + 7_919) % 100_000;
            carousel.scroll_to_index(black_box(index), false);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_input);
criterion_main!(benches);
