use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crush_core::TileMask;
use crush_engine::{detect_chains, find_legal_swaps, Level, LevelLayout};

fn dealt_level(seed: u64) -> Level {
    let layout = LevelLayout::new(TileMask::full(9, 9), 1_000_000, 50).expect("layout");
    let mut level = Level::with_seed(layout, seed);
    level.shuffle();
    level
}

fn bench_find_legal_swaps(c: &mut Criterion) {
    let level = dealt_level(7);

    c.bench_function("find_legal_swaps_9x9", |b| {
        b.iter_batched(
            || level.tokens().clone(),
            |mut grid| find_legal_swaps(black_box(&mut grid)),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_detect_chains(c: &mut Criterion) {
    let level = dealt_level(11);

    c.bench_function("detect_chains_9x9", |b| {
        b.iter(|| detect_chains(black_box(level.tokens()), black_box(level.mask())))
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let level = dealt_level(13);
    let swap = *level
        .legal_swaps()
        .iter()
        .next()
        .expect("dealt boards are playable");

    c.bench_function("play_one_turn_9x9", |b| {
        b.iter_batched(
            || level.clone(),
            |mut fresh| fresh.play(black_box(&swap)).expect("legal swap"),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_find_legal_swaps,
    bench_detect_chains,
    bench_full_turn
);
criterion_main!(benches);
