use std::collections::BTreeMap;
use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use web_time::Instant;

use memorita_core::*;

fn bench_deal(c: &mut Criterion) {
    let config = GameConfig::new((8, 8)).unwrap();
    let mut seed = 0u64;

    c.bench_function("deal_8x8", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(RandomDeckGenerator::new(seed).generate(config))
        })
    });
}

fn bench_perfect_game(c: &mut Criterion) {
    let config = GameConfig::new((8, 8)).unwrap();
    let layout = RandomDeckGenerator::new(7).generate(config);

    // pair the positions up by value once, outside the measured loop
    let mut positions: BTreeMap<CardValue, Vec<Coord2>> = BTreeMap::new();
    let (x_end, y_end) = layout.size();
    for x in 0..x_end {
        for y in 0..y_end {
            positions.entry(layout[(x, y)]).or_default().push((x, y));
        }
    }
    let turns: Vec<(Coord2, Coord2)> = positions
        .values()
        .map(|pair| (pair[0], pair[1]))
        .collect();

    c.bench_function("play_8x8_perfect", |b| {
        b.iter(|| {
            let mut engine = PairEngine::new(layout.clone());
            let now = Instant::now();
            for &(first, second) in &turns {
                engine.select(first, now).unwrap();
                engine.select(second, now).unwrap();
            }
            black_box(engine.tick(now + Duration::from_secs(1)))
        })
    });
}

criterion_group!(benches, bench_deal, bench_perfect_game);
criterion_main!(benches);
