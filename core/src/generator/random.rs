use ndarray::Array2;

use super::*;

/// Deal strategy that pairs the values `1..=N/2` and lays them out in a
/// uniformly shuffled order. Same seed, same deal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, config: GameConfig) -> CardLayout {
        use rand::prelude::*;

        let pair_count = config.pair_count();
        let mut values: Vec<CardValue> = Vec::with_capacity(usize::from(config.total_cards()));
        for value in 1..=pair_count {
            values.push(value);
            values.push(value);
        }

        // every arrangement equally likely
        let mut rng = SmallRng::seed_from_u64(self.seed);
        values.shuffle(&mut rng);

        log::debug!(
            "dealt {} pairs onto a {:?} board, seed {}",
            pair_count,
            config.size,
            self.seed
        );

        let values = Array2::from_shape_vec(config.size.to_nd_index(), values)
            .expect("paired deck fills the board");
        CardLayout::new(values, pair_count)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn deal(size: Coord2, seed: u64) -> CardLayout {
        RandomDeckGenerator::new(seed).generate(GameConfig::new(size).unwrap())
    }

    #[test]
    fn every_value_is_dealt_exactly_twice() {
        for size in [(2, 2), (4, 4), (6, 5)] {
            let layout = deal(size, 7);

            let mut occurrences: BTreeMap<CardValue, u32> = BTreeMap::new();
            let (x_end, y_end) = layout.size();
            for x in 0..x_end {
                for y in 0..y_end {
                    *occurrences.entry(layout[(x, y)]).or_default() += 1;
                }
            }

            assert_eq!(occurrences.len(), usize::from(layout.pair_count()));
            assert!(occurrences.values().all(|&count| count == 2));
        }
    }

    #[test]
    fn deals_are_deterministic_per_seed() {
        assert_eq!(deal((4, 4), 42), deal((4, 4), 42));
        assert_ne!(deal((4, 4), 42), deal((4, 4), 43));
    }

    #[test]
    fn shuffle_is_uniform_over_a_small_board() {
        const SAMPLES: u64 = 6_000;

        let mut arrangements: BTreeMap<Vec<CardValue>, u32> = BTreeMap::new();
        for seed in 0..SAMPLES {
            let layout = deal((4, 1), seed);
            let dealt: Vec<CardValue> = (0..4u8).map(|x| layout[(x, 0)]).collect();
            *arrangements.entry(dealt).or_default() += 1;
        }

        // two pairs over four cards allow 6 distinct arrangements, each
        // expected near SAMPLES / 6
        assert_eq!(arrangements.len(), 6);
        for count in arrangements.values() {
            assert!(
                (800..=1200).contains(count),
                "skewed arrangement count {count}"
            );
        }
    }
}
