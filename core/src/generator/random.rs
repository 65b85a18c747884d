use rand::prelude::*;
use rand::rngs::SmallRng;
use std::collections::BTreeSet;

use super::*;

/// Uniform placement without replacement: indices are drawn from `0..width * height` and duplicates are rejected
/// until the requested count is reached.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    /// Generator seeded from the process random source.
    pub fn new() -> Self {
        Self::from_seed(rand::random())
    }

    /// Deterministic generator, the same seed always produces the same sequence of layouts.
    pub fn from_seed(seed: u64) -> Self {
        log::debug!("Mine generator seed: {}", seed);
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: BoardConfig) -> Result<MineLayout> {
        let total_cells = config.total_cells();
        if config.mines >= total_cells {
            return Err(GameError::InvalidConfiguration);
        }

        let mut mined = BTreeSet::new();
        while mined.len() < usize::from(config.mines) {
            mined.insert(self.rng.random_range(0..total_cells));
        }

        let coords: Vec<Coord2> = mined
            .into_iter()
            .map(|index| coords_of(index, config.width))
            .collect();
        MineLayout::from_mine_coords(config.size(), &coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut generator = RandomMineGenerator::from_seed(7);
        for mines in [0, 1, 25, 49] {
            let config = BoardConfig::new(10, 5, mines).unwrap();
            let layout = generator.generate(config).unwrap();
            assert_eq!(layout.mine_count(), mines);
            assert_eq!(layout.size(), (10, 5));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::beginner();
        let first = RandomMineGenerator::from_seed(42).generate(config).unwrap();
        let second = RandomMineGenerator::from_seed(42).generate(config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn consecutive_layouts_differ() {
        let config = BoardConfig::expert();
        let mut generator = RandomMineGenerator::from_seed(3);
        let first = generator.generate(config).unwrap();
        let second = generator.generate(config).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn refuses_full_board() {
        let config = BoardConfig::new_unchecked(3, 3, 9);
        let mut generator = RandomMineGenerator::from_seed(0);
        assert_eq!(generator.generate(config), Err(GameError::InvalidConfiguration));
    }
}
