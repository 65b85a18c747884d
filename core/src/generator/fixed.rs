use super::*;

/// Replays the same mine coordinates on every generation, for scripted games and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: BoardConfig) -> Result<MineLayout> {
        let layout = MineLayout::from_mine_coords(config.size(), &self.mines)?;
        if layout.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} mines but the board expects {}",
                layout.mine_count(),
                config.mines
            );
            return Err(GameError::InvalidConfiguration);
        }
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_given_mines() {
        let config = BoardConfig::new(4, 3, 2).unwrap();
        let mut generator = FixedMineGenerator::new([(0, 0), (3, 2)]);
        let layout = generator.generate(config).unwrap();
        assert!(layout.contains_mine((0, 0)));
        assert!(layout.contains_mine((3, 2)));
        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(generator.generate(config).unwrap(), layout);
    }

    #[test]
    fn rejects_count_mismatch() {
        let config = BoardConfig::new(4, 3, 3).unwrap();
        let mut generator = FixedMineGenerator::new([(0, 0), (3, 2)]);
        assert_eq!(generator.generate(config), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn rejects_out_of_bounds_mines() {
        let config = BoardConfig::new(4, 3, 1).unwrap();
        let mut generator = FixedMineGenerator::new([(4, 0)]);
        assert_eq!(generator.generate(config), Err(GameError::OutOfBounds));
    }
}
