use serde::{Deserialize, Serialize};

use crate::*;

/// Shape of a board: its size and how many mines it hides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const DEFAULT_WIDTH: Coord = 20;
    pub const DEFAULT_HEIGHT: Coord = 12;
    pub const DEFAULT_MINES: CellCount = 36;

    pub const MIN_WIDTH: Coord = 10;
    pub const MIN_HEIGHT: Coord = 5;
    pub const MIN_MINES: CellCount = 1;

    /// Validates the combination, at least one mine-free cell must remain.
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 || mines >= mult(width, height) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.width && coords.1 < self.height {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_MINES,
        )
    }
}

/// Raw launch parameters as handed over by a front-end, before any policy is applied.
///
/// Front-ends are lenient where the core is strict: [`LaunchOptions::resolve`] never fails, it falls back to
/// defaults and clamps the mine count so that the result is always a valid [`BoardConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub width: Option<String>,
    pub height: Option<String>,
    pub mines: Option<String>,
}

impl LaunchOptions {
    pub fn resolve(&self) -> BoardConfig {
        let parsed = (
            parse_field(self.width.as_deref()),
            parse_field(self.height.as_deref()),
            parse_field(self.mines.as_deref()),
        );

        let (width, height, mines) = match parsed {
            (Ok(width), Ok(height), Ok(mines)) => (width, height, mines),
            _ => {
                log::warn!("Invalid argument, using defaults");
                (None, None, None)
            }
        };

        let width = at_least(width, BoardConfig::MIN_WIDTH, BoardConfig::DEFAULT_WIDTH, "width");
        let height = at_least(
            height,
            BoardConfig::MIN_HEIGHT,
            BoardConfig::DEFAULT_HEIGHT,
            "height",
        );
        let mines = match mines {
            Some(mines) if mines < i64::from(BoardConfig::MIN_MINES) => {
                log::warn!(
                    "Invalid mines {}, using default {}",
                    mines,
                    BoardConfig::DEFAULT_MINES
                );
                i64::from(BoardConfig::DEFAULT_MINES)
            }
            Some(mines) => mines,
            None => i64::from(BoardConfig::DEFAULT_MINES),
        };

        let total_cells = mult(width, height);
        let mines = match CellCount::try_from(mines) {
            Ok(mines) if mines < total_cells => mines,
            _ => {
                log::warn!(
                    "Too many mines: {} mines on {} spots, using {} instead",
                    mines,
                    total_cells,
                    total_cells - 1
                );
                total_cells - 1
            }
        };

        BoardConfig::new_unchecked(width, height, mines)
    }
}

fn parse_field(raw: Option<&str>) -> core::result::Result<Option<i64>, core::num::ParseIntError> {
    raw.map(|raw| raw.trim().parse()).transpose()
}

fn at_least(value: Option<i64>, min: Coord, default: Coord, name: &str) -> Coord {
    let Some(value) = value else {
        return default;
    };
    match Coord::try_from(value) {
        Ok(value) if value >= min => value,
        _ => {
            log::warn!("Invalid {} {}, using default {}", name, value, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch(width: &str, height: &str, mines: &str) -> LaunchOptions {
        LaunchOptions {
            width: Some(width.to_owned()),
            height: Some(height.to_owned()),
            mines: Some(mines.to_owned()),
        }
    }

    #[test]
    fn rejects_too_many_mines() {
        assert_eq!(BoardConfig::new(10, 5, 50), Err(GameError::InvalidConfiguration));
        assert_eq!(BoardConfig::new(10, 5, 60), Err(GameError::InvalidConfiguration));
        assert!(BoardConfig::new(10, 5, 49).is_ok());
    }

    #[test]
    fn safe_cells_saturate_on_unchecked_configs() {
        assert_eq!(BoardConfig::new_unchecked(10, 5, 49).safe_cells(), 1);
        assert_eq!(BoardConfig::new_unchecked(2, 2, 4).safe_cells(), 0);
        assert_eq!(BoardConfig::new_unchecked(2, 2, 9).safe_cells(), 0);
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(BoardConfig::new(0, 5, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(BoardConfig::new(5, 0, 0), Err(GameError::InvalidConfiguration));
        assert!(BoardConfig::new(1, 1, 0).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            BoardConfig::beginner(),
            BoardConfig::intermediate(),
            BoardConfig::expert(),
            BoardConfig::default(),
        ] {
            assert_eq!(BoardConfig::new(config.width, config.height, config.mines), Ok(config));
        }
    }

    #[test]
    fn missing_arguments_use_defaults() {
        assert_eq!(LaunchOptions::default().resolve(), BoardConfig::default());
    }

    #[test]
    fn valid_arguments_are_kept() {
        assert_eq!(launch("30", "16", "99").resolve(), BoardConfig::expert());
    }

    #[test]
    fn small_values_fall_back_individually() {
        let config = launch("9", "6", "0").resolve();
        assert_eq!(config, BoardConfig::new_unchecked(20, 6, 36));
    }

    #[test]
    fn non_numeric_arguments_reset_everything() {
        let config = launch("15", "abc", "20").resolve();
        assert_eq!(config, BoardConfig::default());

        let config = launch("15", "8", "2.5").resolve();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn negative_and_oversized_values_fall_back() {
        let config = launch("300", "8", "-3").resolve();
        assert_eq!(config, BoardConfig::new_unchecked(20, 8, 36));
    }

    #[test]
    fn too_many_mines_are_clamped() {
        let config = launch("10", "5", "100000").resolve();
        assert_eq!(config, BoardConfig::new_unchecked(10, 5, 49));

        let config = launch("10", "5", "50").resolve();
        assert_eq!(config, BoardConfig::new_unchecked(10, 5, 49));
        assert!(BoardConfig::new(config.width, config.height, config.mines).is_ok());
    }

    #[test]
    fn config_serializes_as_plain_fields() {
        let json = serde_json::to_value(BoardConfig::beginner()).unwrap();
        assert_eq!(json, serde_json::json!({ "width": 9, "height": 9, "mines": 10 }));
    }
}
