//! Game-state engine for single-player Minesweeper.
//!
//! [`Board`] owns the grid and its counters, [`Game`] turns player actions into board mutations and tracks whether
//! the round was won or lost. Front-ends only ever see [`Cell`] snapshots and [`Icon`]s.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod game;
mod generator;
mod types;

/// Which cells hold a mine, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mine_count: CellCount = 0;

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mine_count += 1;
            }
        }

        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (
            Coord::try_from(x).unwrap_or(Coord::MAX),
            Coord::try_from(y).unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
