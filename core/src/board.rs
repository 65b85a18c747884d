use core::fmt;
use ndarray::Array2;

use crate::*;

/// Grid of cells together with the counters a round needs.
///
/// Width, height and mine count are fixed for the board's whole life, [`Board::reset`] only redistributes the mines
/// and clears the per-round state. Every query and mutation takes `(x, y)` coordinates and fails with
/// [`GameError::OutOfBounds`] outside the grid.
#[derive(Clone, Debug)]
pub struct Board<G = RandomMineGenerator> {
    config: BoardConfig,
    generator: G,
    cells: Array2<Cell>,
    step_count: CellCount,
    covered_remaining: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Board with a randomly seeded layout.
    pub fn new(config: BoardConfig) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new())
    }

    /// Board whose layouts are reproducible from `seed`.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_seed(seed))
    }
}

impl<G: MineGenerator> Board<G> {
    pub fn with_generator(config: BoardConfig, generator: G) -> Result<Self> {
        let config = BoardConfig::new(config.width, config.height, config.mines)?;
        let mut board = Self {
            config,
            generator,
            cells: Array2::from_shape_fn(config.size().to_nd_index(), |(x, y)| {
                Cell::new((x as Coord, y as Coord))
            }),
            step_count: 0,
            covered_remaining: config.total_cells(),
            flagged_count: 0,
        };
        board.reset()?;
        Ok(board)
    }

    /// Draws a fresh layout and starts over with every cell covered, unflagged and unclicked.
    ///
    /// On error the board is left untouched.
    pub fn reset(&mut self) -> Result<()> {
        let layout = self.generator.generate(self.config)?;
        if layout.size() != self.config.size() || layout.mine_count() != self.config.mines {
            return Err(GameError::InvalidConfiguration);
        }

        self.cells = Array2::from_shape_fn(self.config.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            Cell {
                mined: layout.contains_mine(coords),
                adjacent_mines: layout.adjacent_mine_count(coords),
                ..Cell::new(coords)
            }
        });
        self.step_count = 0;
        self.covered_remaining = self.config.total_cells();
        self.flagged_count = 0;

        log::debug!(
            "Generated {}x{} board with {} mines",
            self.config.width,
            self.config.height,
            self.config.mines
        );
        Ok(())
    }
}

impl<G> Board<G> {
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn step_count(&self) -> CellCount {
        self.step_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn covered_remaining(&self) -> CellCount {
        self.covered_remaining
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.t().into_iter().copied()
    }

    pub fn is_mined(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell(coords)?.is_mined())
    }

    pub fn is_covered(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell(coords)?.is_covered())
    }

    pub fn is_flagged(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell(coords)?.is_flagged())
    }

    pub fn has_been_clicked(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell(coords)?.has_been_clicked())
    }

    pub fn is_blank(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell(coords)?.is_blank())
    }

    pub fn adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        Ok(self.cell(coords)?.adjacent_mines())
    }

    pub fn icon_at(&self, coords: Coord2) -> Result<Icon> {
        Ok(self.cell(coords)?.icon())
    }

    /// In-bounds neighbors of `coords`, which is assumed to be valid.
    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Uncovers a single cell, returns whether it was still covered.
    ///
    /// Uncovering an already uncovered cell changes nothing, so the covered counter always matches the grid.
    pub fn uncover(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.config.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.covered {
            return Ok(false);
        }
        cell.covered = false;
        self.covered_remaining -= 1;
        Ok(true)
    }

    pub fn mark_clicked(&mut self, coords: Coord2) -> Result<()> {
        let coords = self.config.validate_coords(coords)?;
        self.cells[coords.to_nd_index()].clicked = true;
        Ok(())
    }

    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) -> Result<MarkOutcome> {
        let coords = self.config.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.flagged == flagged {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveals the whole board, used once a round is over.
    pub fn uncover_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.covered = false;
        }
        self.covered_remaining = 0;
    }

    pub fn record_step(&mut self) {
        self.step_count = self.step_count.saturating_add(1);
    }

    /// Whether every safe cell has been uncovered.
    pub fn is_finished(&self) -> bool {
        self.covered_remaining == self.config.mines
    }
}

/// Debug dump: the player's view followed by the full solution.
impl<G> fmt::Display for Board<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.cells.t();

        writeln!(f, "Covered board:")?;
        for row in rows.rows() {
            for cell in row {
                write!(f, "{} ", cell.icon())?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Solution:")?;
        for row in rows.rows() {
            for cell in row {
                let icon = if cell.mined {
                    Icon::Mine
                } else {
                    Icon::Open(cell.adjacent_mines)
                };
                write!(f, "{} ", icon)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
