use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> InProgress, through [`Game::reset`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What the player wants to do with a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal,
    ToggleFlag,
}

/// One round of Minesweeper over an exclusively owned [`Board`].
#[derive(Clone, Debug)]
pub struct Game<G = RandomMineGenerator> {
    board: Board<G>,
    state: GameState,
}

impl Game {
    pub fn new(config: BoardConfig) -> Result<Self> {
        Ok(Self::from_board(Board::new(config)?))
    }

    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        Ok(Self::from_board(Board::with_seed(config, seed)?))
    }
}

impl<G: MineGenerator> Game<G> {
    pub fn with_generator(config: BoardConfig, generator: G) -> Result<Self> {
        Ok(Self::from_board(Board::with_generator(config, generator)?))
    }

    /// Starts a new round on a freshly generated layout of the same shape.
    pub fn reset(&mut self) -> Result<()> {
        self.board.reset()?;
        self.state = GameState::InProgress;
        log::debug!("Game reset");
        Ok(())
    }
}

impl<G> Game<G> {
    fn from_board(board: Board<G>) -> Self {
        Self {
            board,
            state: GameState::InProgress,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Read-only view of the board, valid until the next mutating call.
    pub fn board(&self) -> &Board<G> {
        &self.board
    }

    pub fn steps(&self) -> CellCount {
        self.board.step_count()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.board.flagged_count()
    }

    /// How many mines have not been flagged yet, negative when the player over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.board.flagged_count())
    }

    pub fn apply(&mut self, coords: Coord2, action: Action) -> Result<GameState> {
        match action {
            Action::Reveal => self.reveal(coords),
            Action::ToggleFlag => {
                self.toggle_flag(coords)?;
                Ok(self.state)
            }
        }
    }

    /// Opens a covered, unflagged cell and expands blank regions.
    ///
    /// Revealing an uncovered or flagged cell is silently ignored and does not count as a step.
    pub fn reveal(&mut self, coords: Coord2) -> Result<GameState> {
        let cell = self.board.cell(coords)?;
        self.check_in_progress()?;

        if !cell.is_covered() || cell.is_flagged() {
            return Ok(self.state);
        }

        self.board.record_step();
        self.board.mark_clicked(coords)?;
        self.board.uncover(coords)?;
        log::debug!(
            "Reveal {:?}, mined: {}, adjacent mines: {}",
            coords,
            cell.is_mined(),
            cell.adjacent_mines()
        );

        if cell.is_mined() {
            self.end_game(GameState::Lost);
        } else {
            if cell.is_blank() {
                self.clear_zone(coords)?;
            }
            if self.board.is_finished() {
                self.end_game(GameState::Won);
            }
        }

        Ok(self.state)
    }

    /// Flags a covered cell or removes an existing flag, uncovered cells cannot be flagged.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let cell = self.board.cell(coords)?;
        self.check_in_progress()?;

        if cell.is_covered() || cell.is_flagged() {
            self.board.set_flag(coords, !cell.is_flagged())
        } else {
            Ok(MarkOutcome::NoChange)
        }
    }

    /// Uncovers the blank-connected region around `start`, returns how many cells it opened.
    ///
    /// Neighbors are uncovered as soon as they are discovered, so each cell enters the worklist at most once.
    /// Mined cells are never opened, flagged safe cells are opened but keep their flag.
    fn clear_zone(&mut self, start: Coord2) -> Result<CellCount> {
        let mut opened: CellCount = 0;
        let mut to_visit = VecDeque::from([start]);
        log::trace!("Starting flood-fill from {:?}", start);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.board.iter_neighbors(visit_coords) {
                let cell = self.board.cell(pos)?;
                if !cell.is_covered() || cell.is_mined() {
                    continue;
                }

                self.board.uncover(pos)?;
                opened += 1;
                log::trace!("Flood opened cell at {:?}, mine count: {}", pos, cell.adjacent_mines());

                if cell.is_blank() {
                    to_visit.push_back(pos);
                }
            }
        }

        log::debug!("Flood-fill from {:?} opened {} cells", start, opened);
        Ok(opened)
    }

    fn end_game(&mut self, state: GameState) {
        self.state = state;
        self.board.uncover_all();
        log::debug!(
            "Game ended: {:?} after {} steps",
            state,
            self.board.step_count()
        );
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
