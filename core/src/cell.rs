use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Snapshot of a single board position, handed out by value so the board can only change through its own methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) coords: Coord2,
    pub(crate) mined: bool,
    pub(crate) covered: bool,
    pub(crate) clicked: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            mined: false,
            covered: true,
            clicked: false,
            flagged: false,
            adjacent_mines: 0,
        }
    }

    pub const fn coords(self) -> Coord2 {
        self.coords
    }

    pub const fn is_mined(self) -> bool {
        self.mined
    }

    pub const fn is_covered(self) -> bool {
        self.covered
    }

    /// Whether the player selected this cell directly, as opposed to it being opened by a flood fill.
    pub const fn has_been_clicked(self) -> bool {
        self.clicked
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn is_blank(self) -> bool {
        self.adjacent_mines == 0
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn icon(self) -> Icon {
        if self.flagged {
            Icon::Flagged
        } else if self.covered {
            Icon::Covered
        } else if self.mined {
            if self.clicked {
                Icon::ExplodedMine
            } else {
                Icon::Mine
            }
        } else {
            Icon::Open(self.adjacent_mines)
        }
    }
}

/// The 13 symbols a front-end needs to draw any cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    /// Uncovered safe cell with the given number of adjacent mines, `0..=8`. Use [`Icon::open`] for untrusted counts.
    Open(u8),
    Mine,
    ExplodedMine,
    Covered,
    Flagged,
}

impl Icon {
    pub const COUNT: usize = 13;

    /// Digit icon for an uncovered safe cell, `None` past 8 adjacent mines.
    pub const fn open(adjacent_mines: u8) -> Option<Self> {
        if adjacent_mines <= 8 {
            Some(Self::Open(adjacent_mines))
        } else {
            None
        }
    }

    /// Stable numbering of the icon set: digits map to themselves, followed by mine, exploded mine, covered, flagged.
    pub const fn index(self) -> u8 {
        match self {
            Self::Open(count) => {
                debug_assert!(count <= 8);
                count
            }
            Self::Mine => 9,
            Self::ExplodedMine => 10,
            Self::Covered => 11,
            Self::Flagged => 12,
        }
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0..=8 => Some(Self::Open(index)),
            9 => Some(Self::Mine),
            10 => Some(Self::ExplodedMine),
            11 => Some(Self::Covered),
            12 => Some(Self::Flagged),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Open(0) => '.',
            Self::Open(count) => {
                debug_assert!(count <= 8);
                (b'0' + count) as char
            }
            Self::Mine => '*',
            Self::ExplodedMine => 'X',
            Self::Covered => '#',
            Self::Flagged => 'F',
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.symbol(), f)
    }
}
