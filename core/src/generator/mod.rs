use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine placements, consulted by the board on every (re)generation.
pub trait MineGenerator {
    fn generate(&mut self, config: BoardConfig) -> Result<MineLayout>;
}
