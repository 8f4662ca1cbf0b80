//! Level builders for the concrete games.
//!
//! - [`GridPuzzle`]: rotatable circuits and pipe networks on square
//!   grids, and hex-adjacency tiles.
//! - [`GearTrain`]: draggable meshing gears.
//! - [`DominoLine`]: domino chain reactions.
//!
//! These only assemble `Level` data; every variant plays through the
//! same `PuzzleEngine`.

mod dominoes;
mod gears;
mod grid;

pub use dominoes::DominoLine;
pub use gears::{GearTrain, DEFAULT_MODULE};
pub use grid::{GridPuzzle, HexTile, SquareTile};
