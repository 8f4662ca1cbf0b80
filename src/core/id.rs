//! Piece and level identification.
//!
//! Pieces are identified by a dense `PieceId`: a level with `n` pieces
//! uses ids `0..n`, in the order the pieces were declared. The board
//! stores pieces in a vector indexed by `PieceId::index()`.
//!
//! ```
//! use netpuzzle::core::PieceId;
//!
//! let id = PieceId::new(3);
//! assert_eq!(id.index(), 3);
//! assert_eq!(format!("{}", id), "Piece(3)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a piece within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Position of this piece in the board's piece vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PieceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// Level identifier, reported to progress observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub u32);

impl LevelId {
    /// Create a new level ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Level({})", self.0)
    }
}
