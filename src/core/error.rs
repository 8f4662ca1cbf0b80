//! Level content errors.
//!
//! Every content problem is caught when a level is validated at setup.
//! Player actions never produce errors, and traversal never sees an
//! id or connector set that validation did not accept.

use thiserror::Error;

use super::geometry::GridPos;
use super::id::PieceId;
use super::piece::PieceKind;
use super::topology::Topology;

/// Result type for level validation.
pub type Result<T> = std::result::Result<T, LevelError>;

/// Errors in level data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    /// Connector array does not match the topology's direction count.
    #[error("{piece}: expected {expected} connectors, found {found}")]
    MalformedConnectors {
        piece: PieceId,
        expected: usize,
        found: usize,
    },

    /// Initial or target rotation is not in `0..D`.
    #[error("{piece}: rotation {steps} out of range for {directions} directions")]
    RotationOutOfRange {
        piece: PieceId,
        steps: u8,
        directions: usize,
    },

    /// A source or goal references a piece that does not exist.
    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    /// Grid cell on a proximity board, or free point on a grid.
    #[error("{piece}: position does not fit a {topology} topology")]
    PositionMismatch { piece: PieceId, topology: Topology },

    #[error("{piece}: cell {cell} is outside the board")]
    OutOfBounds { piece: PieceId, cell: GridPos },

    #[error("{piece} and {other} share cell {cell}")]
    CellOccupied {
        piece: PieceId,
        other: PieceId,
        cell: GridPos,
    },

    #[error("{piece}: {kind:?} pieces cannot be placed on a {topology} topology")]
    KindMismatch {
        piece: PieceId,
        kind: PieceKind,
        topology: Topology,
    },

    /// Gear or domino without its geometry.
    #[error("{piece}: missing {what} spec")]
    MissingSpec { piece: PieceId, what: &'static str },

    #[error("{piece}: invalid geometry: {reason}")]
    InvalidGeometry { piece: PieceId, reason: String },

    #[error("level has no source pieces")]
    NoSources,

    #[error("goal does not fit this level: {0}")]
    GoalMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = LevelError::MalformedConnectors {
            piece: PieceId(3),
            expected: 4,
            found: 6,
        };
        assert_eq!(err.to_string(), "Piece(3): expected 4 connectors, found 6");

        let err = LevelError::OutOfBounds {
            piece: PieceId(1),
            cell: GridPos::new(5, -1),
        };
        assert_eq!(err.to_string(), "Piece(1): cell (5, -1) is outside the board");

        assert_eq!(LevelError::NoSources.to_string(), "level has no source pieces");
    }
}
