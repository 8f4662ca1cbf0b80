//! Render read model.

use serde::{Deserialize, Serialize};

use crate::core::{Connectors, LevelId, PieceId, PieceKind, Position};
use crate::propagation::Outcome;
use crate::rules::Status;

/// What a renderer needs to draw one piece.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceView {
    pub id: PieceId,
    pub kind: PieceKind,
    pub position: Position,
    /// Connectors after rotation. Empty for free-standing pieces.
    pub connectors: Connectors,
    /// Display angle in degrees: gear spin or domino fall.
    pub angle: f64,
    pub outcome: Outcome,
    /// `None` when the piece has no target rotation.
    pub aligned: Option<bool>,
    /// Whether the staged flow reveal has reached this piece.
    pub revealed: bool,
}

/// Frame snapshot of the whole puzzle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: LevelId,
    pub status: Status,
    pub moves: u32,
    pub pieces: Vec<PieceView>,
}

impl Snapshot {
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&PieceView> {
        self.pieces.get(id.index())
    }
}
