//! Rotatable tile puzzles on square and hex grids.
//!
//! Circuits, pipe networks and hex-adjacency puzzles only differ in
//! their topology, their tile shapes and their goal, so they share one
//! builder.

use crate::core::{
    Connectors, Goal, GridPos, Level, LevelBuilder, LevelPiece, PieceId, PieceKind, Result, Topology,
};

/// Standard square tile shapes in their unrotated orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SquareTile {
    /// Single connector, facing right.
    End,
    /// Left and right.
    Straight,
    /// Up and right.
    Elbow,
    /// Up, right and left.
    Tee,
    Cross,
}

impl SquareTile {
    #[must_use]
    pub fn connectors(self) -> Connectors {
        match self {
            SquareTile::End => Connectors::square(false, true, false, false),
            SquareTile::Straight => Connectors::square(false, true, false, true),
            SquareTile::Elbow => Connectors::square(true, true, false, false),
            SquareTile::Tee => Connectors::square(true, true, false, true),
            SquareTile::Cross => Connectors::square(true, true, true, true),
        }
    }
}

/// Standard hex tile shapes, by the sides they open in axial
/// direction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexTile {
    End,
    /// Opposite sides.
    Straight,
    /// Sides two apart.
    Bend,
    /// Adjacent sides.
    Hook,
    /// Three alternating sides.
    Star,
}

impl HexTile {
    #[must_use]
    pub fn connectors(self) -> Connectors {
        match self {
            HexTile::End => Connectors::hex(&[0]),
            HexTile::Straight => Connectors::hex(&[0, 3]),
            HexTile::Bend => Connectors::hex(&[0, 2]),
            HexTile::Hook => Connectors::hex(&[0, 1]),
            HexTile::Star => Connectors::hex(&[0, 2, 4]),
        }
    }
}

/// Builder for grid tile puzzles.
///
/// ```
/// use netpuzzle::core::GridPos;
/// use netpuzzle::variants::{GridPuzzle, SquareTile};
///
/// let mut p = GridPuzzle::square(1, "first light", 3, 1);
/// p.source(GridPos::new(0, 0), SquareTile::End.connectors());
/// p.tile(GridPos::new(1, 0), SquareTile::Straight.connectors(), 1);
/// p.target(GridPos::new(2, 0), SquareTile::End.connectors(), 2);
/// let level = p.reachability().unwrap();
/// assert_eq!(level.pieces.len(), 3);
/// ```
pub struct GridPuzzle {
    builder: LevelBuilder,
    sources: Vec<PieceId>,
    targets: Vec<PieceId>,
}

impl GridPuzzle {
    pub fn square(id: u32, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::on(LevelBuilder::new(id, name, Topology::square(width, height)))
    }

    pub fn hex(id: u32, name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::on(LevelBuilder::new(id, name, Topology::hex(width, height)))
    }

    fn on(builder: LevelBuilder) -> Self {
        Self {
            builder,
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Fixed power source / water inlet.
    pub fn source(&mut self, cell: GridPos, connectors: Connectors) -> PieceId {
        self.place_source(LevelPiece::tile(PieceKind::Source, cell, connectors))
    }

    /// Prepared piece that the signal starts from.
    pub fn place_source(&mut self, piece: LevelPiece) -> PieceId {
        let id = self.place(piece);
        self.sources.push(id);
        id
    }

    /// Fixed target (bulb, outlet) rotated by `rotation` steps.
    pub fn target(&mut self, cell: GridPos, connectors: Connectors, rotation: u8) -> PieceId {
        let id = self.place(LevelPiece::tile(PieceKind::Target, cell, connectors).rotated(rotation));
        self.targets.push(id);
        id
    }

    /// Rotatable tile starting at `rotation`.
    pub fn tile(&mut self, cell: GridPos, connectors: Connectors, rotation: u8) -> PieceId {
        self.place(LevelPiece::tile(PieceKind::Normal, cell, connectors).rotated(rotation))
    }

    /// Switch tile, rotatable and toggled by the player.
    pub fn switch(&mut self, cell: GridPos, connectors: Connectors, rotation: u8, on: bool) -> PieceId {
        self.place(
            LevelPiece::tile(PieceKind::Switch, cell, connectors)
                .rotated(rotation)
                .switched(on),
        )
    }

    /// Any prepared piece.
    pub fn place(&mut self, piece: LevelPiece) -> PieceId {
        self.builder.add(piece)
    }

    /// Every target must be reached.
    pub fn reachability(self) -> Result<Level> {
        let goal = Goal::Reachability {
            targets: self.targets.clone(),
        };
        self.finish(goal)
    }

    /// No connector may be left dangling.
    pub fn full_network(self) -> Result<Level> {
        self.finish(Goal::FullNetwork)
    }

    /// Every piece with a target rotation must match it.
    pub fn alignment(self) -> Result<Level> {
        self.finish(Goal::Alignment)
    }

    fn finish(self, goal: Goal) -> Result<Level> {
        let mut builder = self.builder;
        for id in self.sources {
            builder = builder.with_source(id);
        }
        builder.with_goal(goal).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Direction, LevelError};

    #[test]
    fn test_square_tiles_have_expected_arity() {
        assert_eq!(SquareTile::End.connectors().count(), 1);
        assert_eq!(SquareTile::Straight.connectors().count(), 2);
        assert_eq!(SquareTile::Elbow.connectors().count(), 2);
        assert_eq!(SquareTile::Tee.connectors().count(), 3);
        assert_eq!(SquareTile::Cross.connectors().count(), 4);
        assert!(SquareTile::Straight.connectors().has(Direction::LEFT));
    }

    #[test]
    fn test_hex_tiles_have_six_sides() {
        for tile in [HexTile::End, HexTile::Straight, HexTile::Bend, HexTile::Hook, HexTile::Star] {
            assert_eq!(tile.connectors().len(), 6);
        }
        assert_eq!(HexTile::Star.connectors().count(), 3);
    }

    #[test]
    fn test_reachability_needs_a_target() {
        let mut p = GridPuzzle::square(1, "empty", 2, 1);
        p.source(GridPos::new(0, 0), SquareTile::End.connectors());
        assert!(matches!(p.reachability(), Err(LevelError::GoalMismatch(_))));
    }

    #[test]
    fn test_hex_puzzle_builds() {
        let mut p = GridPuzzle::hex(2, "honeycomb", 3, 3);
        p.source(GridPos::new(1, 1), HexTile::Star.connectors());
        p.tile(GridPos::new(2, 1), HexTile::Straight.connectors(), 0);
        let level = p.full_network().unwrap();
        let board = Board::from_level(&level);
        assert!(board.piece(PieceId(0)).is_locked());
        assert_eq!(board.piece(PieceId(1)).direction_count(), 6);
    }
}
