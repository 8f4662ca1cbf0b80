//! The live piece arena.
//!
//! `Board` owns every live `Piece` of the current attempt. Pieces are
//! stored in an `im::Vector` indexed by `PieceId`, so cloning a board
//! for a render snapshot or keeping a pristine copy for `reset()` is
//! O(1).
//!
//! Edges are never stored: neighbour queries look at the cell index and
//! the current rotation every time they are asked.

use im::{HashMap as ImHashMap, Vector};
use smallvec::SmallVec;

use super::geometry::{GridPos, Position, Vec2};
use super::id::PieceId;
use super::level::Level;
use super::piece::Piece;
use super::topology::{Direction, Topology};

/// A grid neighbour: the piece, the direction from us to it, and the
/// direction from it back to us.
pub type GridNeighbor = (PieceId, Direction, Direction);

/// Engine-owned collection of live pieces.
#[derive(Clone, Debug)]
pub struct Board {
    topology: Topology,
    pieces: Vector<Piece>,
    cells: ImHashMap<GridPos, PieceId>,
}

impl Board {
    /// Build the live board for a validated level.
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        let pieces: Vector<Piece> = level.instantiate().into_iter().collect();
        let cells = pieces
            .iter()
            .filter_map(|p| p.position.cell().map(|c| (c, p.id)))
            .collect();
        Self {
            topology: level.topology,
            pieces,
            cells,
        }
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Look up a piece. `None` for ids outside the level.
    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    /// Look up a piece known to exist.
    ///
    /// Panics on an unknown id; only validated ids reach this.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// The piece occupying `cell`, if any.
    #[must_use]
    pub fn piece_at(&self, cell: GridPos) -> Option<PieceId> {
        self.cells.get(&cell).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = PieceId> {
        (0..self.pieces.len() as u32).map(PieceId)
    }

    /// Occupied neighbour cells of a grid piece.
    #[must_use]
    pub fn grid_neighbors(&self, id: PieceId) -> SmallVec<[GridNeighbor; 6]> {
        let mut out = SmallVec::new();
        let Some(cell) = self.get(id).and_then(|p| p.position.cell()) else {
            return out;
        };
        for dir in self.topology.directions() {
            let there = self.topology.step(cell, dir);
            if let Some(other) = self.piece_at(there) {
                out.push((other, dir, self.topology.opposite(dir)));
            }
        }
        out
    }

    /// Move a free-standing piece. Grid pieces never move.
    ///
    /// Returns whether the piece moved.
    pub fn move_to(&mut self, id: PieceId, point: Vec2) -> bool {
        match self.get_mut(id) {
            Some(piece) if piece.position.point().is_some() => {
                piece.position = Position::Point(point);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connectors::Connectors;
    use crate::core::level::{Goal, LevelBuilder, LevelPiece, SpinTarget};
    use crate::core::piece::{GearSpec, PieceKind};

    fn cross_level() -> Level {
        let mut b = LevelBuilder::new(1, "plus", Topology::square(3, 3));
        let all = Connectors::square(true, true, true, true);
        let center = b.add(LevelPiece::tile(PieceKind::Source, GridPos::new(1, 1), all.clone()));
        b.add(LevelPiece::tile(PieceKind::Normal, GridPos::new(1, 0), all.clone()));
        b.add(LevelPiece::tile(PieceKind::Normal, GridPos::new(2, 1), all.clone()));
        b.add(LevelPiece::tile(PieceKind::Normal, GridPos::new(0, 0), all));
        b.with_source(center).with_goal(Goal::FullNetwork).build().unwrap()
    }

    #[test]
    fn test_from_level() {
        let board = Board::from_level(&cross_level());
        assert_eq!(board.len(), 4);
        assert_eq!(board.piece_at(GridPos::new(2, 1)), Some(PieceId(2)));
        assert_eq!(board.piece_at(GridPos::new(2, 2)), None);
        assert!(board.get(PieceId(4)).is_none());
    }

    #[test]
    fn test_grid_neighbors() {
        let board = Board::from_level(&cross_level());
        let n = board.grid_neighbors(PieceId(0));
        assert_eq!(
            n.as_slice(),
            &[
                (PieceId(1), Direction::UP, Direction::DOWN),
                (PieceId(2), Direction::RIGHT, Direction::LEFT),
            ]
        );
        // Diagonal cells are not neighbours.
        assert!(board.grid_neighbors(PieceId(3)).iter().all(|(id, _, _)| *id == PieceId(1)));
    }

    #[test]
    fn test_move_only_free_pieces() {
        let mut board = Board::from_level(&cross_level());
        assert!(!board.move_to(PieceId(1), Vec2::new(5.0, 5.0)));

        let mut b = LevelBuilder::new(2, "gears", Topology::Proximity);
        let g = b.add(LevelPiece::gear(Vec2::new(0.0, 0.0), GearSpec::new(12, 24.0)));
        let level = b
            .with_source(g)
            .with_goal(Goal::Spin { targets: vec![SpinTarget { piece: g, velocity: None }] })
            .build()
            .unwrap();
        let mut board = Board::from_level(&level);
        assert!(board.move_to(g, Vec2::new(5.0, 5.0)));
        assert_eq!(board.piece(g).point(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::from_level(&cross_level());
        let mut copy = board.clone();
        copy.get_mut(PieceId(1)).unwrap().rotate(1);
        assert_eq!(board.piece(PieceId(1)).rotation_steps(), 0);
        assert_eq!(copy.piece(PieceId(1)).rotation_steps(), 1);
    }
}
