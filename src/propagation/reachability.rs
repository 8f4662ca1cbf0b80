//! Boolean reachability over grid edges.

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, Piece};

use super::{Outcome, PropagationStrategy, Successors};

/// Circuits, pipes and hex tiles: a piece is reached if a chain of
/// valid edges leads to it from any source.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reachability;

impl PropagationStrategy for Reachability {
    fn name(&self) -> &'static str {
        "reachability"
    }

    fn rest(&self) -> Outcome {
        Outcome::Reached(false)
    }

    fn seed(&self, _board: &Board, _source: &Piece) -> Outcome {
        Outcome::Reached(true)
    }

    fn successors(
        &self,
        board: &Board,
        resolver: &AdjacencyResolver,
        parent: &Piece,
        _outcome: Outcome,
        out: &mut Successors,
    ) {
        out.extend(
            resolver
                .grid_edges(board, parent.id)
                .into_iter()
                .map(|edge| (edge.to, Outcome::Reached(true))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Connectors, Goal, GridPos, LevelBuilder, LevelPiece, PieceId, PieceKind, Topology};
    use crate::propagation::PropagationEngine;

    #[test]
    fn test_hex_reachability() {
        // Source at (0,0) pointing east (dir 0), link at (1,0) running
        // west-east, target at (2,0) open to the west (dir 3).
        let mut b = LevelBuilder::new(1, "hex", Topology::hex(3, 1));
        let s = b.add(LevelPiece::tile(PieceKind::Source, GridPos::new(0, 0), Connectors::hex(&[0])));
        let link = b.add(LevelPiece::tile(PieceKind::Normal, GridPos::new(1, 0), Connectors::hex(&[0, 3])));
        let t = b.add(LevelPiece::tile(PieceKind::Target, GridPos::new(2, 0), Connectors::hex(&[3])));
        let level = b
            .with_source(s)
            .with_goal(Goal::Reachability { targets: vec![t] })
            .build()
            .unwrap();

        let mut board = Board::from_level(&level);
        let engine = PropagationEngine::new(AdjacencyResolver::new(2.0));
        assert!(engine.propagate(&board, &level.sources, &Reachability).reached(t));

        board.get_mut(link).unwrap().rotate(1);
        let outcomes = engine.propagate(&board, &level.sources, &Reachability);
        assert!(!outcomes.reached(link));
        assert!(!outcomes.reached(t));

        // Five more sixth-turns bring it home.
        board.get_mut(link).unwrap().rotate(5);
        assert!(engine.propagate(&board, &level.sources, &Reachability).reached(t));
        assert_eq!(board.piece(PieceId(1)).rotation_steps(), 0);
    }
}
