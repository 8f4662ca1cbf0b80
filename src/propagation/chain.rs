//! Domino chain reaction.
//!
//! A falling domino knocks over a standing one when:
//!
//! - their bases are closer than `reach`, and
//! - the standing domino lies strictly in the half-plane the falling one
//!   is heading into.
//!
//! The struck domino topples along its own facing axis, oriented away
//! from the domino that hit it.

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, Piece, PieceKind, Vec2};

use super::{Outcome, PropagationStrategy, Successors};

/// Falling-domino successor rule.
#[derive(Clone, Copy, Debug)]
pub struct ChainReaction {
    /// Maximum base-to-base strike distance.
    pub reach: f64,
}

impl ChainReaction {
    #[must_use]
    pub const fn new(reach: f64) -> Self {
        Self { reach }
    }

    /// Whether a domino at `from` falling along `direction` strikes `to`.
    #[must_use]
    pub fn strikes(&self, from: Vec2, direction: Vec2, to: Vec2) -> bool {
        let offset = to.sub(from);
        offset.length() < self.reach && offset.dot(direction) > 0.0
    }

    /// Direction `child` falls when struck from `from`.
    #[must_use]
    pub fn fall_direction(child: &Piece, from: Vec2) -> Vec2 {
        let Some(base) = child.point() else {
            return Vec2::default();
        };
        let away = base.sub(from);
        match child.aux.domino {
            Some(spec) => {
                let axis = spec.axis();
                if axis.dot(away) < 0.0 {
                    axis.neg()
                } else {
                    axis
                }
            }
            None => away.normalized(),
        }
    }
}

impl PropagationStrategy for ChainReaction {
    fn name(&self) -> &'static str {
        "chain-reaction"
    }

    fn rest(&self) -> Outcome {
        Outcome::Falling(None)
    }

    /// A pushed domino falls along its facing.
    fn seed(&self, _board: &Board, source: &Piece) -> Outcome {
        Outcome::Falling(Some(source.aux.domino.map(|d| d.axis()).unwrap_or(Vec2::new(1.0, 0.0))))
    }

    fn successors(
        &self,
        board: &Board,
        _resolver: &AdjacencyResolver,
        parent: &Piece,
        outcome: Outcome,
        out: &mut Successors,
    ) {
        let (Outcome::Falling(Some(direction)), Some(from)) = (outcome, parent.point()) else {
            return;
        };
        for child in board.iter() {
            if child.id == parent.id || child.kind != PieceKind::Domino {
                continue;
            }
            let Some(to) = child.point() else {
                continue;
            };
            if self.strikes(from, direction, to) {
                out.push((child.id, Outcome::Falling(Some(Self::fall_direction(child, from)))));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DominoSpec, Goal, LevelBuilder, LevelPiece, PieceId, Topology};
    use crate::propagation::PropagationEngine;

    fn line(xs: &[f64]) -> (Board, Vec<PieceId>) {
        let mut b = LevelBuilder::new(1, "dominoes", Topology::Proximity);
        for &x in xs {
            b.add(LevelPiece::domino(Vec2::new(x, 0.0), DominoSpec::new(0.0, 40.0)));
        }
        let level = b
            .with_source(PieceId(0))
            .with_goal(Goal::ChainReaction { required: vec![], zones: vec![] })
            .build()
            .unwrap();
        (Board::from_level(&level), level.sources.clone())
    }

    #[test]
    fn test_strikes_respects_distance_and_side() {
        let chain = ChainReaction::new(45.0);
        let east = Vec2::new(1.0, 0.0);
        let origin = Vec2::default();
        assert!(chain.strikes(origin, east, Vec2::new(40.0, 0.0)));
        assert!(!chain.strikes(origin, east, Vec2::new(60.0, 0.0)));
        assert!(!chain.strikes(origin, east, Vec2::new(-40.0, 0.0)));
        assert!(!chain.strikes(origin, east, Vec2::new(0.0, 30.0)));
    }

    #[test]
    fn test_settled_chain() {
        let (board, sources) = line(&[0.0, 40.0, 80.0, 140.0]);
        let engine = PropagationEngine::new(AdjacencyResolver::new(2.0));
        let o = engine.propagate(&board, &sources, &ChainReaction::new(45.0));

        assert!(o.reached(PieceId(0)));
        assert!(o.reached(PieceId(1)));
        assert!(o.reached(PieceId(2)));
        assert!(!o.reached(PieceId(3)), "60 units is out of reach");
        assert_eq!(o.get(PieceId(1)), Outcome::Falling(Some(Vec2::new(1.0, 0.0))));
    }

    #[test]
    fn test_struck_domino_falls_away_from_striker() {
        let mut b = LevelBuilder::new(1, "flip", Topology::Proximity);
        let s = b.add(LevelPiece::domino(Vec2::new(0.0, 0.0), DominoSpec::new(0.0, 40.0)));
        // Faces -x but sits on the +x side, so it must fall toward +x.
        let other = b.add(LevelPiece::domino(
            Vec2::new(30.0, 0.0),
            DominoSpec::new(std::f64::consts::PI, 40.0),
        ));
        let level = b
            .with_source(s)
            .with_goal(Goal::ChainReaction { required: vec![], zones: vec![] })
            .build()
            .unwrap();
        let board = Board::from_level(&level);

        let dir = ChainReaction::fall_direction(board.piece(other), Vec2::default());
        assert!(dir.x > 0.99);
    }
}
