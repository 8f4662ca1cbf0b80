//! Goal predicates.
//!
//! The evaluator is consulted after every propagation pass. It never
//! mutates anything; the controller decides what a `true` means for the
//! status (terminal `Won`, or re-evaluated alignment).

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, Goal, PieceId, PieceKind, SpinTarget, TargetZone};
use crate::propagation::{Outcome, Outcomes};

/// Velocity match tolerance for spin targets.
const VELOCITY_EPSILON: f64 = 1e-9;

/// Applies a level's goal to the propagated state.
#[derive(Clone, Debug)]
pub struct WinEvaluator {
    goal: Goal,
}

impl WinEvaluator {
    #[must_use]
    pub fn new(goal: Goal) -> Self {
        Self { goal }
    }

    #[must_use]
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Whether the goal holds.
    ///
    /// Chain-reaction goals must only be asked once the chain has settled.
    #[must_use]
    pub fn is_solved(&self, board: &Board, outcomes: &Outcomes, resolver: &AdjacencyResolver) -> bool {
        match &self.goal {
            Goal::Reachability { targets } => targets.iter().all(|&t| outcomes.reached(t)),
            Goal::Alignment => Self::aligned(board),
            Goal::FullNetwork => resolver.dangling_connectors(board) == 0,
            Goal::Spin { targets } => targets.iter().all(|t| Self::spinning(t, outcomes)),
            Goal::ChainReaction { required, zones } => {
                Self::all_fallen(board, required, outcomes)
                    && zones.iter().all(|z| Self::zone_touched(board, z, outcomes))
            }
        }
    }

    fn aligned(board: &Board) -> bool {
        board.iter().all(|p| p.is_aligned().unwrap_or(true))
    }

    fn spinning(target: &SpinTarget, outcomes: &Outcomes) -> bool {
        let v = outcomes.value(target.piece);
        match target.velocity {
            Some(required) => (v - required).abs() < VELOCITY_EPSILON,
            None => v != 0.0,
        }
    }

    fn all_fallen(board: &Board, required: &[PieceId], outcomes: &Outcomes) -> bool {
        if required.is_empty() {
            board
                .iter()
                .filter(|p| p.kind == PieceKind::Domino)
                .all(|p| outcomes.reached(p.id))
        } else {
            required.iter().all(|&id| outcomes.reached(id))
        }
    }

    /// A zone is touched by the base or tip of any fallen domino.
    fn zone_touched(board: &Board, zone: &TargetZone, outcomes: &Outcomes) -> bool {
        board.iter().any(|p| {
            let (Outcome::Falling(Some(dir)), Some(base), Some(spec)) =
                (outcomes.get(p.id), p.point(), p.aux.domino)
            else {
                return false;
            };
            let tip = base.add(dir.scale(spec.length));
            zone.contains(base) || zone.contains(tip)
        })
    }
}
