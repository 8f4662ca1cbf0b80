//! Propagation: deriving network state from the sources.
//!
//! One engine, three interchangeable strategies:
//!
//! - [`Reachability`]: boolean reached/not-reached over grid edges
//!   (circuits, pipes, hex tiles).
//! - [`SignedRatio`]: gear velocities, sign flipped and scaled by the
//!   tooth ratio at every mesh.
//! - [`ChainReaction`]: which dominoes fall, and in which direction.
//!   Run synchronously it yields the settled result; the
//!   [`DominoRun`](crate::schedule::DominoRun) scheduler drives the
//!   same successor rule one step per tick.
//!
//! Every pass starts from scratch: all transient state is reset and only
//! the sources keep their seeded outcome.
//!
//! ## Example
//!
//! ```
//! use netpuzzle::adjacency::AdjacencyResolver;
//! use netpuzzle::core::{Board, Connectors, Goal, GridPos, LevelBuilder, LevelPiece, PieceKind, Topology};
//! use netpuzzle::propagation::{PropagationEngine, Reachability};
//!
//! let mut b = LevelBuilder::new(1, "pair", Topology::square(2, 1));
//! let s = b.add(LevelPiece::tile(PieceKind::Source, GridPos::new(0, 0), Connectors::square(false, true, false, false)));
//! let t = b.add(LevelPiece::tile(PieceKind::Target, GridPos::new(1, 0), Connectors::square(false, false, false, true)));
//! let level = b.with_source(s).with_goal(Goal::Reachability { targets: vec![t] }).build().unwrap();
//!
//! let board = Board::from_level(&level);
//! let engine = PropagationEngine::new(AdjacencyResolver::new(2.0));
//! let outcomes = engine.propagate(&board, &level.sources, &Reachability);
//! assert!(outcomes.reached(t));
//! ```

mod chain;
mod engine;
mod ratio;
mod reachability;

pub use chain::ChainReaction;
pub use engine::{PropagationEngine, Traversal};
pub use ratio::SignedRatio;
pub use reachability::Reachability;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, Piece, PieceId, Vec2};

/// Per-piece network annotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Boolean reachability.
    Reached(bool),
    /// Signed propagated value (gear velocity).
    Value(f64),
    /// Fall direction, `None` while standing.
    Falling(Option<Vec2>),
}

impl Outcome {
    /// Whether the signal arrived at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match *self {
            Outcome::Reached(r) => r,
            Outcome::Value(v) => v != 0.0,
            Outcome::Falling(d) => d.is_some(),
        }
    }

    /// Numeric view: 1/0 for booleans, the value for ratios.
    #[must_use]
    pub fn value(&self) -> f64 {
        match *self {
            Outcome::Value(v) => v,
            _ => {
                if self.is_active() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Successor list produced by a strategy for one parent.
pub type Successors = SmallVec<[(PieceId, Outcome); 8]>;

/// Propagation semantics.
///
/// The engine owns the traversal (queue, visited set, reset); a strategy
/// only says what the sources start with, what everything else resets
/// to, and which pieces a parent passes the signal to.
pub trait PropagationStrategy {
    /// Name for logging.
    fn name(&self) -> &'static str;

    /// Outcome every non-source piece is reset to before a pass.
    fn rest(&self) -> Outcome;

    /// Outcome seeded at a source.
    fn seed(&self, board: &Board, source: &Piece) -> Outcome;

    /// Pieces `parent` propagates to, with the outcome each receives.
    ///
    /// The engine discards successors that were already visited.
    fn successors(
        &self,
        board: &Board,
        resolver: &AdjacencyResolver,
        parent: &Piece,
        outcome: Outcome,
        out: &mut Successors,
    );
}

/// Result of one propagation pass: an outcome for every piece.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcomes {
    values: Vec<Outcome>,
    order: Vec<PieceId>,
}

impl Outcomes {
    /// Every piece at `rest`, nothing visited.
    #[must_use]
    pub fn at_rest(len: usize, rest: Outcome) -> Self {
        Self {
            values: vec![rest; len],
            order: Vec::new(),
        }
    }

    /// Outcome for `id`. Unknown ids read as unreached.
    #[must_use]
    pub fn get(&self, id: PieceId) -> Outcome {
        self.values
            .get(id.index())
            .copied()
            .unwrap_or(Outcome::Reached(false))
    }

    pub(crate) fn set(&mut self, id: PieceId, outcome: Outcome) {
        self.values[id.index()] = outcome;
        self.order.push(id);
    }

    /// Whether the signal reached `id`.
    #[must_use]
    pub fn reached(&self, id: PieceId) -> bool {
        self.get(id).is_active()
    }

    /// Propagated value at `id` (0 when unreached).
    #[must_use]
    pub fn value(&self, id: PieceId) -> f64 {
        self.get(id).value()
    }

    /// Pieces in the order the traversal first visited them.
    #[must_use]
    pub fn visit_order(&self) -> &[PieceId] {
        &self.order
    }

    /// Ids whose outcome is active, ascending.
    #[must_use]
    pub fn active_ids(&self) -> Vec<PieceId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_active())
            .map(|(i, _)| PieceId(i as u32))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
