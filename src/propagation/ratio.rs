//! Signed ratio propagation for gear trains.
//!
//! Each mesh flips the direction of rotation and scales the speed by the
//! tooth ratio:
//!
//! ```text
//! child.value = -parent.value * (parent.teeth / child.teeth)
//! ```
//!
//! ## Cyclic trains
//!
//! A gear gets its value on first visit. In a closed loop, the value of
//! the gear where two paths meet comes from whichever path the
//! breadth-first order reaches first. An odd-length loop cannot turn at
//! all in reality; this strategy does not detect that and reports the
//! first-visit value.

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, Piece};

use super::{Outcome, PropagationStrategy, Successors};

/// Gear velocity propagation from the driver(s).
#[derive(Clone, Copy, Debug)]
pub struct SignedRatio {
    /// Velocity seeded at every driver.
    pub drive: f64,
}

impl SignedRatio {
    #[must_use]
    pub const fn new(drive: f64) -> Self {
        Self { drive }
    }
}

impl Default for SignedRatio {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PropagationStrategy for SignedRatio {
    fn name(&self) -> &'static str {
        "signed-ratio"
    }

    fn rest(&self) -> Outcome {
        Outcome::Value(0.0)
    }

    fn seed(&self, _board: &Board, _source: &Piece) -> Outcome {
        Outcome::Value(self.drive)
    }

    fn successors(
        &self,
        board: &Board,
        resolver: &AdjacencyResolver,
        parent: &Piece,
        outcome: Outcome,
        out: &mut Successors,
    ) {
        let Some(parent_teeth) = parent.teeth() else {
            return;
        };
        let velocity = outcome.value();
        for child in resolver.mesh_partners(board, parent.id) {
            if let Some(child_teeth) = board.piece(child).teeth() {
                let v = -velocity * (parent_teeth as f64 / child_teeth as f64);
                out.push((child, Outcome::Value(v)));
            }
        }
    }
}
