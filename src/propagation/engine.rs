//! Full-recompute traversal shared by every strategy.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, PieceId};

use super::{Outcomes, PropagationStrategy, Successors};

/// Queue discipline of a pass.
///
/// Breadth-first is the default and defines first-visit-wins order for
/// signed ratios. Depth-first exists so reachability can be checked for
/// order independence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Traversal {
    #[default]
    BreadthFirst,
    DepthFirst,
}

/// Runs a strategy over the board from a set of sources.
///
/// Cost is O(V + E) per pass. There is no incremental state: each pass
/// rebuilds every outcome from the current pieces.
pub struct PropagationEngine {
    resolver: AdjacencyResolver,
}

impl PropagationEngine {
    pub fn new(resolver: AdjacencyResolver) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &AdjacencyResolver {
        &self.resolver
    }

    /// Breadth-first pass.
    #[must_use]
    pub fn propagate(
        &self,
        board: &Board,
        sources: &[PieceId],
        strategy: &dyn PropagationStrategy,
    ) -> Outcomes {
        self.propagate_with(board, sources, strategy, Traversal::BreadthFirst)
    }

    /// Pass with an explicit queue discipline.
    ///
    /// Every piece is reset to `strategy.rest()`, then each source is
    /// seeded and the signal spreads. A piece receives its outcome on
    /// first visit and is never enqueued twice.
    #[must_use]
    pub fn propagate_with(
        &self,
        board: &Board,
        sources: &[PieceId],
        strategy: &dyn PropagationStrategy,
        traversal: Traversal,
    ) -> Outcomes {
        let mut outcomes = Outcomes::at_rest(board.len(), strategy.rest());
        let mut visited: FxHashSet<PieceId> = FxHashSet::default();
        let mut queue = VecDeque::new();

        for &source in sources {
            if visited.insert(source) {
                let seed = strategy.seed(board, board.piece(source));
                outcomes.set(source, seed);
                queue.push_back((source, seed));
            }
        }

        let mut successors = Successors::new();
        loop {
            let next = match traversal {
                Traversal::BreadthFirst => queue.pop_front(),
                Traversal::DepthFirst => queue.pop_back(),
            };
            let Some((id, outcome)) = next else {
                break;
            };

            successors.clear();
            strategy.successors(board, &self.resolver, board.piece(id), outcome, &mut successors);
            for &(child, child_outcome) in &successors {
                if visited.insert(child) {
                    outcomes.set(child, child_outcome);
                    queue.push_back((child, child_outcome));
                }
            }
        }

        debug!(
            strategy = strategy.name(),
            sources = sources.len(),
            visited = visited.len(),
            "propagation pass"
        );
        outcomes
    }
}
