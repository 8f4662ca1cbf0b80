//! Time-stepped domino chain reaction.
//!
//! A pushed domino starts falling immediately. Each falling domino
//! strikes its neighbours `fall_ticks` ticks after it started, on the
//! tick its fall completes; struck dominoes start falling on that same
//! tick. The run has settled once no strike is pending, which also
//! means every falling domino has finished its fall.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::adjacency::AdjacencyResolver;
use crate::core::{Board, PieceId, Vec2};
use crate::propagation::{ChainReaction, Outcome, Outcomes, PropagationStrategy, Successors};

use super::scheduler::{Generation, StepScheduler};

/// Fall state of a domino that has been knocked over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fall {
    pub direction: Vec2,
    /// Tick the fall started.
    pub started: u64,
}

/// Chain reaction driven one tick at a time.
#[derive(Clone, Debug)]
pub struct DominoRun {
    scheduler: StepScheduler,
    rule: ChainReaction,
    fall_ticks: u64,
    falls: FxHashMap<PieceId, Fall>,
    outcomes: Outcomes,
    started: bool,
}

impl DominoRun {
    pub fn new(rule: ChainReaction, fall_ticks: u32) -> Self {
        Self {
            scheduler: StepScheduler::new(),
            rule,
            fall_ticks: fall_ticks.max(1) as u64,
            falls: FxHashMap::default(),
            outcomes: Outcomes::at_rest(0, Outcome::Falling(None)),
            started: false,
        }
    }

    /// Push the source dominoes. Any previous run is invalidated.
    pub fn start(&mut self, board: &Board, sources: &[PieceId]) -> Generation {
        let generation = self.reset(board.len());
        self.started = true;
        for &source in sources {
            let seed = self.rule.seed(board, board.piece(source));
            self.knock(source, seed);
        }
        debug!(sources = sources.len(), generation = generation.0, "domino run started");
        generation
    }

    /// Invalidate outstanding strikes and stand every domino back up.
    pub fn reset(&mut self, piece_count: usize) -> Generation {
        self.falls.clear();
        self.outcomes = Outcomes::at_rest(piece_count, self.rule.rest());
        self.started = false;
        self.scheduler.reset()
    }

    fn knock(&mut self, id: PieceId, outcome: Outcome) {
        let Outcome::Falling(Some(direction)) = outcome else {
            return;
        };
        if self.scheduler.schedule(id, outcome, self.fall_ticks).is_some() {
            self.falls.insert(
                id,
                Fall {
                    direction,
                    started: self.scheduler.now(),
                },
            );
            self.outcomes.set(id, outcome);
        }
    }

    /// Advance one tick. Returns the dominoes that started falling.
    pub fn tick(&mut self, board: &Board, resolver: &AdjacencyResolver) -> Vec<PieceId> {
        let mut knocked = Vec::new();
        let mut successors = Successors::new();
        for strike in self.scheduler.tick() {
            successors.clear();
            self.rule
                .successors(board, resolver, board.piece(strike.piece), strike.outcome, &mut successors);
            for &(child, outcome) in &successors {
                if !self.scheduler.visited(child) {
                    self.knock(child, outcome);
                    knocked.push(child);
                }
            }
        }
        knocked
    }

    /// Whether the run was started and nothing is still in motion.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.started && self.scheduler.is_idle()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started && !self.scheduler.is_idle()
    }

    #[must_use]
    pub fn is_falling(&self, id: PieceId) -> bool {
        self.falls.contains_key(&id)
    }

    #[must_use]
    pub fn fall(&self, id: PieceId) -> Option<Fall> {
        self.falls.get(&id).copied()
    }

    /// Fall angle in degrees: 0 standing, 90 flat.
    #[must_use]
    pub fn fall_angle(&self, id: PieceId) -> f64 {
        match self.falls.get(&id) {
            Some(fall) => {
                let elapsed = self.scheduler.now().saturating_sub(fall.started);
                let progress = (elapsed as f64 / self.fall_ticks as f64).min(1.0);
                progress * 90.0
            }
            None => 0.0,
        }
    }

    /// Fallen/standing state accumulated so far.
    #[must_use]
    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.scheduler.generation()
    }
}
