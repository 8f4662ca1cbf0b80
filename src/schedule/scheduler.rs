//! Generation-gated step queue.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::PieceId;
use crate::propagation::Outcome;

/// Epoch token. Bumped on every reset; steps carrying an older
/// generation are discarded instead of applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A deferred propagation step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledStep {
    /// Generation the step was scheduled under.
    pub generation: Generation,
    /// Tick on which the step becomes due.
    pub due: u64,
    pub piece: PieceId,
    pub outcome: Outcome,
}

/// Cooperative step scheduler advanced once per render tick.
///
/// Holds its own queue and visited set; nothing here ever calls back on
/// its own. The clock only moves in `tick()`, and the clock keeps
/// running across resets so stale steps keep their place in the queue
/// until they are drained and dropped.
#[derive(Clone, Debug, Default)]
pub struct StepScheduler {
    generation: Generation,
    now: u64,
    pending: VecDeque<ScheduledStep>,
    visited: FxHashSet<PieceId>,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Current tick.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Whether `step` belongs to the current generation.
    #[must_use]
    pub fn is_current(&self, step: &ScheduledStep) -> bool {
        step.generation == self.generation
    }

    /// Whether `piece` was already scheduled this generation.
    #[must_use]
    pub fn visited(&self, piece: PieceId) -> bool {
        self.visited.contains(&piece)
    }

    /// No current-generation step is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.pending.iter().any(|s| self.is_current(s))
    }

    /// Number of steps waiting, stale ones included.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Schedule `piece` to run `delay` ticks from now.
    ///
    /// A piece is scheduled at most once per generation; later requests
    /// return `None`. The returned step is the token a host may hold.
    pub fn schedule(&mut self, piece: PieceId, outcome: Outcome, delay: u64) -> Option<ScheduledStep> {
        if !self.visited.insert(piece) {
            return None;
        }
        let step = ScheduledStep {
            generation: self.generation,
            due: self.now + delay,
            piece,
            outcome,
        };
        let at = self.pending.partition_point(|s| s.due <= step.due);
        self.pending.insert(at, step);
        Some(step)
    }

    /// Advance the clock one tick and return the steps now due.
    pub fn tick(&mut self) -> Vec<ScheduledStep> {
        self.now += 1;
        self.drain_due()
    }

    /// Remove and return every current step due by now, in due order.
    /// Stale steps are dropped.
    pub fn drain_due(&mut self) -> Vec<ScheduledStep> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|s| s.due <= self.now) {
            let Some(step) = self.pending.pop_front() else {
                break;
            };
            if self.is_current(&step) {
                due.push(step);
            } else {
                trace!(piece = %step.piece, generation = step.generation.0, "discarding stale step");
            }
        }
        due
    }

    /// Invalidate every outstanding step and forget visited pieces.
    pub fn reset(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.visited.clear();
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: Outcome = Outcome::Reached(true);

    #[test]
    fn test_schedule_once_per_generation() {
        let mut s = StepScheduler::new();
        assert!(s.schedule(PieceId(1), ON, 0).is_some());
        assert!(s.schedule(PieceId(1), ON, 0).is_none());
        assert!(s.visited(PieceId(1)));
        assert_eq!(s.pending_len(), 1);
    }

    #[test]
    fn test_tick_releases_due_steps_in_order() {
        let mut s = StepScheduler::new();
        s.schedule(PieceId(3), ON, 2);
        s.schedule(PieceId(1), ON, 1);
        s.schedule(PieceId(2), ON, 1);

        assert!(s.drain_due().is_empty());
        let first: Vec<_> = s.tick().iter().map(|st| st.piece).collect();
        assert_eq!(first, vec![PieceId(1), PieceId(2)]);
        let second: Vec<_> = s.tick().iter().map(|st| st.piece).collect();
        assert_eq!(second, vec![PieceId(3)]);
        assert!(s.is_idle());
    }

    #[test]
    fn test_reset_discards_in_flight_steps() {
        let mut s = StepScheduler::new();
        let token = s.schedule(PieceId(1), ON, 1).unwrap();
        assert!(s.is_current(&token));
        assert!(!s.is_idle());

        s.reset();
        assert!(!s.is_current(&token));
        assert!(s.is_idle());
        assert!(s.tick().is_empty(), "stale step must be a no-op");
        assert_eq!(s.pending_len(), 0);
    }

    #[test]
    fn test_reset_allows_rescheduling() {
        let mut s = StepScheduler::new();
        s.schedule(PieceId(1), ON, 5);
        let g = s.reset();
        assert_eq!(g, Generation(1));

        let fresh = s.schedule(PieceId(1), ON, 1).unwrap();
        assert_eq!(fresh.generation, Generation(1));
        let due = s.tick();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].generation, Generation(1));
    }
}
