//! Staged reveal of a reachability result.
//!
//! The network is solved synchronously; the reveal only decides which
//! reached pieces the renderer shows as filled so far. Each new
//! propagation restarts the reveal under a fresh generation, so nodes
//! queued for the previous layout never light up in the new one.

use rustc_hash::FxHashSet;

use crate::core::PieceId;
use crate::propagation::{Outcome, Outcomes};

use super::scheduler::{Generation, StepScheduler};

/// Node-by-node flow reveal with a fixed per-node delay.
#[derive(Clone, Debug)]
pub struct FlowReveal {
    scheduler: StepScheduler,
    delay: u64,
    revealed: FxHashSet<PieceId>,
}

impl FlowReveal {
    /// `delay` ticks separate consecutive nodes. 0 reveals everything
    /// immediately.
    pub fn new(delay: u32) -> Self {
        Self {
            scheduler: StepScheduler::new(),
            delay: delay as u64,
            revealed: FxHashSet::default(),
        }
    }

    /// Restart the reveal for a new propagation result.
    ///
    /// Nodes are shown in traversal order; the first is shown at once.
    pub fn restart(&mut self, outcomes: &Outcomes) -> Generation {
        let generation = self.scheduler.reset();
        self.revealed.clear();
        for (i, &id) in outcomes.visit_order().iter().enumerate() {
            self.scheduler.schedule(id, Outcome::Reached(true), i as u64 * self.delay);
        }
        self.apply_due();
        generation
    }

    /// Forget everything; outstanding steps become stale.
    pub fn cancel(&mut self) {
        self.scheduler.reset();
        self.revealed.clear();
    }

    /// Advance one tick. Returns how many nodes were revealed.
    pub fn tick(&mut self) -> usize {
        let due = self.scheduler.tick();
        let n = due.len();
        self.revealed.extend(due.into_iter().map(|s| s.piece));
        n
    }

    fn apply_due(&mut self) {
        let due = self.scheduler.drain_due();
        self.revealed.extend(due.into_iter().map(|s| s.piece));
    }

    #[must_use]
    pub fn is_revealed(&self, id: PieceId) -> bool {
        self.revealed.contains(&id)
    }

    /// Whether every scheduled node has been shown.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scheduler.is_idle()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.scheduler.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(ids: &[u32], len: usize) -> Outcomes {
        let mut o = Outcomes::at_rest(len, Outcome::Reached(false));
        for &i in ids {
            o.set(PieceId(i), Outcome::Reached(true));
        }
        o
    }

    #[test]
    fn test_reveals_one_node_per_delay() {
        let mut reveal = FlowReveal::new(2);
        reveal.restart(&chain(&[0, 1, 2], 3));

        assert!(reveal.is_revealed(PieceId(0)));
        assert!(!reveal.is_revealed(PieceId(1)));

        reveal.tick();
        assert!(!reveal.is_revealed(PieceId(1)));
        reveal.tick();
        assert!(reveal.is_revealed(PieceId(1)));
        assert!(!reveal.is_complete());

        reveal.tick();
        reveal.tick();
        assert!(reveal.is_revealed(PieceId(2)));
        assert!(reveal.is_complete());
    }

    #[test]
    fn test_zero_delay_reveals_all() {
        let mut reveal = FlowReveal::new(0);
        reveal.restart(&chain(&[0, 1, 2], 3));
        assert!((0..3).all(|i| reveal.is_revealed(PieceId(i))));
        assert!(reveal.is_complete());
    }

    #[test]
    fn test_restart_drops_previous_layout() {
        let mut reveal = FlowReveal::new(1);
        reveal.restart(&chain(&[0, 1, 2], 4));
        let old = reveal.generation();

        // The network changed: piece 3 now follows piece 0 instead.
        reveal.restart(&chain(&[0, 3], 4));
        assert_ne!(reveal.generation(), old);

        reveal.tick();
        reveal.tick();
        assert!(reveal.is_revealed(PieceId(3)));
        assert!(!reveal.is_revealed(PieceId(1)));
        assert!(!reveal.is_revealed(PieceId(2)));
    }

    #[test]
    fn test_cancel() {
        let mut reveal = FlowReveal::new(1);
        reveal.restart(&chain(&[0, 1], 2));
        reveal.cancel();
        reveal.tick();
        assert!(!reveal.is_revealed(PieceId(1)));
        assert!(reveal.is_complete());
    }
}
