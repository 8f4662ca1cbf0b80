//! Staged propagation driven by render ticks.
//!
//! Some variants show propagation over time: water filling a pipe
//! network node by node, dominoes toppling one after another. These run
//! as explicit step state advanced once per tick, never as
//! self-rescheduling callbacks.
//!
//! Every scheduled step captures the scheduler's [`Generation`]. A reset
//! bumps the generation, and any step still queued from before is
//! dropped as a no-op when it comes due. A step scheduled for a
//! torn-down attempt can therefore never touch the next one.
//!
//! ## Example
//!
//! ```
//! use netpuzzle::core::PieceId;
//! use netpuzzle::propagation::Outcome;
//! use netpuzzle::schedule::StepScheduler;
//!
//! let mut scheduler = StepScheduler::new();
//! let token = scheduler.schedule(PieceId(4), Outcome::Reached(true), 1).unwrap();
//!
//! scheduler.reset();
//! assert!(!scheduler.is_current(&token));
//! assert!(scheduler.tick().is_empty());
//! ```

mod domino;
mod reveal;
mod scheduler;

pub use domino::{DominoRun, Fall};
pub use reveal::FlowReveal;
pub use scheduler::{Generation, ScheduledStep, StepScheduler};
