//! The puzzle session a host drives.
//!
//! `PuzzleEngine` is constructed per level and passed by reference to
//! input and render code; there is no global puzzle state. It turns
//! player actions into piece mutations, re-runs propagation from
//! scratch after each one, and reports through `Snapshot` (every frame)
//! and `Progress` (every state change).

mod controller;
mod progress;
mod snapshot;

pub use controller::PuzzleEngine;
pub use progress::{Progress, ProgressObserver};
pub use snapshot::{PieceView, Snapshot};
