//! HUD-facing progress events.

use serde::{Deserialize, Serialize};

use crate::core::LevelId;
use crate::rules::Status;

/// Emitted on every state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: LevelId,
    pub moves: u32,
    pub status: Status,
}

/// Receives progress events from the engine.
///
/// Closures taking `&Progress` implement this directly.
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress),
{
    fn on_progress(&mut self, progress: &Progress) {
        self(progress)
    }
}
