//! Puzzle lifecycle status.

use serde::{Deserialize, Serialize};

/// Where an attempt is in its lifecycle.
///
/// ```text
/// Setup -> Playing -> Resolving -> Won | Failed
///             ^                        |
///             +------- reset() --------+
/// ```
///
/// Grid variants pass through `Resolving` within a single call; domino
/// chains stay there until the reaction settles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Level validated, pieces not yet live.
    #[default]
    Setup,
    /// Accepting player actions.
    Playing,
    /// Propagation in progress; player actions are ignored.
    Resolving,
    Won,
    /// Chain reaction settled without meeting the goal.
    Failed,
}

impl Status {
    /// Whether player actions are accepted.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Status::Playing)
    }

    /// Whether the attempt is over until reset.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Status::Won | Status::Failed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Setup => "setup",
            Status::Playing => "playing",
            Status::Resolving => "resolving",
            Status::Won => "won",
            Status::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_playing_accepts_input() {
        assert!(Status::Playing.accepts_input());
        for s in [Status::Setup, Status::Resolving, Status::Won, Status::Failed] {
            assert!(!s.accepts_input(), "{} should ignore input", s);
        }
    }

    #[test]
    fn test_finished() {
        assert!(Status::Won.is_finished());
        assert!(Status::Failed.is_finished());
        assert!(!Status::Resolving.is_finished());
        assert_eq!(Status::default(), Status::Setup);
    }
}
