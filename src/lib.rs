//! # netpuzzle
//!
//! A network-propagation puzzle core: pieces with connectors on a grid
//! or in free space, player actions that rotate, toggle, drag or push
//! them, and the question of which pieces a signal from the sources
//! reaches.
//!
//! ## Design Principles
//!
//! 1. **Recompute, never patch**: every mutation re-runs a full
//!    propagation pass. Puzzle graphs are small; O(V + E) per action is
//!    cheap and there is no incremental state to get wrong.
//!
//! 2. **One engine, many semantics**: boolean reachability, signed
//!    ratios and chain reactions are strategies behind one
//!    `PropagationEngine`, not per-game copies of the same BFS.
//!
//! 3. **Explicit time**: staged effects (flow reveal, falling dominoes)
//!    advance once per `tick()` and carry a generation token, so nothing
//!    queued for a torn-down attempt can touch the next one.
//!
//! ## Modules
//!
//! - `core`: ids, geometry, topologies, pieces, levels, the live board,
//!   configuration, errors
//! - `adjacency`: edge validity on grids and gear meshing in free space
//! - `propagation`: the traversal engine and its strategies
//! - `rules`: goal predicates and lifecycle status
//! - `schedule`: generation-gated step scheduling for staged propagation
//! - `engine`: `PuzzleEngine`, the session a host drives
//! - `variants`: level builders for circuits, pipes, hex tiles, gears
//!   and dominoes

pub mod core;
pub mod adjacency;
pub mod propagation;
pub mod rules;
pub mod schedule;
pub mod engine;
pub mod variants;

// Re-export commonly used types
pub use crate::core::{
    PieceId, LevelId,
    GridPos, Position, Vec2,
    Direction, Topology, Connectors,
    Piece, PieceKind, AuxState, GearSpec, DominoSpec,
    Level, LevelBuilder, LevelPiece, Goal, NetworkMode, SpinTarget, TargetZone,
    Board, EngineConfig, PuzzleRng, LevelError,
};

pub use crate::adjacency::{AdjacencyResolver, Edge, Gate, OpenGate, StandardGate};

pub use crate::propagation::{
    Outcome, Outcomes, PropagationEngine, PropagationStrategy, Traversal,
    Reachability, SignedRatio, ChainReaction,
};

pub use crate::rules::{Status, WinEvaluator};

pub use crate::schedule::{DominoRun, FlowReveal, Generation, ScheduledStep, StepScheduler};

pub use crate::engine::{PieceView, Progress, ProgressObserver, PuzzleEngine, Snapshot};
