//! Core puzzle types: ids, geometry, topology, pieces, levels, board,
//! configuration, RNG and errors.
//!
//! This module contains the variant-agnostic building blocks. Variants
//! configure these through `Level` content rather than modifying them.

pub mod id;
pub mod geometry;
pub mod topology;
pub mod connectors;
pub mod piece;
pub mod level;
pub mod board;
pub mod config;
pub mod rng;
pub mod error;

pub use id::{LevelId, PieceId};
pub use geometry::{GridPos, Position, Vec2};
pub use topology::{Direction, Topology};
pub use connectors::Connectors;
pub use piece::{AuxState, DominoSpec, GearSpec, Piece, PieceKind};
pub use level::{Goal, Level, LevelBuilder, LevelPiece, NetworkMode, SpinTarget, TargetZone};
pub use board::{Board, GridNeighbor};
pub use config::EngineConfig;
pub use rng::PuzzleRng;
pub use error::{LevelError, Result};
