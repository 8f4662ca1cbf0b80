//! Adjacency: which pairs of pieces form a valid edge.
//!
//! ## Grid topologies
//!
//! ```text
//! connects(a, dir, b, opposite(dir)) =
//!     a.effective[dir] && b.effective[opposite(dir)] && gate(a, b)
//! ```
//!
//! ## Proximity topologies
//!
//! ```text
//! meshes(a, b) = |distance(a, b) - (a.radius + b.radius)| < tolerance
//! ```
//!
//! Edges are derived on demand and never stored.

mod gate;
mod resolver;

pub use gate::{Gate, OpenGate, StandardGate};
pub use resolver::AdjacencyResolver;

use serde::{Deserialize, Serialize};

use crate::core::{Direction, PieceId};

/// A valid grid edge, as seen from `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: PieceId,
    pub to: PieceId,
    /// Side of `from` facing `to`.
    pub dir_from: Direction,
    /// Side of `to` facing `from`.
    pub dir_to: Direction,
}
