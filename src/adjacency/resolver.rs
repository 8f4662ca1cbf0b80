//! Edge validity for grid and proximity topologies.

use smallvec::SmallVec;

use crate::core::{Board, Direction, Piece, PieceId};

use super::gate::{Gate, StandardGate};
use super::Edge;

/// Decides whether two pieces form a valid edge.
///
/// Nothing is cached. Every query reads the current rotation, switch
/// state and position, which is what makes full recomputation after
/// each mutation correct.
pub struct AdjacencyResolver {
    gate: Box<dyn Gate>,
    mesh_tolerance: f64,
}

impl AdjacencyResolver {
    /// Resolver with the standard gate.
    pub fn new(mesh_tolerance: f64) -> Self {
        Self {
            gate: Box::new(StandardGate),
            mesh_tolerance,
        }
    }

    /// Replace the gate (builder pattern).
    #[must_use]
    pub fn with_gate(mut self, gate: Box<dyn Gate>) -> Self {
        self.gate = gate;
        self
    }

    #[must_use]
    pub fn mesh_tolerance(&self) -> f64 {
        self.mesh_tolerance
    }

    /// Grid rule: both facing sides carry a connector and the gate agrees.
    #[must_use]
    pub fn connects(&self, a: &Piece, dir_a_to_b: Direction, b: &Piece, dir_b_to_a: Direction) -> bool {
        a.effective_connectors().has(dir_a_to_b)
            && b.effective_connectors().has(dir_b_to_a)
            && self.gate.allows(a, b)
    }

    /// Proximity rule: two gears mesh when their rims touch within tolerance.
    #[must_use]
    pub fn meshes(&self, a: &Piece, b: &Piece) -> bool {
        if a.id == b.id {
            return false;
        }
        match (a.point(), a.radius(), b.point(), b.radius()) {
            (Some(pa), Some(ra), Some(pb), Some(rb)) => {
                (pa.distance(pb) - (ra + rb)).abs() < self.mesh_tolerance
            }
            _ => false,
        }
    }

    /// Valid grid edges leaving `id`.
    #[must_use]
    pub fn grid_edges(&self, board: &Board, id: PieceId) -> SmallVec<[Edge; 6]> {
        let a = board.piece(id);
        board
            .grid_neighbors(id)
            .into_iter()
            .filter(|&(other, dir, back)| self.connects(a, dir, board.piece(other), back))
            .map(|(other, dir, back)| Edge {
                from: id,
                to: other,
                dir_from: dir,
                dir_to: back,
            })
            .collect()
    }

    /// Gears meshing with `id`, checked against every other piece.
    #[must_use]
    pub fn mesh_partners(&self, board: &Board, id: PieceId) -> SmallVec<[PieceId; 8]> {
        let a = board.piece(id);
        board
            .iter()
            .filter(|b| self.meshes(a, b))
            .map(|b| b.id)
            .collect()
    }

    /// Count connectors that do not form a valid edge: pointing off the
    /// board, at an empty cell, at a side without a connector, or
    /// blocked by the gate.
    #[must_use]
    pub fn dangling_connectors(&self, board: &Board) -> usize {
        let topology = board.topology();
        let mut dangling = 0;
        for piece in board.iter() {
            let Some(cell) = piece.position.cell() else {
                continue;
            };
            for dir in piece.effective_connectors().sides() {
                let there = topology.step(cell, dir);
                let linked = board.piece_at(there).is_some_and(|other| {
                    self.connects(piece, dir, board.piece(other), topology.opposite(dir))
                });
                if !linked {
                    dangling += 1;
                }
            }
        }
        dangling
    }
}
