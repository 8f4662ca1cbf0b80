//! Connector-bearing pieces.
//!
//! A `Piece` is the live, engine-owned instance of a level piece. Its
//! connectors never change; only `rotation_steps` does, and the
//! effective connector set is derived on demand:
//!
//! ```text
//! effective_connectors = rotate(base_connectors, rotation_steps)
//! ```
//!
//! Pieces are mutated only through the engine. Hosts see them through
//! the render snapshot.

use serde::{Deserialize, Serialize};

use super::connectors::Connectors;
use super::geometry::{Position, Vec2};
use super::id::PieceId;

/// What role a piece plays in the network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Emits the signal (power, water, drive).
    Source,
    /// Must receive the signal for reachability goals.
    Target,
    /// Plain rotatable tile (wire, pipe, hex link).
    Normal,
    /// Tile whose edges only conduct while switched on.
    Switch,
    /// Meshing gear in a proximity topology.
    Gear,
    /// Domino in a chain reaction.
    Domino,
}

impl PieceKind {
    /// Kinds that can never be rotated by the player.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, PieceKind::Source | PieceKind::Target)
    }
}

/// Gear geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GearSpec {
    pub teeth: u32,
    pub radius: f64,
}

impl GearSpec {
    #[must_use]
    pub const fn new(teeth: u32, radius: f64) -> Self {
        Self { teeth, radius }
    }
}

/// Domino geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DominoSpec {
    /// Axis the domino topples along, in radians (0 = +x).
    pub facing: f64,
    /// Height of the domino; a fallen domino's tip lies this far from its base.
    pub length: f64,
}

impl DominoSpec {
    #[must_use]
    pub const fn new(facing: f64, length: f64) -> Self {
        Self { facing, length }
    }

    /// Unit vector along `facing`.
    #[must_use]
    pub fn axis(&self) -> Vec2 {
        Vec2::from_angle(self.facing)
    }
}

/// Variant-specific per-piece state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuxState {
    /// Switch position. Only meaningful for `PieceKind::Switch`.
    pub switch_on: bool,
    /// Pipe channel. Two pieces with different channels never connect.
    pub channel: Option<u8>,
    pub gear: Option<GearSpec>,
    pub domino: Option<DominoSpec>,
}

/// A live piece on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub position: Position,
    base_connectors: Connectors,
    rotation_steps: u8,
    /// Level-fixed: rejects rotation and dragging.
    pub locked: bool,
    pub aux: AuxState,
    /// Required rotation for alignment goals.
    pub target_rotation: Option<u8>,
    /// Display angle in degrees (gear spin, domino fall).
    pub angle: f64,
}

impl Piece {
    /// Create a piece. `rotation_steps` is reduced modulo `D`.
    #[must_use]
    pub fn new(id: PieceId, kind: PieceKind, position: Position, base_connectors: Connectors) -> Self {
        Self {
            id,
            kind,
            position,
            base_connectors,
            rotation_steps: 0,
            locked: false,
            aux: AuxState::default(),
            target_rotation: None,
            angle: 0.0,
        }
    }

    /// Set the initial rotation (builder pattern).
    #[must_use]
    pub fn with_rotation(mut self, steps: u8) -> Self {
        let d = self.direction_count();
        self.rotation_steps = if d == 0 { 0 } else { (steps as usize % d) as u8 };
        self
    }

    /// Mark the piece as level-fixed (builder pattern).
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Set the aux state (builder pattern).
    #[must_use]
    pub fn with_aux(mut self, aux: AuxState) -> Self {
        self.aux = aux;
        self
    }

    /// Set the alignment target (builder pattern).
    #[must_use]
    pub fn with_target_rotation(mut self, steps: Option<u8>) -> Self {
        self.target_rotation = steps;
        self
    }

    /// Number of discrete directions, 0 for proximity pieces.
    #[must_use]
    pub fn direction_count(&self) -> usize {
        self.base_connectors.len()
    }

    #[must_use]
    pub fn base_connectors(&self) -> &Connectors {
        &self.base_connectors
    }

    #[must_use]
    pub fn rotation_steps(&self) -> u8 {
        self.rotation_steps
    }

    /// Connectors after applying the current rotation.
    #[must_use]
    pub fn effective_connectors(&self) -> Connectors {
        self.base_connectors.rotated(self.rotation_steps as usize)
    }

    /// Whether the player may rotate or drag this piece.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked || self.kind.is_fixed()
    }

    /// Rotate by `steps`, wrapping at `D`.
    ///
    /// Locked pieces and pieces without discrete directions ignore the
    /// request. Returns whether the rotation was applied.
    pub fn rotate(&mut self, steps: usize) -> bool {
        let d = self.direction_count();
        if self.is_locked() || d == 0 {
            return false;
        }
        self.rotation_steps = ((self.rotation_steps as usize + steps) % d) as u8;
        true
    }

    /// Whether the piece matches its alignment target, if it has one.
    #[must_use]
    pub fn is_aligned(&self) -> Option<bool> {
        self.target_rotation.map(|t| t == self.rotation_steps)
    }

    /// Center point for proximity pieces.
    #[must_use]
    pub fn point(&self) -> Option<Vec2> {
        self.position.point()
    }

    #[must_use]
    pub fn teeth(&self) -> Option<u32> {
        self.aux.gear.map(|g| g.teeth)
    }

    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        self.aux.gear.map(|g| g.radius)
    }
}
