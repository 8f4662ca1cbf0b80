//! Level templates.
//!
//! A `Level` is immutable content: topology, piece placements, the
//! source set, and the goal. The engine instantiates live pieces from it
//! at setup and again on every reset. Nothing mutates a `Level` after
//! `validate()` has accepted it.
//!
//! ## Example
//!
//! ```
//! use netpuzzle::core::{Connectors, Goal, GridPos, LevelBuilder, LevelPiece, PieceKind, Topology};
//!
//! let mut builder = LevelBuilder::new(1, "first light", Topology::square(3, 1));
//! let power = builder.add(LevelPiece::tile(
//!     PieceKind::Source,
//!     GridPos::new(0, 0),
//!     Connectors::square(false, true, false, false),
//! ));
//! builder.add(LevelPiece::tile(
//!     PieceKind::Normal,
//!     GridPos::new(1, 0),
//!     Connectors::square(true, false, true, false),
//! ));
//! let bulb = builder.add(LevelPiece::tile(
//!     PieceKind::Target,
//!     GridPos::new(2, 0),
//!     Connectors::square(false, false, false, true),
//! ));
//!
//! let level = builder
//!     .with_source(power)
//!     .with_goal(Goal::Reachability { targets: vec![bulb] })
//!     .build()
//!     .unwrap();
//! assert_eq!(level.pieces.len(), 3);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::connectors::Connectors;
use super::error::{LevelError, Result};
use super::geometry::{GridPos, Position, Vec2};
use super::id::{LevelId, PieceId};
use super::piece::{AuxState, DominoSpec, GearSpec, Piece, PieceKind};
use super::rng::PuzzleRng;
use super::topology::Topology;

/// Circular area that a falling domino must touch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetZone {
    pub center: Vec2,
    pub radius: f64,
}

impl TargetZone {
    #[must_use]
    pub const fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// A gear that must be turning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinTarget {
    pub piece: PieceId,
    /// Required signed velocity. `None` accepts any non-zero velocity.
    pub velocity: Option<f64>,
}

/// Win condition of a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Goal {
    /// Every listed target is reached from the sources.
    Reachability { targets: Vec<PieceId> },
    /// Every piece with a target rotation matches it.
    Alignment,
    /// No connector anywhere is left dangling.
    FullNetwork,
    /// Every listed gear turns (with the required velocity, if any).
    Spin { targets: Vec<SpinTarget> },
    /// Once the chain settles, every required domino has fallen and
    /// every zone was touched. An empty `required` means all dominoes.
    ChainReaction {
        required: Vec<PieceId>,
        zones: Vec<TargetZone>,
    },
}

/// Which propagation semantics a level runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkMode {
    Reachability,
    SignedRatio,
    ChainReaction,
}

impl Goal {
    /// Propagation semantics implied by this goal.
    #[must_use]
    pub fn mode(&self) -> NetworkMode {
        match self {
            Goal::Spin { .. } => NetworkMode::SignedRatio,
            Goal::ChainReaction { .. } => NetworkMode::ChainReaction,
            Goal::Reachability { .. } | Goal::Alignment | Goal::FullNetwork => {
                NetworkMode::Reachability
            }
        }
    }

    /// Whether reaching `Won` ends the attempt.
    ///
    /// Alignment is re-evaluated after every rotation and may fall back
    /// to `Playing`.
    #[must_use]
    pub fn locks_on_win(&self) -> bool {
        !matches!(self, Goal::Alignment)
    }
}

/// Piece placement in a level template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelPiece {
    pub kind: PieceKind,
    pub position: Position,
    pub base_connectors: Connectors,
    #[serde(default)]
    pub initial_rotation: u8,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub aux: AuxState,
    #[serde(default)]
    pub target_rotation: Option<u8>,
}

impl LevelPiece {
    /// A grid tile.
    #[must_use]
    pub fn tile(kind: PieceKind, cell: GridPos, connectors: Connectors) -> Self {
        Self {
            kind,
            position: Position::Cell(cell),
            base_connectors: connectors,
            initial_rotation: 0,
            locked: false,
            aux: AuxState::default(),
            target_rotation: None,
        }
    }

    /// A gear at `center`.
    #[must_use]
    pub fn gear(center: Vec2, spec: GearSpec) -> Self {
        Self {
            kind: PieceKind::Gear,
            position: Position::Point(center),
            base_connectors: Connectors::none(),
            initial_rotation: 0,
            locked: false,
            aux: AuxState {
                gear: Some(spec),
                ..AuxState::default()
            },
            target_rotation: None,
        }
    }

    /// A domino standing at `base`.
    #[must_use]
    pub fn domino(base: Vec2, spec: DominoSpec) -> Self {
        Self {
            kind: PieceKind::Domino,
            position: Position::Point(base),
            base_connectors: Connectors::none(),
            initial_rotation: 0,
            locked: false,
            aux: AuxState {
                domino: Some(spec),
                ..AuxState::default()
            },
            target_rotation: None,
        }
    }

    /// Start rotated by `steps` (builder pattern).
    #[must_use]
    pub fn rotated(mut self, steps: u8) -> Self {
        self.initial_rotation = steps;
        self
    }

    /// Fix the piece in place (builder pattern).
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Restrict the piece to a pipe channel (builder pattern).
    #[must_use]
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.aux.channel = Some(channel);
        self
    }

    /// Set the initial switch position (builder pattern).
    #[must_use]
    pub fn switched(mut self, on: bool) -> Self {
        self.aux.switch_on = on;
        self
    }

    /// Require a rotation for alignment goals (builder pattern).
    #[must_use]
    pub fn with_target_rotation(mut self, steps: u8) -> Self {
        self.target_rotation = Some(steps);
        self
    }
}

fn default_drive() -> f64 {
    1.0
}

/// Immutable level template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: LevelId,
    pub name: String,
    pub topology: Topology,
    /// Pieces in id order: `pieces[i]` becomes `PieceId(i)`.
    pub pieces: Vec<LevelPiece>,
    pub sources: Vec<PieceId>,
    pub goal: Goal,
    /// Value seeded at every source for signed-ratio propagation.
    #[serde(default = "default_drive")]
    pub drive: f64,
}

impl Level {
    /// Check the level for content errors.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(LevelError::NoSources);
        }
        for &source in &self.sources {
            self.piece(source)?;
        }
        if !self.drive.is_finite() {
            return Err(LevelError::GoalMismatch(format!("drive {} is not finite", self.drive)));
        }

        let mut cells: FxHashMap<GridPos, PieceId> = FxHashMap::default();
        for (i, lp) in self.pieces.iter().enumerate() {
            let id = PieceId(i as u32);
            if self.topology.is_discrete() {
                self.validate_tile(id, lp, &mut cells)?;
            } else {
                self.validate_body(id, lp)?;
            }
        }

        self.validate_goal()
    }

    fn piece(&self, id: PieceId) -> Result<&LevelPiece> {
        self.pieces.get(id.index()).ok_or(LevelError::UnknownPiece(id))
    }

    fn validate_tile(
        &self,
        id: PieceId,
        lp: &LevelPiece,
        cells: &mut FxHashMap<GridPos, PieceId>,
    ) -> Result<()> {
        let topology = self.topology;
        if matches!(lp.kind, PieceKind::Gear | PieceKind::Domino) {
            return Err(LevelError::KindMismatch { piece: id, kind: lp.kind, topology });
        }
        let cell = lp
            .position
            .cell()
            .ok_or(LevelError::PositionMismatch { piece: id, topology })?;
        if !topology.contains(cell) {
            return Err(LevelError::OutOfBounds { piece: id, cell });
        }
        if let Some(&other) = cells.get(&cell) {
            return Err(LevelError::CellOccupied { piece: id, other, cell });
        }
        cells.insert(cell, id);

        let d = topology.direction_count();
        if lp.base_connectors.len() != d {
            return Err(LevelError::MalformedConnectors {
                piece: id,
                expected: d,
                found: lp.base_connectors.len(),
            });
        }
        for steps in std::iter::once(lp.initial_rotation).chain(lp.target_rotation) {
            if steps as usize >= d {
                return Err(LevelError::RotationOutOfRange { piece: id, steps, directions: d });
            }
        }
        Ok(())
    }

    fn validate_body(&self, id: PieceId, lp: &LevelPiece) -> Result<()> {
        let topology = self.topology;
        if !matches!(lp.kind, PieceKind::Gear | PieceKind::Domino) {
            return Err(LevelError::KindMismatch { piece: id, kind: lp.kind, topology });
        }
        if lp.position.point().is_none() {
            return Err(LevelError::PositionMismatch { piece: id, topology });
        }
        if !lp.base_connectors.is_empty() {
            return Err(LevelError::MalformedConnectors {
                piece: id,
                expected: 0,
                found: lp.base_connectors.len(),
            });
        }

        match lp.kind {
            PieceKind::Gear => {
                let gear = lp.aux.gear.ok_or(LevelError::MissingSpec { piece: id, what: "gear" })?;
                if gear.teeth == 0 {
                    return Err(LevelError::InvalidGeometry {
                        piece: id,
                        reason: "gear has no teeth".to_string(),
                    });
                }
                if !(gear.radius > 0.0) {
                    return Err(LevelError::InvalidGeometry {
                        piece: id,
                        reason: format!("gear radius {} is not positive", gear.radius),
                    });
                }
            }
            _ => {
                let domino = lp
                    .aux
                    .domino
                    .ok_or(LevelError::MissingSpec { piece: id, what: "domino" })?;
                if !(domino.length > 0.0) {
                    return Err(LevelError::InvalidGeometry {
                        piece: id,
                        reason: format!("domino length {} is not positive", domino.length),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_goal(&self) -> Result<()> {
        let discrete = self.topology.is_discrete();
        match &self.goal {
            Goal::Reachability { targets } => {
                if !discrete {
                    return Err(LevelError::GoalMismatch(
                        "reachability needs a grid topology".to_string(),
                    ));
                }
                if targets.is_empty() {
                    return Err(LevelError::GoalMismatch("no reachability targets".to_string()));
                }
                for &t in targets {
                    self.piece(t)?;
                }
            }
            Goal::Alignment => {
                if !discrete {
                    return Err(LevelError::GoalMismatch(
                        "alignment needs a grid topology".to_string(),
                    ));
                }
                if self.pieces.iter().all(|p| p.target_rotation.is_none()) {
                    return Err(LevelError::GoalMismatch(
                        "no piece has a target rotation".to_string(),
                    ));
                }
            }
            Goal::FullNetwork => {
                if !discrete {
                    return Err(LevelError::GoalMismatch(
                        "full network needs a grid topology".to_string(),
                    ));
                }
            }
            Goal::Spin { targets } => {
                if targets.is_empty() {
                    return Err(LevelError::GoalMismatch("no spin targets".to_string()));
                }
                self.expect_kind(&self.sources, PieceKind::Gear)?;
                let ids: Vec<PieceId> = targets.iter().map(|t| t.piece).collect();
                self.expect_kind(&ids, PieceKind::Gear)?;
            }
            Goal::ChainReaction { required, zones } => {
                self.expect_kind(&self.sources, PieceKind::Domino)?;
                self.expect_kind(required, PieceKind::Domino)?;
                if let Some(zone) = zones.iter().find(|z| !(z.radius > 0.0)) {
                    return Err(LevelError::GoalMismatch(format!(
                        "target zone radius {} is not positive",
                        zone.radius
                    )));
                }
            }
        }
        Ok(())
    }

    fn expect_kind(&self, ids: &[PieceId], kind: PieceKind) -> Result<()> {
        for &id in ids {
            let lp = self.piece(id)?;
            if lp.kind != kind {
                return Err(LevelError::GoalMismatch(format!(
                    "{} is {:?}, expected {:?}",
                    id, lp.kind, kind
                )));
            }
        }
        Ok(())
    }

    /// Copy of this level with every rotatable tile at a random rotation.
    ///
    /// Locked tiles, sources and targets keep their authored rotation.
    #[must_use]
    pub fn scrambled(&self, seed: u64) -> Level {
        let mut rng = PuzzleRng::new(seed);
        let d = self.topology.direction_count();
        let mut level = self.clone();
        for (i, lp) in level.pieces.iter_mut().enumerate() {
            let is_source = self.sources.contains(&PieceId(i as u32));
            if d > 0 && !lp.locked && !lp.kind.is_fixed() && !is_source {
                lp.initial_rotation = rng.rotation(d);
            }
        }
        level
    }

    /// Create the live pieces for a fresh attempt.
    ///
    /// Sources are locked for the lifetime of the level.
    #[must_use]
    pub fn instantiate(&self) -> Vec<Piece> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, lp)| {
                let id = PieceId(i as u32);
                let locked = lp.locked || self.sources.contains(&id);
                Piece::new(id, lp.kind, lp.position, lp.base_connectors.clone())
                    .with_rotation(lp.initial_rotation)
                    .with_locked(locked)
                    .with_aux(lp.aux.clone())
                    .with_target_rotation(lp.target_rotation)
            })
            .collect()
    }
}

/// Incremental level construction.
///
/// Pieces receive ids in the order they are added.
pub struct LevelBuilder {
    id: LevelId,
    name: String,
    topology: Topology,
    pieces: Vec<LevelPiece>,
    sources: Vec<PieceId>,
    goal: Goal,
    drive: f64,
}

impl LevelBuilder {
    pub fn new(id: u32, name: impl Into<String>, topology: Topology) -> Self {
        Self {
            id: LevelId::new(id),
            name: name.into(),
            topology,
            pieces: Vec::new(),
            sources: Vec::new(),
            goal: Goal::FullNetwork,
            drive: default_drive(),
        }
    }

    /// Add a piece and return its id.
    pub fn add(&mut self, piece: LevelPiece) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        self.pieces.push(piece);
        id
    }

    /// Designate a source piece (builder pattern).
    #[must_use]
    pub fn with_source(mut self, id: PieceId) -> Self {
        if !self.sources.contains(&id) {
            self.sources.push(id);
        }
        self
    }

    /// Set the goal (builder pattern).
    #[must_use]
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    /// Set the value seeded at sources (builder pattern).
    #[must_use]
    pub fn with_drive(mut self, drive: f64) -> Self {
        self.drive = drive;
        self
    }

    /// Validate and produce the level.
    pub fn build(self) -> Result<Level> {
        let level = Level {
            id: self.id,
            name: self.name,
            topology: self.topology,
            pieces: self.pieces,
            sources: self.sources,
            goal: self.goal,
            drive: self.drive,
        };
        level.validate()?;
        Ok(level)
    }
}
