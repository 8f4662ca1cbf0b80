//! Gear trains on a free plane.

use crate::core::{
    GearSpec, Goal, Level, LevelBuilder, LevelPiece, PieceId, Result, SpinTarget, Topology, Vec2,
};

/// Pitch radius per tooth used when a gear's radius is derived from
/// its tooth count.
pub const DEFAULT_MODULE: f64 = 2.0;

/// Builder for gear train levels.
///
/// Radii follow `radius = teeth * module / 2`, so gears with the same
/// module mesh exactly when their centres are `r_a + r_b` apart.
pub struct GearTrain {
    id: u32,
    name: String,
    module: f64,
    pieces: Vec<LevelPiece>,
    sources: Vec<PieceId>,
    targets: Vec<SpinTarget>,
    drive: f64,
}

impl GearTrain {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            module: DEFAULT_MODULE,
            pieces: Vec::new(),
            sources: Vec::new(),
            targets: Vec::new(),
            drive: 1.0,
        }
    }

    /// Set the tooth module (builder pattern).
    #[must_use]
    pub fn with_module(mut self, module: f64) -> Self {
        self.module = module;
        self
    }

    /// Set the driver velocity (builder pattern).
    #[must_use]
    pub fn with_drive(mut self, drive: f64) -> Self {
        self.drive = drive;
        self
    }

    #[must_use]
    pub fn spec(&self, teeth: u32) -> GearSpec {
        GearSpec::new(teeth, teeth as f64 * self.module / 2.0)
    }

    /// Motor-driven gear. Drivers never move.
    pub fn driver(&mut self, center: Vec2, teeth: u32) -> PieceId {
        let id = self.push(LevelPiece::gear(center, self.spec(teeth)).locked());
        self.sources.push(id);
        id
    }

    /// Draggable gear.
    pub fn gear(&mut self, center: Vec2, teeth: u32) -> PieceId {
        self.push(LevelPiece::gear(center, self.spec(teeth)))
    }

    /// Gear fixed to the board.
    pub fn fixed(&mut self, center: Vec2, teeth: u32) -> PieceId {
        self.push(LevelPiece::gear(center, self.spec(teeth)).locked())
    }

    /// Draggable gear placed in exact mesh with `partner`, in direction
    /// `angle` (radians) from the partner's centre.
    pub fn meshed_with(&mut self, partner: PieceId, teeth: u32, angle: f64) -> PieceId {
        let spec = self.spec(teeth);
        let center = self.mesh_point(partner, spec.radius, angle);
        self.push(LevelPiece::gear(center, spec))
    }

    /// Centre at which a gear of `radius` exactly meshes with `partner`.
    /// Unknown partners yield the origin.
    #[must_use]
    pub fn mesh_point(&self, partner: PieceId, radius: f64, angle: f64) -> Vec2 {
        let Some(lp) = self.pieces.get(partner.index()) else {
            return Vec2::default();
        };
        let (Some(center), Some(spec)) = (lp.position.point(), lp.aux.gear) else {
            return Vec2::default();
        };
        center.add(Vec2::from_angle(angle).scale(spec.radius + radius))
    }

    /// `piece` must turn, optionally at exactly `velocity`.
    pub fn require_spin(&mut self, piece: PieceId, velocity: Option<f64>) {
        self.targets.push(SpinTarget { piece, velocity });
    }

    fn push(&mut self, piece: LevelPiece) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        self.pieces.push(piece);
        id
    }

    pub fn build(self) -> Result<Level> {
        let mut builder = LevelBuilder::new(self.id, self.name, Topology::Proximity);
        for piece in self.pieces {
            builder.add(piece);
        }
        for id in self.sources {
            builder = builder.with_source(id);
        }
        builder
            .with_drive(self.drive)
            .with_goal(Goal::Spin { targets: self.targets })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LevelError;

    #[test]
    fn test_radius_follows_teeth() {
        let train = GearTrain::new(1, "train");
        assert_eq!(train.spec(12).radius, 12.0);
        assert_eq!(train.with_module(1.0).spec(24).radius, 12.0);
    }

    #[test]
    fn test_meshed_placement_is_exact() {
        let mut train = GearTrain::new(1, "train");
        let driver = train.driver(Vec2::new(100.0, 100.0), 12);
        let follower = train.meshed_with(driver, 24, 0.0);
        train.require_spin(follower, Some(-0.5));
        let level = train.build().unwrap();

        let a = level.pieces[driver.index()].position.point().unwrap();
        let b = level.pieces[follower.index()].position.point().unwrap();
        assert!((a.distance(b) - 36.0).abs() < 1e-9);
        assert!(level.pieces[driver.index()].locked);
    }

    #[test]
    fn test_train_without_driver_is_rejected() {
        let mut train = GearTrain::new(1, "idle");
        train.gear(Vec2::default(), 12);
        assert!(train.build().is_err());
    }

    #[test]
    fn test_train_without_spin_requirement_is_rejected() {
        let mut train = GearTrain::new(1, "aimless");
        train.driver(Vec2::new(0.0, 0.0), 12);
        train.gear(Vec2::new(300.0, 0.0), 24);
        assert!(matches!(train.build(), Err(LevelError::GoalMismatch(_))));
    }
}
