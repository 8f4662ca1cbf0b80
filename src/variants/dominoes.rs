//! Domino chain layouts.

use crate::core::{
    DominoSpec, Goal, Level, LevelBuilder, LevelPiece, PieceId, Result, TargetZone, Topology, Vec2,
};

/// Default domino height, which is also how far its tip lands.
pub const DEFAULT_LENGTH: f64 = 40.0;

/// Builder for domino chain levels.
pub struct DominoLine {
    builder: LevelBuilder,
    length: f64,
    pushed: Vec<PieceId>,
    required: Vec<PieceId>,
    zones: Vec<TargetZone>,
}

impl DominoLine {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            builder: LevelBuilder::new(id, name, Topology::Proximity),
            length: DEFAULT_LENGTH,
            pushed: Vec::new(),
            required: Vec::new(),
            zones: Vec::new(),
        }
    }

    /// Set the length of dominoes added from now on (builder pattern).
    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Stand a domino at `base` facing `facing` radians.
    pub fn domino(&mut self, base: Vec2, facing: f64) -> PieceId {
        self.builder
            .add(LevelPiece::domino(base, DominoSpec::new(facing, self.length)))
    }

    /// `count` dominoes from `start`, `spacing` apart along `facing`.
    pub fn row(&mut self, start: Vec2, facing: f64, spacing: f64, count: usize) -> Vec<PieceId> {
        let step = Vec2::from_angle(facing).scale(spacing);
        (0..count)
            .map(|i| self.domino(start.add(step.scale(i as f64)), facing))
            .collect()
    }

    /// Domino the player's trigger pushes.
    pub fn push(&mut self, id: PieceId) {
        if !self.pushed.contains(&id) {
            self.pushed.push(id);
        }
    }

    /// Domino that must fall. With none required, all must.
    pub fn require(&mut self, id: PieceId) {
        self.required.push(id);
    }

    /// Zone a fallen domino must touch.
    pub fn zone(&mut self, center: Vec2, radius: f64) {
        self.zones.push(TargetZone::new(center, radius));
    }

    pub fn build(self) -> Result<Level> {
        let mut builder = self.builder;
        for id in self.pushed {
            builder = builder.with_source(id);
        }
        builder
            .with_goal(Goal::ChainReaction {
                required: self.required,
                zones: self.zones,
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_spacing() {
        let mut line = DominoLine::new(1, "row");
        let ids = line.row(Vec2::new(10.0, 0.0), 0.0, 40.0, 3);
        line.push(ids[0]);
        let level = line.build().unwrap();

        let xs: Vec<f64> = level
            .pieces
            .iter()
            .filter_map(|p| p.position.point())
            .map(|p| p.x)
            .collect();
        assert_eq!(xs.len(), 3);
        assert!((xs[2] - 90.0).abs() < 1e-9);
        assert_eq!(level.sources, vec![ids[0]]);
    }

    #[test]
    fn test_unpushed_line_is_rejected() {
        let mut line = DominoLine::new(1, "still");
        line.domino(Vec2::default(), 0.0);
        assert!(line.build().is_err());
    }
}
