//! Engine tuning parameters.

use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// These are feel parameters, not level content: the same level can be
/// played with a tighter mesh tolerance or a slower domino fall.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Allowed slack when deciding whether two gears mesh.
    /// Gears mesh when `|distance - (r_a + r_b)| < mesh_tolerance`.
    pub mesh_tolerance: f64,

    /// Maximum base-to-base distance at which a falling domino strikes
    /// its neighbour.
    pub domino_reach: f64,

    /// Ticks a domino takes to topple. It strikes its neighbours on the
    /// tick it finishes.
    pub fall_ticks: u32,

    /// Ticks between revealing consecutive flow nodes.
    /// `None` reveals the whole network at once.
    pub reveal_delay_ticks: Option<u32>,

    /// Display degrees a gear turns per tick at unit velocity.
    pub gear_degrees_per_tick: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mesh_tolerance: 2.0,
            domino_reach: 45.0,
            fall_ticks: 6,
            reveal_delay_ticks: None,
            gear_degrees_per_tick: 6.0,
        }
    }
}

impl EngineConfig {
    /// Set the gear mesh tolerance.
    #[must_use]
    pub fn with_mesh_tolerance(mut self, tolerance: f64) -> Self {
        self.mesh_tolerance = tolerance;
        self
    }

    /// Set the domino strike distance.
    #[must_use]
    pub fn with_domino_reach(mut self, reach: f64) -> Self {
        self.domino_reach = reach;
        self
    }

    /// Set how many ticks a domino takes to fall. Clamped to at least 1.
    #[must_use]
    pub fn with_fall_ticks(mut self, ticks: u32) -> Self {
        self.fall_ticks = ticks.max(1);
        self
    }

    /// Enable staged flow reveal.
    #[must_use]
    pub fn with_reveal_delay(mut self, ticks: u32) -> Self {
        self.reveal_delay_ticks = Some(ticks);
        self
    }

    /// Set the gear animation speed.
    #[must_use]
    pub fn with_gear_speed(mut self, degrees_per_tick: f64) -> Self {
        self.gear_degrees_per_tick = degrees_per_tick;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.mesh_tolerance, 2.0);
        assert_eq!(config.domino_reach, 45.0);
        assert_eq!(config.reveal_delay_ticks, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_mesh_tolerance(0.5)
            .with_domino_reach(30.0)
            .with_fall_ticks(0)
            .with_reveal_delay(3);

        assert_eq!(config.mesh_tolerance, 0.5);
        assert_eq!(config.domino_reach, 30.0);
        assert_eq!(config.fall_ticks, 1);
        assert_eq!(config.reveal_delay_ticks, Some(3));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_reveal_delay(2);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
