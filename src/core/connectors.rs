//! Connector sets and rotation.
//!
//! A `Connectors` value is a boolean per direction of the topology.
//! Rotation by `k` steps moves the connector on side `i` to side
//! `(i + k) mod D`; rotating by `D` steps is the identity.
//!
//! ```
//! use netpuzzle::core::Connectors;
//!
//! // A straight wire running up/down.
//! let wire = Connectors::square(true, false, true, false);
//! // One quarter turn: now left/right.
//! assert_eq!(wire.rotated(1), Connectors::square(false, true, false, true));
//! // A full turn restores the original.
//! assert_eq!(wire.rotated(4), wire);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::topology::Direction;

/// Which sides of a piece carry a connector.
///
/// SmallVec keeps square (4) and hex (6) sets inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connectors(SmallVec<[bool; 6]>);

impl Connectors {
    /// Build from one flag per direction.
    #[must_use]
    pub fn from_slice(sides: &[bool]) -> Self {
        Self(SmallVec::from_slice(sides))
    }

    /// A set with no connectors, used for proximity pieces.
    #[must_use]
    pub fn none() -> Self {
        Self(SmallVec::new())
    }

    /// Square tile, sides given as up, right, down, left.
    #[must_use]
    pub fn square(up: bool, right: bool, down: bool, left: bool) -> Self {
        Self::from_slice(&[up, right, down, left])
    }

    /// Hex tile with connectors on the listed direction indices.
    #[must_use]
    pub fn hex(sides: &[u8]) -> Self {
        let mut flags = [false; 6];
        for &s in sides {
            flags[s as usize % 6] = true;
        }
        Self::from_slice(&flags)
    }

    /// Number of directions this set covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this set covers no directions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether side `dir` carries a connector. Out-of-range sides do not.
    #[must_use]
    pub fn has(&self, dir: Direction) -> bool {
        self.0.get(dir.index()).copied().unwrap_or(false)
    }

    /// Count of sides carrying a connector.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&c| c).count()
    }

    /// Directions carrying a connector.
    pub fn sides(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| Direction(i as u8))
    }

    /// Circular shift by `steps` positions. O(D).
    #[must_use]
    pub fn rotated(&self, steps: usize) -> Self {
        let d = self.0.len();
        if d == 0 {
            return self.clone();
        }
        let k = steps % d;
        let mut out: SmallVec<[bool; 6]> = SmallVec::from_elem(false, d);
        for (i, &c) in self.0.iter().enumerate() {
            out[(i + k) % d] = c;
        }
        Self(out)
    }

    /// Raw flags, one per direction.
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_rotation() {
        let elbow = Connectors::square(true, true, false, false);
        assert_eq!(elbow.rotated(1), Connectors::square(false, true, true, false));
        assert_eq!(elbow.rotated(2), Connectors::square(false, false, true, true));
        assert_eq!(elbow.rotated(3), Connectors::square(true, false, false, true));
    }

    #[test]
    fn test_hex_rotation() {
        let tile = Connectors::hex(&[0, 3]);
        assert_eq!(tile.rotated(1), Connectors::hex(&[1, 4]));
        assert_eq!(tile.rotated(6), tile);
    }

    #[test]
    fn test_has_out_of_range() {
        let c = Connectors::square(true, false, false, false);
        assert!(c.has(Direction(0)));
        assert!(!c.has(Direction(9)));
        assert!(!Connectors::none().has(Direction(0)));
    }

    #[test]
    fn test_sides_and_count() {
        let tee = Connectors::square(true, true, false, true);
        assert_eq!(tee.count(), 3);
        let sides: Vec<_> = tee.sides().collect();
        assert_eq!(sides, vec![Direction(0), Direction(1), Direction(3)]);
    }

    #[test]
    fn test_empty_rotation_is_noop() {
        assert_eq!(Connectors::none().rotated(3), Connectors::none());
    }
}
