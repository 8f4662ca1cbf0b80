//! Board topologies and their direction systems.
//!
//! ## Directions
//!
//! Discrete topologies number their directions `0..D`:
//!
//! - Square (`D = 4`): 0 = up, 1 = right, 2 = down, 3 = left.
//! - Hex (`D = 6`, axial coordinates): 0 = `(+1, 0)`, 1 = `(+1, -1)`,
//!   2 = `(0, -1)`, 3 = `(-1, 0)`, 4 = `(-1, +1)`, 5 = `(0, +1)`.
//!
//! In both, the opposite of direction `i` is `(i + D/2) mod D`.
//!
//! The proximity topology has no directions; connectivity is geometric.
//!
//! ```
//! use netpuzzle::core::{Direction, GridPos, Topology};
//!
//! let hex = Topology::hex(5, 5);
//! assert_eq!(hex.direction_count(), 6);
//! assert_eq!(hex.opposite(Direction(1)), Direction(4));
//! assert_eq!(hex.step(GridPos::new(2, 2), Direction(0)), GridPos::new(3, 2));
//! ```

use serde::{Deserialize, Serialize};

use super::geometry::GridPos;

/// Direction index within a discrete topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction(pub u8);

impl Direction {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Direction {
    pub const UP: Direction = Direction(0);
    pub const RIGHT: Direction = Direction(1);
    pub const DOWN: Direction = Direction(2);
    pub const LEFT: Direction = Direction(3);
}

const SQUARE_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const HEX_OFFSETS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// The spatial structure pieces live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Rectangular grid of square cells.
    Square { width: u32, height: u32 },
    /// Hex grid in axial coordinates, `0 <= q < width`, `0 <= r < height`.
    Hex { width: u32, height: u32 },
    /// Continuous plane; pieces connect by distance.
    Proximity,
}

impl Topology {
    #[must_use]
    pub const fn square(width: u32, height: u32) -> Self {
        Topology::Square { width, height }
    }

    #[must_use]
    pub const fn hex(width: u32, height: u32) -> Self {
        Topology::Hex { width, height }
    }

    /// Number of directions `D`, or 0 for the proximity topology.
    #[must_use]
    pub const fn direction_count(self) -> usize {
        match self {
            Topology::Square { .. } => 4,
            Topology::Hex { .. } => 6,
            Topology::Proximity => 0,
        }
    }

    /// Whether pieces sit on discrete cells.
    #[must_use]
    pub const fn is_discrete(self) -> bool {
        !matches!(self, Topology::Proximity)
    }

    /// All directions of this topology.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        (0..self.direction_count() as u8).map(Direction)
    }

    /// The direction opposite `dir`.
    ///
    /// Panics on the proximity topology, which has no directions.
    #[must_use]
    pub fn opposite(self, dir: Direction) -> Direction {
        let d = self.direction_count();
        assert!(d > 0, "Proximity topology has no directions");
        Direction(((dir.index() + d / 2) % d) as u8)
    }

    /// The cell one step from `cell` in direction `dir`.
    #[must_use]
    pub fn step(self, cell: GridPos, dir: Direction) -> GridPos {
        let (dc, dr) = match self {
            Topology::Square { .. } => SQUARE_OFFSETS[dir.index() % 4],
            Topology::Hex { .. } => HEX_OFFSETS[dir.index() % 6],
            Topology::Proximity => (0, 0),
        };
        cell.offset(dc, dr)
    }

    /// Whether `cell` lies inside the board.
    #[must_use]
    pub fn contains(self, cell: GridPos) -> bool {
        match self {
            Topology::Square { width, height } | Topology::Hex { width, height } => {
                cell.col >= 0
                    && cell.row >= 0
                    && (cell.col as u32) < width
                    && (cell.row as u32) < height
            }
            Topology::Proximity => false,
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topology::Square { width, height } => write!(f, "square {}x{}", width, height),
            Topology::Hex { width, height } => write!(f, "hex {}x{}", width, height),
            Topology::Proximity => write!(f, "proximity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_opposites() {
        let t = Topology::square(3, 3);
        assert_eq!(t.opposite(Direction::UP), Direction::DOWN);
        assert_eq!(t.opposite(Direction::RIGHT), Direction::LEFT);
        assert_eq!(t.opposite(Direction::DOWN), Direction::UP);
        assert_eq!(t.opposite(Direction::LEFT), Direction::RIGHT);
    }

    #[test]
    fn test_hex_opposites_are_inverse_steps() {
        let t = Topology::hex(5, 5);
        let origin = GridPos::new(2, 2);
        for dir in t.directions() {
            let there = t.step(origin, dir);
            assert_eq!(t.step(there, t.opposite(dir)), origin, "direction {:?}", dir);
        }
    }

    #[test]
    fn test_square_steps() {
        let t = Topology::square(3, 3);
        let c = GridPos::new(1, 1);
        assert_eq!(t.step(c, Direction::UP), GridPos::new(1, 0));
        assert_eq!(t.step(c, Direction::RIGHT), GridPos::new(2, 1));
        assert_eq!(t.step(c, Direction::DOWN), GridPos::new(1, 2));
        assert_eq!(t.step(c, Direction::LEFT), GridPos::new(0, 1));
    }

    #[test]
    fn test_contains() {
        let t = Topology::square(2, 3);
        assert!(t.contains(GridPos::new(0, 0)));
        assert!(t.contains(GridPos::new(1, 2)));
        assert!(!t.contains(GridPos::new(2, 0)));
        assert!(!t.contains(GridPos::new(0, -1)));
        assert!(!Topology::Proximity.contains(GridPos::new(0, 0)));
    }

    #[test]
    #[should_panic(expected = "Proximity topology has no directions")]
    fn test_proximity_has_no_opposite() {
        let _ = Topology::Proximity.opposite(Direction(0));
    }
}
