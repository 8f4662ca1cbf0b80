//! Positions: discrete grid cells and continuous points.

use serde::{Deserialize, Serialize};

/// A cell on a discrete grid.
///
/// For square grids `col`/`row` are the usual column and row. For hex
/// grids they are axial coordinates `(q, r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Cell shifted by `(dc, dr)`.
    #[must_use]
    pub const fn offset(self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A point (or vector) in continuous 2D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `radians` (0 = +x, counter-clockwise).
    #[must_use]
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[must_use]
    pub fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn scale(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }

    #[must_use]
    pub fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }

    #[must_use]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance(self, other: Vec2) -> f64 {
        self.sub(other).length()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    #[must_use]
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::default()
        } else {
            self.scale(1.0 / len)
        }
    }
}

/// Where a piece sits: a grid cell or a free point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Cell(GridPos),
    Point(Vec2),
}

impl Position {
    /// The grid cell, if this is a discrete position.
    #[must_use]
    pub fn cell(self) -> Option<GridPos> {
        match self {
            Position::Cell(c) => Some(c),
            Position::Point(_) => None,
        }
    }

    /// The point, if this is a continuous position.
    #[must_use]
    pub fn point(self) -> Option<Vec2> {
        match self {
            Position::Point(p) => Some(p),
            Position::Cell(_) => None,
        }
    }
}

impl From<GridPos> for Position {
    fn from(cell: GridPos) -> Self {
        Position::Cell(cell)
    }
}

impl From<Vec2> for Position {
    fn from(point: Vec2) -> Self {
        Position::Point(point)
    }
}
