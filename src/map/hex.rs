use bevy::prelude::*;
use hexx::Hex;
use serde::{Deserialize, Serialize};

use crate::map::projection::Projection;

/// Offset (column, row) coordinate of a grid cell.
///
/// Even rows are shifted so that the grid stays rectangular. The math here never
/// bounds-checks; use [`crate::map::Grid::valid`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HexPoint {
    pub x: i32,
    pub y: i32,
}

/// Cube coordinate with the invariant `q + r + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HexCube {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// The six neighbour directions, in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl HexPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_cube(self) -> HexCube {
        let q = self.x.wrapping_sub(half_row_shift(self.y));
        let s = self.y;
        HexCube::new(q, q.wrapping_neg().wrapping_sub(s), s)
    }

    pub fn from_cube(cube: HexCube) -> Self {
        let x = cube.q.wrapping_add(half_row_shift(cube.s));
        Self::new(x, cube.s)
    }

    /// Point reached after `steps` moves in `direction`.
    ///
    /// Coordinates wrap around at the `i32` limits instead of overflowing.
    pub fn neighbor(self, direction: HexDirection, steps: i32) -> Self {
        Self::from_cube(self.to_cube() + direction.offset() * steps)
    }

    /// The six adjacent points in [`HexDirection::ALL`] order
    pub fn neighbors(self) -> [HexPoint; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction, 1))
    }

    pub fn distance(self, other: HexPoint) -> i32 {
        self.to_cube().distance(other.to_cube())
    }

    /// Pixel position of the cell center
    pub fn to_screen(self, projection: &Projection) -> Vec2 {
        projection.to_screen(self.to_cube())
    }
}

/// `ceil(row / 2)` without the overflow of `(row + 1) / 2`
fn half_row_shift(row: i32) -> i32 {
    (row >> 1) + (row & 1)
}

impl From<HexCube> for HexPoint {
    fn from(cube: HexCube) -> Self {
        Self::from_cube(cube)
    }
}

/// Inverse-projects a pixel position to the nearest cell
pub fn screen_to_hex(x: f32, y: f32, projection: &Projection) -> HexPoint {
    HexPoint::from_cube(projection.to_hex(Vec2::new(x, y)))
}

impl HexCube {
    pub const ZERO: HexCube = HexCube { q: 0, r: 0, s: 0 };

    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    pub fn is_valid(self) -> bool {
        self.q + self.r + self.s == 0
    }

    pub fn to_offset(self) -> HexPoint {
        HexPoint::from_cube(self)
    }

    /// Number of hex steps between two cells
    pub fn distance(self, other: HexCube) -> i32 {
        Hex::from(self).distance_to(Hex::from(other))
    }
}

impl From<HexPoint> for HexCube {
    fn from(point: HexPoint) -> Self {
        point.to_cube()
    }
}

// `hexx` stores two axes; our row axis `s` maps onto its `y` so projected rows stay horizontal.
impl From<HexCube> for Hex {
    fn from(cube: HexCube) -> Self {
        Hex::new(cube.q, cube.s)
    }
}

impl From<Hex> for HexCube {
    fn from(hex: Hex) -> Self {
        HexCube::new(hex.x, -hex.x - hex.y, hex.y)
    }
}

impl std::ops::Add for HexCube {
    type Output = HexCube;

    fn add(self, rhs: HexCube) -> HexCube {
        HexCube::new(
            self.q.wrapping_add(rhs.q),
            self.r.wrapping_add(rhs.r),
            self.s.wrapping_add(rhs.s),
        )
    }
}

impl std::ops::Sub for HexCube {
    type Output = HexCube;

    fn sub(self, rhs: HexCube) -> HexCube {
        HexCube::new(
            self.q.wrapping_sub(rhs.q),
            self.r.wrapping_sub(rhs.r),
            self.s.wrapping_sub(rhs.s),
        )
    }
}

impl std::ops::Mul<i32> for HexCube {
    type Output = HexCube;

    fn mul(self, rhs: i32) -> HexCube {
        HexCube::new(
            self.q.wrapping_mul(rhs),
            self.r.wrapping_mul(rhs),
            self.s.wrapping_mul(rhs),
        )
    }
}

impl HexDirection {
    pub const ALL: [HexDirection; 6] = [
        HexDirection::North,
        HexDirection::NorthEast,
        HexDirection::SouthEast,
        HexDirection::South,
        HexDirection::SouthWest,
        HexDirection::NorthWest,
    ];

    /// Unit cube vector for this direction
    pub const fn offset(self) -> HexCube {
        match self {
            HexDirection::North => HexCube::new(0, 1, -1),
            HexDirection::NorthEast => HexCube::new(1, 0, -1),
            HexDirection::SouthEast => HexCube::new(1, -1, 0),
            HexDirection::South => HexCube::new(0, -1, 1),
            HexDirection::SouthWest => HexCube::new(-1, 0, 1),
            HexDirection::NorthWest => HexCube::new(-1, 1, 0),
        }
    }

    pub const fn opposite(self) -> HexDirection {
        match self {
            HexDirection::North => HexDirection::South,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::SouthEast => HexDirection::NorthWest,
            HexDirection::South => HexDirection::North,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::NorthWest => HexDirection::SouthEast,
        }
    }
}

#[cfg(test)]
mod tests;
