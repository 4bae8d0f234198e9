//! Grid geometry: coordinate ↔ index conversion, bounds checks, adjacency.
//!
//! Pure functions over `(width, height)`. Everything here fails with
//! [`GeometryError::OutOfBounds`] rather than panicking — callers at the
//! pathfinding/map layer route that into their own error types.

use crate::error::GeometryError;
use crate::ids::TileIndex;

/// One of the four cardinal directions a mover can take.
///
/// `Up` decreases `y`, `Down` increases `y`, `Left` decreases `x`, `Right`
/// increases `x` — screen/array coordinates, not mathematical ones.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed, stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Per-axis `(dx, dy)` step for this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Grid dimensions and the coordinate/index arithmetic over them.
///
/// A `Grid` carries no tile data — it is purely the geometric frame that
/// `gw-map::Map` and `gw-ecs` components (e.g. `Position`) are indexed
/// against.
#[derive(Copy, Clone, Debug)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of tiles, `width * height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `(x, y)` lies within `[0, width) x [0, height)`.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Flatten `(x, y)` into a [`TileIndex`].
    pub fn index_of(&self, x: u32, y: u32) -> Result<TileIndex, GeometryError> {
        if !self.in_bounds(x as i32, y as i32) {
            return Err(GeometryError::OutOfBounds { x: x as i32, y: y as i32 });
        }
        Ok(TileIndex(y * self.width + x))
    }

    /// Recover `(x, y)` from a [`TileIndex`].
    pub fn coord_of(&self, idx: TileIndex) -> Result<(u32, u32), GeometryError> {
        let i = idx.0;
        if i as usize >= self.len() {
            return Err(GeometryError::IndexOutOfBounds(i));
        }
        Ok((i % self.width, i / self.width))
    }

    /// The tile one step away from `idx` in `direction`, or `None` if that
    /// would leave the grid.
    pub fn step(&self, idx: TileIndex, direction: Direction) -> Option<TileIndex> {
        let (x, y) = self.coord_of(idx).ok()?;
        let (dx, dy) = direction.delta();
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        if !self.in_bounds(nx, ny) {
            return None;
        }
        Some(TileIndex((ny as u32) * self.width + nx as u32))
    }

    /// The cardinal direction of the single step from `from` to `to`, or
    /// `None` if the two indices are not 4-adjacent.
    pub fn direction(&self, from: TileIndex, to: TileIndex) -> Option<Direction> {
        let (fx, fy) = self.coord_of(from).ok()?;
        let (tx, ty) = self.coord_of(to).ok()?;
        let (dx, dy) = (tx as i32 - fx as i32, ty as i32 - fy as i32);
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Manhattan distance between two tiles, ignoring obstacles.
    pub fn manhattan(&self, a: TileIndex, b: TileIndex) -> Option<u32> {
        let (ax, ay) = self.coord_of(a).ok()?;
        let (bx, by) = self.coord_of(b).ok()?;
        Some(ax.abs_diff(bx) + ay.abs_diff(by))
    }
}
