//! Geometry-layer errors.
//!
//! Higher crates (`gw-map`, `gw-ecs`) define their own error enums and
//! convert into/out of these via `From`, the same pattern the donor
//! framework uses for `DtError`.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("coordinate ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    #[error("tile index {0} is out of bounds")]
    IndexOutOfBounds(u32),
}
