//! `gw-core` — foundational types shared across the gridworld engine.
//!
//! This crate is a dependency of every other `gw-*` crate. It intentionally
//! has no `gw-*` dependencies and minimal external ones (`rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `TileIndex`, `IslandId`, `PortalId`                    |
//! | [`geometry`] | `Direction`, `Grid` (coord ↔ index, bounds, adjacency) |
//! | [`bitset`]   | `TileBitSet` — fixed-width collision bitset            |
//! | [`heap`]     | `IndexedMinHeap` — keyed decrease-priority binary heap |
//! | [`rng`]      | `RandomSource` trait, `SmallRngSource`                 |
//! | [`error`]    | `GeometryError`                                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod bitset;
pub mod error;
pub mod geometry;
pub mod heap;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

pub use bitset::TileBitSet;
pub use error::GeometryError;
pub use geometry::{Direction, Grid};
pub use heap::IndexedMinHeap;
pub use ids::{AreaId, IslandId, PortalId, TileIndex};
pub use rng::{RandomSource, SmallRngSource};
#[cfg(any(test, feature = "test-support"))]
pub use rng::MinRandomSource;
