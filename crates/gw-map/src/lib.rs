//! `gw-map` — grid preprocessing: islands, portal graph APSP, and the
//! two-level A*/portal pathfinder.
//!
//! | Module          | Contents                                         |
//! |------------------|---------------------------------------------------|
//! | [`tile`]         | `Tile`, `Portal`, `Area`, `GeneratedMove`        |
//! | [`island`]       | Flood-fill island partition                      |
//! | [`astar`]        | Shared low-level A* search                       |
//! | [`portal_graph`] | Floyd–Warshall APSP over the portal graph        |
//! | [`map`]          | `Map`, `MapBuilder`, the public query surface    |
//! | [`error`]        | `MapError`                                       |

pub mod astar;
pub mod error;
pub mod island;
pub mod map;
pub mod portal_graph;
pub mod tile;

#[cfg(test)]
mod tests;

pub use astar::AstarOutcome;
pub use error::{MapError, MapResult};
pub use map::{Map, MapBuilder};
pub use portal_graph::PortalGraph;
pub use tile::{Area, GeneratedMove, Portal, Tile};
