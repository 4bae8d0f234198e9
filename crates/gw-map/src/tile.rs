//! Tile, portal and area data types (spec §3 data model).

use gw_core::geometry::Direction;
use gw_core::ids::TileIndex;
use std::collections::HashSet;

/// A single grid cell's terrain kind.
///
/// `Obstacle` tiles are never entered; `Normal`/`Fast` carry the ticks it
/// costs to step onto them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Obstacle,
    Normal,
    Fast,
}

impl Tile {
    /// Ticks to enter this tile, or `None` if it's impassable.
    pub fn cost(self) -> Option<u32> {
        match self {
            Tile::Obstacle => None,
            Tile::Normal => Some(10),
            Tile::Fast => Some(7),
        }
    }

    pub fn is_obstacle(self) -> bool {
        matches!(self, Tile::Obstacle)
    }
}

/// A one-way teleport link from `from` to `to`.
///
/// `direction` restricts the portal to triggering only when entered while
/// stepping in that cardinal direction; `None` means unrestricted.
#[derive(Copy, Clone, Debug)]
pub struct Portal {
    pub from: TileIndex,
    pub to: TileIndex,
    pub direction: Option<Direction>,
}

/// A named region of the grid, built from an explicit cell set.
#[derive(Clone, Debug)]
pub struct Area {
    pub name: String,
    pub description: String,
    pub cells: HashSet<TileIndex>,
}

/// Result of `Map::generate_move` — the caller (`gw-pipeline`) wraps this
/// into its own `Move` component, supplying `remaining_ticks = total_ticks`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMove {
    pub total_ticks: u32,
    pub target_idx: TileIndex,
    pub target_position: (u32, u32),
}
