//! Island partition: 4-connected flood fill over non-obstacle tiles.
//!
//! Ignores portals entirely — islands are purely a function of physical
//! adjacency, so a portal can (and usually does) link two different islands.

use crate::tile::Tile;
use gw_core::geometry::{Direction, Grid};
use gw_core::ids::{IslandId, TileIndex};

/// Per-tile island assignment; `IslandId::INVALID` marks an obstacle.
pub struct IslandPartition {
    pub island_index: Vec<IslandId>,
    pub island_count: usize,
}

impl IslandPartition {
    pub fn compute(grid: &Grid, tiles: &[Tile]) -> Self {
        let len = grid.len();
        let mut island_index = vec![IslandId::INVALID; len];
        let mut island_count = 0usize;
        let mut stack: Vec<TileIndex> = Vec::new();

        for start in 0..len {
            let start = TileIndex(start as u32);
            if tiles[start.index()].is_obstacle() {
                continue;
            }
            if island_index[start.index()].is_valid() {
                continue;
            }
            let this_island = IslandId::from(island_count);
            island_index[start.index()] = this_island;
            stack.push(start);
            while let Some(current) = stack.pop() {
                for direction in Direction::ALL {
                    let Some(next) = grid.step(current, direction) else {
                        continue;
                    };
                    if tiles[next.index()].is_obstacle() {
                        continue;
                    }
                    if island_index[next.index()].is_valid() {
                        continue;
                    }
                    island_index[next.index()] = this_island;
                    stack.push(next);
                }
            }
            island_count += 1;
        }

        Self {
            island_index,
            island_count,
        }
    }

    pub fn island_of(&self, tile: TileIndex) -> IslandId {
        self.island_index[tile.index()]
    }
}
