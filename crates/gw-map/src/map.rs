//! The preprocessed grid: tiles, portals, areas, islands and the portal
//! graph, plus the query surface pathfinding and movement are built on
//! (spec §4.4).

use crate::astar::{self, AstarOutcome, SearchOptions};
use crate::error::{MapError, MapResult};
use crate::island::IslandPartition;
use crate::portal_graph::PortalGraph;
use crate::tile::{Area, GeneratedMove, Portal, Tile};
use gw_core::bitset::TileBitSet;
use gw_core::geometry::{Direction, Grid};
use gw_core::ids::{AreaId, IslandId, PortalId, TileIndex};
use std::collections::{HashMap, HashSet};

pub struct Map {
    grid: Grid,
    tiles: Vec<Tile>,
    portals: Vec<Portal>,
    areas: Vec<Area>,
    islands: IslandPartition,
    portals_by_from: HashMap<TileIndex, Vec<PortalId>>,
    portals_by_island_from: HashMap<IslandId, Vec<PortalId>>,
    portals_by_island_to: HashMap<IslandId, Vec<PortalId>>,
    area_index: Vec<AreaId>,
    area_by_name: HashMap<String, AreaId>,
    portal_graph: PortalGraph,
}

impl Map {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_obstacle(&self, i: TileIndex) -> bool {
        self.tiles
            .get(i.index())
            .map(|t| t.is_obstacle())
            .unwrap_or(true)
    }

    pub fn cost(&self, i: TileIndex) -> Option<u32> {
        self.tiles.get(i.index()).and_then(|t| t.cost())
    }

    pub fn island_of(&self, i: TileIndex) -> IslandId {
        self.islands.island_of(i)
    }

    pub fn area_of(&self, i: TileIndex) -> AreaId {
        self.area_index.get(i.index()).copied().unwrap_or(AreaId::INVALID)
    }

    pub fn area_by_name(&self, name: &str) -> Option<AreaId> {
        self.area_by_name.get(name).copied()
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(id.index())
    }

    pub fn portal(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(id.index())
    }

    pub fn portals_entering_island(&self, island: IslandId) -> &[PortalId] {
        self.portals_by_island_from
            .get(&island)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn portals_exiting_into_island(&self, island: IslandId) -> &[PortalId] {
        self.portals_by_island_to
            .get(&island)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn portal_graph(&self) -> &PortalGraph {
        &self.portal_graph
    }

    /// Manhattan distance, or `None` ("infinite") if either endpoint is an
    /// obstacle.
    pub fn estimate_distance(&self, a: TileIndex, b: TileIndex) -> Option<u32> {
        if self.is_obstacle(a) || self.is_obstacle(b) {
            return None;
        }
        self.grid.manhattan(a, b)
    }

    /// Reachable neighbours of `i`, resolving portal teleportation. Since the
    /// caller (low-level A*) explores all four directions without knowing in
    /// advance which one it will take, a directional portal constraint is
    /// treated as unrestricted here — `generate_move` applies the strict,
    /// direction-aware check once an actual move is committed.
    pub fn neighbors(&self, i: TileIndex) -> Vec<(Direction, TileIndex)> {
        let mut out = Vec::new();
        for direction in Direction::ALL {
            let Some(adjacent) = self.grid.step(i, direction) else {
                continue;
            };
            if self.is_obstacle(adjacent) {
                continue;
            }
            let target = self.portal_entry_at(adjacent).unwrap_or(adjacent);
            out.push((direction, target));
        }
        out
    }

    /// Physical, portal-blind adjacency: used only by the portal-distance
    /// precompute, which must not teleport mid-route.
    pub(crate) fn plain_neighbors(&self, i: TileIndex) -> Vec<(Direction, TileIndex)> {
        let mut out = Vec::new();
        for direction in Direction::ALL {
            let Some(adjacent) = self.grid.step(i, direction) else {
                continue;
            };
            if self.is_obstacle(adjacent) {
                continue;
            }
            out.push((direction, adjacent));
        }
        out
    }

    fn portal_entry_at(&self, tile: TileIndex) -> Option<TileIndex> {
        self.portals_by_from
            .get(&tile)
            .and_then(|ids| ids.first())
            .map(|id| self.portals[id.index()].to)
    }

    /// Build a `Move` (spec §4.4 `generateMove`). `None` if out of bounds,
    /// a static or dynamic obstacle, or the portal target lies outside the
    /// grid.
    pub fn generate_move(
        &self,
        from: TileIndex,
        direction: Direction,
        dynamic_obstacle: Option<&TileBitSet>,
    ) -> Option<GeneratedMove> {
        let adjacent = self.grid.step(from, direction)?;
        if self.is_obstacle(adjacent) {
            return None;
        }
        if let Some(colliders) = dynamic_obstacle {
            if colliders.has(adjacent.index()) {
                return None;
            }
        }

        let target = match self.portals_by_from.get(&adjacent) {
            Some(candidates) => {
                let matching = candidates
                    .iter()
                    .find(|id| {
                        let portal = &self.portals[id.index()];
                        portal.direction.is_none() || portal.direction == Some(direction)
                    });
                match matching {
                    Some(id) => self.portals[id.index()].to,
                    None => adjacent,
                }
            }
            None => adjacent,
        };

        if target.index() >= self.grid.len() {
            return None;
        }
        let total_ticks = self.cost(adjacent)?;
        let target_position = self.grid.coord_of(target).ok()?;

        Some(GeneratedMove {
            total_ticks,
            target_idx: target,
            target_position,
        })
    }

    /// Low-level, same-island A* from `start` to `goal`.
    pub fn find_path_within_island(
        &self,
        start: TileIndex,
        goal: TileIndex,
        colliders: Option<&TileBitSet>,
    ) -> AstarOutcome {
        astar::search(self, start, goal, &SearchOptions::live(colliders))
    }

    /// High-level cross-island routing: picks the cheapest portal-entry /
    /// portal-exit pair bridging `start`'s island to `goal`'s island (spec
    /// §4.6 "Cross-island").
    pub fn best_bridging_portals(&self, start: TileIndex, goal: TileIndex) -> Option<(PortalId, PortalId, u32)> {
        let start_island = self.island_of(start);
        let goal_island = self.island_of(goal);
        let entries = self.portals_entering_island(start_island);
        let exits = self.portals_exiting_into_island(goal_island);

        let mut best: Option<(PortalId, PortalId, u32)> = None;
        for &entry in entries {
            for &exit in exits {
                if let Some(cost) = self.portal_graph.cost(entry, exit) {
                    let better = best.map(|(_, _, c)| cost < c).unwrap_or(true);
                    if better {
                        best = Some((entry, exit, cost));
                    }
                }
            }
        }
        best
    }
}

/// Fluent constructor for [`Map`] (mirrors the donor framework's
/// `RoadNetworkBuilder`/`AgentStoreBuilder`).
pub struct MapBuilder {
    grid: Grid,
    tiles: Option<Vec<Tile>>,
    portals: Vec<Portal>,
    areas: Vec<Area>,
}

impl MapBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            tiles: None,
            portals: Vec::new(),
            areas: Vec::new(),
        }
    }

    pub fn tiles(mut self, tiles: Vec<Tile>) -> Self {
        self.tiles = Some(tiles);
        self
    }

    pub fn portal(mut self, portal: Portal) -> Self {
        self.portals.push(portal);
        self
    }

    pub fn area(mut self, area: Area) -> Self {
        self.areas.push(area);
        self
    }

    pub fn build(self) -> MapResult<Map> {
        let grid = self.grid;
        let len = grid.len();
        let tiles = self.tiles.unwrap_or_else(|| vec![Tile::Obstacle; len]);
        let portals = self.portals;
        let areas = self.areas;

        for (idx, portal) in portals.iter().enumerate() {
            let id = PortalId::from(idx);
            if portal.from.index() >= len {
                return Err(MapError::InvalidMap {
                    portal: id,
                    index: portal.from.0,
                    bound: len as u32,
                });
            }
            if portal.to.index() >= len {
                return Err(MapError::InvalidMap {
                    portal: id,
                    index: portal.to.0,
                    bound: len as u32,
                });
            }
        }

        let islands = IslandPartition::compute(&grid, &tiles);

        let mut portals_by_from: HashMap<TileIndex, Vec<PortalId>> = HashMap::new();
        let mut portals_by_island_from: HashMap<IslandId, Vec<PortalId>> = HashMap::new();
        let mut portals_by_island_to: HashMap<IslandId, Vec<PortalId>> = HashMap::new();
        for (idx, portal) in portals.iter().enumerate() {
            let id = PortalId::from(idx);
            portals_by_from.entry(portal.from).or_default().push(id);
            portals_by_island_from
                .entry(islands.island_of(portal.from))
                .or_default()
                .push(id);
            portals_by_island_to
                .entry(islands.island_of(portal.to))
                .or_default()
                .push(id);
        }

        let mut area_index = vec![AreaId::INVALID; len];
        let mut area_by_name = HashMap::new();
        for (idx, area) in areas.iter().enumerate() {
            let id = AreaId::from(idx);
            for &cell in &area.cells {
                if cell.index() < len {
                    area_index[cell.index()] = id;
                }
            }
            area_by_name.insert(area.name.clone(), id);
        }

        let forbidden: HashSet<TileIndex> = portals.iter().map(|p| p.from).collect();

        let mut map = Map {
            grid,
            tiles,
            portals,
            areas,
            islands,
            portals_by_from,
            portals_by_island_from,
            portals_by_island_to,
            area_index,
            area_by_name,
            portal_graph: PortalGraph::build(0, |_, _| None),
        };

        let n = map.portals.len();
        let portal_graph = PortalGraph::build(n, |i, j| {
            if i == j {
                return None;
            }
            let p = &map.portals[i];
            let q = &map.portals[j];
            if map.islands.island_of(p.to) != map.islands.island_of(q.from) {
                return None;
            }
            let options = SearchOptions::portal_precompute(&forbidden);
            match astar::search(&map, p.to, q.from, &options) {
                AstarOutcome::Found { cost, .. } => Some(cost.round() as u32),
                _ => None,
            }
        });
        map.portal_graph = portal_graph;

        Ok(map)
    }
}
