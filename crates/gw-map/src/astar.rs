//! Low-level A* (spec §4.6 "Pathfinding details").
//!
//! One search routine serves two callers with different neighbour rules:
//! the map-construction portal-distance pass (teleport-free, certain tiles
//! forbidden) and the live `PathFindingPass` (teleporting neighbours, a
//! dynamic-obstacle bitset).

use crate::map::Map;
use gw_core::bitset::TileBitSet;
use gw_core::geometry::Direction;
use gw_core::heap::IndexedMinHeap;
use gw_core::ids::TileIndex;
use std::collections::{HashMap, HashSet};

/// Reference search bound (spec §4.4: "implementation-defined, but finite;
/// the reference bound is 10 000 expansions"). Not externally tunable.
const MAX_EXPANSIONS: usize = 10_000;

/// Penalty weight applied to a dynamically-occupied neighbour's step cost.
const DYNAMIC_PENALTY_WEIGHT: f64 = 20.0;

pub enum AstarOutcome {
    /// The goal was reached. `cost` is the accumulated g-score — exact tile
    /// cost when no dynamic-obstacle penalty was in play.
    Found { directions: Vec<Direction>, cost: f64 },
    /// The goal could not be reached but a best-effort partial path toward
    /// the lowest-f frontier node exists (spec: "best partial path ... or
    /// None if none exists").
    Partial { directions: Vec<Direction> },
    /// Open set emptied with nothing better reachable than the start tile.
    Unreachable,
    /// The search bailed out after [`MAX_EXPANSIONS`] — a safety valve, not
    /// a real "no path" answer.
    CapExceeded,
}

/// Options controlling one A* search.
pub struct SearchOptions<'a> {
    /// `true` to use teleporting neighbours (`Map::neighbors`); `false` for
    /// the physical, portal-blind adjacency used by portal-distance
    /// precompute.
    pub teleport: bool,
    /// Dynamic-obstacle bitset (`PathFindingPass`'s collider mask). Only
    /// meaningful when `teleport` is `true`.
    pub colliders: Option<&'a TileBitSet>,
    /// Tiles that must not be stepped onto unless they are the goal (portal
    /// `from` tiles, during portal-distance precompute).
    pub forbidden: Option<&'a HashSet<TileIndex>>,
}

impl<'a> SearchOptions<'a> {
    pub fn live(colliders: Option<&'a TileBitSet>) -> Self {
        Self {
            teleport: true,
            colliders,
            forbidden: None,
        }
    }

    pub fn portal_precompute(forbidden: &'a HashSet<TileIndex>) -> Self {
        Self {
            teleport: false,
            colliders: None,
            forbidden: Some(forbidden),
        }
    }
}

struct CameFrom {
    tile: TileIndex,
    direction: Direction,
}

/// Run A* from `start` to `goal` over `map` under `options`.
pub fn search(map: &Map, start: TileIndex, goal: TileIndex, options: &SearchOptions) -> AstarOutcome {
    if start == goal {
        return AstarOutcome::Found {
            directions: Vec::new(),
            cost: 0.0,
        };
    }

    let mut open = IndexedMinHeap::new();
    let mut g_score: HashMap<TileIndex, f64> = HashMap::new();
    let mut came_from: HashMap<TileIndex, CameFrom> = HashMap::new();
    let mut closed: HashSet<TileIndex> = HashSet::new();

    g_score.insert(start, 0.0);
    let h = map.estimate_distance(start, goal).map(|d| d as f64).unwrap_or(f64::INFINITY);
    open.push(start.index(), h);

    let mut best_closed: Option<(f64, TileIndex)> = None;
    let mut expansions = 0usize;

    while let Some((key, _priority)) = open.pop() {
        let current = TileIndex(key as u32);
        if closed.contains(&current) {
            continue;
        }
        closed.insert(current);
        expansions += 1;
        if expansions > MAX_EXPANSIONS {
            return AstarOutcome::CapExceeded;
        }

        if current != start {
            let f = g_score[&current] + map.estimate_distance(current, goal).map(|d| d as f64).unwrap_or(f64::INFINITY);
            let better = best_closed.map(|(bf, _)| f < bf).unwrap_or(true);
            if better {
                best_closed = Some((f, current));
            }
        }

        if current == goal {
            return AstarOutcome::Found {
                directions: reconstruct(&came_from, start, current),
                cost: g_score[&current],
            };
        }

        let neighbours = if options.teleport {
            map.neighbors(current)
        } else {
            map.plain_neighbors(current)
        };

        for (direction, neighbour) in neighbours {
            if closed.contains(&neighbour) {
                continue;
            }
            if let Some(forbidden) = options.forbidden {
                if forbidden.contains(&neighbour) && neighbour != goal {
                    continue;
                }
            }

            let Some(step_cost) = map.cost(neighbour) else {
                continue;
            };
            let mut step_cost = step_cost as f64;

            if let Some(colliders) = options.colliders {
                if colliders.has(neighbour.index()) {
                    let dist = map.estimate_distance(neighbour, goal);
                    match dist {
                        Some(d) if d <= 1 => continue,
                        Some(d) => step_cost += DYNAMIC_PENALTY_WEIGHT * (1.0 / d as f64),
                        None => continue,
                    }
                }
            }

            let tentative_g = g_score[&current] + step_cost;
            let improves = g_score.get(&neighbour).map(|&g| tentative_g < g).unwrap_or(true);
            if improves {
                g_score.insert(neighbour, tentative_g);
                came_from.insert(
                    neighbour,
                    CameFrom {
                        tile: current,
                        direction,
                    },
                );
                let h = map.estimate_distance(neighbour, goal).map(|d| d as f64).unwrap_or(f64::INFINITY);
                open.decrease_priority(neighbour.index(), tentative_g + h);
            }
        }
    }

    match best_closed {
        Some((_, node)) => AstarOutcome::Partial {
            directions: reconstruct(&came_from, start, node),
        },
        None => AstarOutcome::Unreachable,
    }
}

fn reconstruct(came_from: &HashMap<TileIndex, CameFrom>, start: TileIndex, goal: TileIndex) -> Vec<Direction> {
    let mut directions = Vec::new();
    let mut current = goal;
    while current != start {
        let Some(step) = came_from.get(&current) else {
            break;
        };
        directions.push(step.direction);
        current = step.tile;
    }
    directions.reverse();
    directions
}
