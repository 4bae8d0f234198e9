//! Step 5: build a `PathPlan` for entities pursuing a `GoalPathfinding`
//! target (spec §4.6 "Pathfinding details").

use crate::components::{GoalPathfinding, PathPlan, Position};
use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_core::geometry::Direction;
use gw_core::ids::TileIndex;
use gw_ecs::World;
use gw_map::{AstarOutcome, Map};
use std::any::TypeId;

pub struct PathFindingPass;

impl Pass for PathFindingPass {
    fn name(&self) -> &'static str {
        "PathFindingPass"
    }

    fn run(&mut self, world: &mut World, map: &Map, colliders: &mut TileBitSet) {
        let candidates = world.query_once(
            &[TypeId::of::<Position>(), TypeId::of::<GoalPathfinding>()],
            &[TypeId::of::<PathPlan>()],
        );
        for entity in candidates {
            let Some(position) = world.get::<Position>(entity).copied() else { continue };
            let Some(goal) = world.get::<GoalPathfinding>(entity).copied() else { continue };
            let Ok(start) = map.grid().index_of(position.x, position.y) else { continue };

            if start == goal.target_index {
                world.remove::<GoalPathfinding>(entity);
                continue;
            }

            match build_plan(map, colliders, start, goal.target_index) {
                Some(plan) => {
                    let _ = world.set(entity, plan);
                    let mut refreshed = goal;
                    refreshed.retry_count = 0;
                    let _ = world.set(entity, refreshed);
                }
                None => {
                    let mut retried = goal;
                    retried.retry_count += 1;
                    if retried.retry_count >= retried.max_retries {
                        tracing::debug!(entity = %entity, target = %goal.target_index, "pathfinding exhausted retries, giving up");
                        world.remove::<GoalPathfinding>(entity);
                    } else {
                        let _ = world.set(entity, retried);
                    }
                }
            }
        }
    }
}

fn build_plan(map: &Map, colliders: &TileBitSet, start: TileIndex, goal: TileIndex) -> Option<PathPlan> {
    // A tile currently held by another dynamic collider can never be the
    // final step of any move (generate_move's own collider check would
    // refuse it), so don't bother searching or falling back this tick.
    if colliders.has(goal.index()) {
        return None;
    }
    if map.island_of(start) == map.island_of(goal) {
        if let Some(plan) = same_island_plan(map, colliders, start, goal) {
            return Some(plan);
        }
    } else if let Some(plan) = cross_island_plan(map, colliders, start, goal) {
        return Some(plan);
    }
    fallback_step(map, colliders, start, goal)
}

fn same_island_plan(map: &Map, colliders: &TileBitSet, start: TileIndex, goal: TileIndex) -> Option<PathPlan> {
    match map.find_path_within_island(start, goal, Some(colliders)) {
        AstarOutcome::Found { directions, .. } | AstarOutcome::Partial { directions } => Some(PathPlan {
            target_index: goal,
            path: directions,
            next_action_index: 0,
        }),
        AstarOutcome::Unreachable | AstarOutcome::CapExceeded => None,
    }
}

/// Cross-island: bridge via the cheapest portal-entry/portal-exit pair, then
/// route only as far as that entry portal's `from` tile — later ticks
/// re-plan once the entity has crossed into the next island.
fn cross_island_plan(map: &Map, colliders: &TileBitSet, start: TileIndex, goal: TileIndex) -> Option<PathPlan> {
    let (entry_portal, _exit_portal, _cost) = map.best_bridging_portals(start, goal)?;
    let entry = map.portal(entry_portal)?;
    match map.find_path_within_island(start, entry.from, Some(colliders)) {
        AstarOutcome::Found { directions, .. } | AstarOutcome::Partial { directions } => Some(PathPlan {
            target_index: goal,
            path: directions,
            next_action_index: 0,
        }),
        AstarOutcome::Unreachable | AstarOutcome::CapExceeded => None,
    }
}

fn fallback_step(map: &Map, colliders: &TileBitSet, start: TileIndex, goal: TileIndex) -> Option<PathPlan> {
    let (sx, sy) = map.grid().coord_of(start).ok()?;
    let (gx, gy) = map.grid().coord_of(goal).ok()?;

    let mut candidates = Vec::new();
    if gx > sx {
        candidates.push(Direction::Right);
    }
    if gx < sx {
        candidates.push(Direction::Left);
    }
    if gy > sy {
        candidates.push(Direction::Down);
    }
    if gy < sy {
        candidates.push(Direction::Up);
    }

    candidates.into_iter().find_map(|direction| {
        map.generate_move(start, direction, Some(colliders)).map(|_| PathPlan {
            target_index: goal,
            path: vec![direction],
            next_action_index: 0,
        })
    })
}
