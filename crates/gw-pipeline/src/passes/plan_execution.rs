//! Step 6: advance an attached `PathPlan` one action at a time.

use crate::components::{FaceDirection, Move, PathPlan, Position};
use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_ecs::World;
use gw_map::Map;
use std::any::TypeId;

pub struct PlanExecutionPass;

impl Pass for PlanExecutionPass {
    fn name(&self) -> &'static str {
        "PlanExecutionPass"
    }

    fn run(&mut self, world: &mut World, map: &Map, colliders: &mut TileBitSet) {
        let candidates = world.query_once(&[TypeId::of::<PathPlan>(), TypeId::of::<Position>()], &[TypeId::of::<Move>()]);
        for entity in candidates {
            let Some(plan) = world.get::<PathPlan>(entity).cloned() else { continue };

            if plan.next_action_index >= plan.path.len() {
                world.remove::<PathPlan>(entity);
                continue;
            }

            let Some(position) = world.get::<Position>(entity).copied() else { continue };
            let Ok(current) = map.grid().index_of(position.x, position.y) else {
                world.remove::<PathPlan>(entity);
                continue;
            };

            let direction = plan.path[plan.next_action_index];
            match map.generate_move(current, direction, Some(colliders)) {
                Some(generated) => {
                    let _ = world.set(
                        entity,
                        Move {
                            total_ticks: generated.total_ticks,
                            remaining_ticks: generated.total_ticks,
                            target_idx: generated.target_idx,
                            target_position: generated.target_position,
                        },
                    );
                    let _ = world.set(entity, FaceDirection(direction));
                    colliders.set(generated.target_idx.index());

                    let mut advanced = plan;
                    advanced.next_action_index += 1;
                    let _ = world.set(entity, advanced);
                }
                None => {
                    world.remove::<PathPlan>(entity);
                }
            }
        }
    }
}
