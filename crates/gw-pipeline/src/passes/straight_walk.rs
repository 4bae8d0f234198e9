//! Step 7: advance a straight-line walk one tile at a time.

use crate::components::{FaceDirection, Move, Position, StraightWalk};
use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_ecs::World;
use gw_map::Map;
use std::any::TypeId;

pub struct StraightWalkPass;

impl Pass for StraightWalkPass {
    fn name(&self) -> &'static str {
        "StraightWalkPass"
    }

    fn run(&mut self, world: &mut World, map: &Map, colliders: &mut TileBitSet) {
        let candidates = world.query_once(&[TypeId::of::<Position>(), TypeId::of::<StraightWalk>()], &[TypeId::of::<Move>()]);
        for entity in candidates {
            let Some(walk) = world.get::<StraightWalk>(entity).copied() else { continue };
            if walk.remaining_distance == 0 {
                world.remove::<StraightWalk>(entity);
                continue;
            }

            let Some(position) = world.get::<Position>(entity).copied() else { continue };
            let Ok(current) = map.grid().index_of(position.x, position.y) else {
                world.remove::<StraightWalk>(entity);
                continue;
            };

            match map.generate_move(current, walk.direction, Some(colliders)) {
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
                    let _ = world.set(entity, FaceDirection(walk.direction));
                    colliders.set(generated.target_idx.index());

                    let mut advanced = walk;
                    advanced.remaining_distance -= 1;
                    let _ = world.set(entity, advanced);
                }
                None => {
                    world.remove::<StraightWalk>(entity);
                }
            }
        }
    }
}
