//! Step 4: advance in-flight movers, completing those on their final tick.

use crate::components::{Move, Position};
use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_ecs::World;
use gw_map::Map;
use std::any::TypeId;

pub struct MovementPass;

impl Pass for MovementPass {
    fn name(&self) -> &'static str {
        "MovementPass"
    }

    fn run(&mut self, world: &mut World, _map: &Map, _colliders: &mut TileBitSet) {
        for entity in world.query_once(&[TypeId::of::<Move>()], &[]) {
            let Some(mv) = world.get::<Move>(entity).copied() else { continue };
            let mut advanced = mv;
            advanced.remaining_ticks -= 1;
            if advanced.remaining_ticks <= 1 {
                // Reaching 1 *is* the final tick of travel (spec §4.6 step 4):
                // finish now rather than persisting a dangling remaining=1.
                let _ = world.set(
                    entity,
                    Position {
                        x: mv.target_position.0,
                        y: mv.target_position.1,
                    },
                );
                world.remove::<Move>(entity);
            } else {
                let _ = world.set(entity, advanced);
            }
        }
    }
}
