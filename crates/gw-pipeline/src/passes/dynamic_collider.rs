//! Step 3: rebuild the dynamic collision bitset for this tick.

use crate::components::{DynamicCollider, Move, Position};
use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_ecs::World;
use gw_map::Map;
use std::any::TypeId;

pub struct DynamicColliderPass;

impl Pass for DynamicColliderPass {
    fn name(&self) -> &'static str {
        "DynamicColliderPass"
    }

    fn run(&mut self, world: &mut World, map: &Map, colliders: &mut TileBitSet) {
        let entities = world.query_once(&[TypeId::of::<DynamicCollider>(), TypeId::of::<Position>()], &[]);
        for entity in entities {
            let Some(position) = world.get::<Position>(entity) else { continue };
            if let Ok(idx) = map.grid().index_of(position.x, position.y) {
                colliders.set(idx.index());
            }
            if let Some(mv) = world.get::<Move>(entity) {
                colliders.set(mv.target_idx.index());
            }
        }
    }
}
