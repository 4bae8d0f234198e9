//! Step 2: count down every `Timer↦T`, flipping exhausted ones to `Timeout↦T`.

use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_ecs::{RelationKind, World};
use gw_map::Map;

pub struct TimerPass;

impl Pass for TimerPass {
    fn name(&self) -> &'static str {
        "TimerPass"
    }

    fn run(&mut self, world: &mut World, _map: &Map, _colliders: &mut TileBitSet) {
        for (entity, target, value) in world.relation_rows(RelationKind::Timer) {
            let Some(remaining) = value.as_u64() else { continue };
            if remaining > 0 {
                let _ = world.set_relation(RelationKind::Timer, entity, target, serde_json::json!(remaining - 1));
            } else {
                world.remove_relation(RelationKind::Timer, entity, target);
                let _ = world.set_relation(RelationKind::Timeout, entity, target, serde_json::Value::Null);
            }
        }
    }
}
