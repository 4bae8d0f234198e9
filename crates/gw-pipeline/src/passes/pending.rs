//! Step 1: apply a pending face-direction change while stationary.

use crate::components::{FaceDirection, Move};
use crate::pipeline::Pass;
use gw_core::bitset::TileBitSet;
use gw_core::geometry::Direction;
use gw_ecs::{Component, RelationKind, RelationTarget, World};
use gw_map::Map;

pub struct PendingPass;

impl Pass for PendingPass {
    fn name(&self) -> &'static str {
        "PendingPass"
    }

    fn run(&mut self, world: &mut World, _map: &Map, _colliders: &mut TileBitSet) {
        let target = RelationTarget::Component(FaceDirection::NAME);
        for entity in world.relation_sources(RelationKind::Pending, target) {
            if world.has::<Move>(entity) {
                continue;
            }
            let Some(value) = world.get_relation(RelationKind::Pending, entity, target).cloned() else {
                continue;
            };
            if let Ok(direction) = serde_json::from_value::<Direction>(value) {
                let _ = world.set(entity, FaceDirection(direction));
            }
            world.remove_relation(RelationKind::Pending, entity, target);
        }
    }
}
