//! Core movement/pathfinding components (spec §3, §3.1).

use gw_core::geometry::Direction;
use gw_core::ids::TileIndex;
use gw_ecs::Component;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}
impl Component for Position {
    const NAME: &'static str = "Position";
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FaceDirection(pub Direction);
impl Component for FaceDirection {
    const NAME: &'static str = "FaceDirection";
}

/// Tag: this entity occupies its current (and, if moving, target) tile for
/// `DynamicColliderPass`'s collision bitset.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct DynamicCollider;
impl Component for DynamicCollider {
    const NAME: &'static str = "DynamicCollider";
}

/// Present only while an entity is in flight between two tiles.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub total_ticks: u32,
    pub remaining_ticks: u32,
    pub target_idx: TileIndex,
    pub target_position: (u32, u32),
}
impl Component for Move {
    const NAME: &'static str = "Move";
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StraightWalk {
    pub direction: Direction,
    pub remaining_distance: u32,
}
impl Component for StraightWalk {
    const NAME: &'static str = "StraightWalk";
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PathPlan {
    pub target_index: TileIndex,
    pub path: Vec<Direction>,
    pub next_action_index: usize,
}
impl Component for PathPlan {
    const NAME: &'static str = "PathPlan";
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GoalPathfinding {
    pub target_index: TileIndex,
    pub retry_count: u32,
    pub max_retries: u32,
}
impl Component for GoalPathfinding {
    const NAME: &'static str = "GoalPathfinding";
}
