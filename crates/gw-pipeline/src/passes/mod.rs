//! The seven core passes, in their fixed pipeline order (spec §4.6).

mod dynamic_collider;
mod movement;
mod pathfinding;
mod pending;
mod plan_execution;
mod straight_walk;
mod timer;

pub use dynamic_collider::DynamicColliderPass;
pub use movement::MovementPass;
pub use pathfinding::PathFindingPass;
pub use pending::PendingPass;
pub use plan_execution::PlanExecutionPass;
pub use straight_walk::StraightWalkPass;
pub use timer::TimerPass;
