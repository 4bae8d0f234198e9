//! Tick pipeline: core movement/pathfinding components and passes (spec §4.6).
//!
//! | module       | contents                                                |
//! |--------------|-----------------------------------------------------------|
//! | `components` | `Position`, `FaceDirection`, `Move`, `StraightWalk`, ... |
//! | `pipeline`   | `Pass` trait, `Pipeline`                                 |
//! | `passes`     | The seven fixed-order core passes                        |
//!
//! `gw-pipeline` has no public fallible API of its own: every outcome the
//! spec describes here (pathfinding exhaustion, a blocked plan step) is a
//! component-state transition, not an `Err` — see spec.md §7's error list,
//! which assigns nothing to the pipeline layer.

pub mod components;
pub mod passes;
pub mod pipeline;


pub use components::{DynamicCollider, FaceDirection, GoalPathfinding, Move, PathPlan, Position, StraightWalk};
pub use pipeline::{Pass, Pipeline};
