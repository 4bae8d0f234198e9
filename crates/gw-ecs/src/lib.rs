//! Entity-component store with relations, synchronous hooks, and JSON
//! snapshotting.
//!
//! | module        | purpose                                              |
//! |---------------|-------------------------------------------------------|
//! | `entity`      | `Entity` id, generation-guarded slot allocator         |
//! | `component`   | `Component` trait, type-erased per-type storage column |
//! | `relation`    | component-to-entity/component relations                |
//! | `world`       | `World`: ties the above together, queries, snapshot    |
//! | `error`       | `EcsError`                                             |

mod component;
mod entity;
mod error;
mod relation;
mod world;

#[cfg(test)]
mod tests;

pub use component::Component;
pub use entity::Entity;
pub use error::{EcsError, EcsResult};
pub use relation::{RelationKind, RelationTarget};
pub use world::{ComponentEntry, ComponentType, EntitySnapshot, QueryBuilder, QueryId, Snapshot, TargetRef, World};
