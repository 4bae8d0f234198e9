//! `gw-ecs` error type.
//!
//! Per spec.md §7, these are the only two error kinds allowed to cross the
//! pipeline boundary — everything else is a component-state transition.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
    #[error("operation on a deleted or unknown entity {0}")]
    EntityGone(crate::entity::Entity),

    #[error("unknown component `{0}` encountered during restore")]
    UnknownComponent(String),
}

pub type EcsResult<T> = Result<T, EcsError>;
