//! `gw-script` error type.
//!
//! Composed via `#[from]` the same way `gw-map::MapError` and
//! `gw_ecs::EcsError` are threaded through lower layers — this is the one
//! error surface a host actually sees (spec.md §6: "user-visible failures
//! from the host ... are outside the core", but parsing/building the world
//! the host hands in still has to fail *somehow*).

use gw_ecs::EcsError;
use gw_map::MapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("map structure references portal with out-of-range tile index: {0}")]
    InvalidMap(#[from] MapError),

    #[error(transparent)]
    Ecs(#[from] EcsError),

    #[error("tile code {0} is not one of the known tile kinds (0=obstacle, 1=normal, 2=fast)")]
    UnknownTileCode(i64),

    #[error("player {0} is not part of the current roster")]
    UnknownPlayer(String),

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("script metadata banner is missing its leading `//` marker")]
    MissingBanner,

    #[error("script metadata banner is not valid JSON: {0}")]
    InvalidBanner(serde_json::Error),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
