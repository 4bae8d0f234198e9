//! `gw-map` error type.

use gw_core::ids::PortalId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("portal {portal} references an out-of-bounds tile {index} (grid holds {bound} tiles)")]
    InvalidMap {
        portal: PortalId,
        index: u32,
        bound: u32,
    },
}

pub type MapResult<T> = Result<T, MapError>;
