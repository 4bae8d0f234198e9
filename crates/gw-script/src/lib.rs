//! Script façade: player-roster diffing, a tick driver over `gw-pipeline`,
//! and snapshot encode/decode (spec.md §4.8, C10).
//!
//! | module     | contents                                               |
//! |------------|-----------------------------------------------------------|
//! | `types`    | `MapStructure`, `PlayerInit`, `PlayerView`, `ScriptEntrypoint` |
//! | `error`    | `ScriptError`                                          |
//! | `banner`   | `ScriptMetadata`, `parse_banner`                       |
//! | `engine`   | `GridScript`, the concrete `ScriptApi`                 |
//!
//! This crate is the one surface a host actually links against — everything
//! else (`gw-ecs`, `gw-map`, `gw-pipeline`, `gw-ai`) is plumbing a host never
//! names directly (spec.md §1: "the core treats the host through two narrow
//! interfaces only").

pub mod banner;
pub mod engine;
pub mod error;
pub mod types;


pub use banner::{parse_banner, ScriptMetadata};
pub use engine::GridScript;
pub use error::{ScriptError, ScriptResult};
pub use gw_ai::{AiConfig, Platform, PlatformEvent, RecordingPlatform, ThinkingHandle};
pub use types::{
    AreaSpec, MapStructure, MoveView, PlayerInit, PlayerView, PortalDirection, PortalSpec, ScriptEntrypoint, ScriptInitOptions,
};

use std::collections::HashMap;

/// The façade a host calls into (spec.md §6 `ScriptApi`), reproduced exactly
/// — `setupPlayers`, `tick`, and `save` are the only three operations a
/// host ever invokes.
pub trait ScriptApi {
    fn setup_players(&mut self, players: &HashMap<String, PlayerInit>) -> Result<(), ScriptError>;
    fn tick(&mut self) -> Result<HashMap<String, PlayerView>, ScriptError>;
    fn save(&self) -> Result<Vec<u8>, ScriptError>;
}
