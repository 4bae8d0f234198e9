//! Player-facing components driving the demo AI loop (spec §4.7).

use gw_ecs::Component;
use serde::{Deserialize, Serialize};

/// The host-assigned identity a player entity is addressed by externally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl Component for PlayerId {
    const NAME: &'static str = "PlayerId";
}

/// What a player is currently doing, surfaced to the host via `PlayerView`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Thinking,
    Tip,
    Custom(String),
}

impl Component for PlayerStatus {
    const NAME: &'static str = "PlayerStatus";
}

/// Marks an entity as having completed the script's player-setup step, so
/// the idle query doesn't pick up a half-initialized entity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerInited;

impl Component for PlayerInited {
    const NAME: &'static str = "PlayerInited";
}

/// Tag marking a player as mid-"thinking" — the target of the `Timer`/
/// `Timeout`/`Task`/`TaskCompleted` relations the state machine cycles
/// through.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Thinking;

impl Component for Thinking {
    const NAME: &'static str = "Thinking";
}
