//! Demo AI loop: an Idle → Thinking → Tip → StraightWalk state machine over
//! player entities (spec §4.7).
//!
//! | module        | contents                                             |
//! |---------------|---------------------------------------------------------|
//! | `components`  | `PlayerId`, `PlayerStatus`, `PlayerInited`, `Thinking` |
//! | `platform`    | `Platform` trait, `PlatformEvent`, `RecordingPlatform` |
//! | `ai_loop`     | `AiConfig`, `AiLoop`, `ThinkingHandle`                 |
//!
//! This is explicitly a *demo* loop, not a general AI framework (spec.md
//! §1 Non-goals: "no AI beyond the demo loop specified in §4.7") — the
//! state machine is the fixed three-query cycle spec.md describes, not an
//! extensible behavior tree.

pub mod ai_loop;
pub mod components;
pub mod platform;


pub use ai_loop::{AiConfig, AiLoop, ThinkingHandle};
pub use components::{PlayerId, PlayerInited, PlayerStatus, Thinking};
pub use platform::{Platform, PlatformEvent, RecordingPlatform};
