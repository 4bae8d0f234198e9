//! The host-facing narrative event sink (spec §6 "Platform events").

/// One of the five narrative events the AI loop can emit.
///
/// `Send` so a host can forward events across a channel to a UI thread
/// without the engine itself taking on any threading of its own (spec §5:
/// the engine stays single-threaded; only the boundary type needs to cross).
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformEvent {
    ThinkingStart { player_id: String, content: String },
    ThinkingEnd { player_id: String },
    ConversationStart { conversation_id: String, player_ids: Vec<String> },
    ConversationUpdate { conversation_id: String, source: Option<String>, content: String },
    ConversationEnd { conversation_id: String },
}

pub trait Platform: Send {
    fn emit_event(&mut self, event: PlatformEvent);
}

/// A `Platform` that records every event it receives, in order — useful for
/// tests and for hosts with no narrative UI of their own.
#[derive(Default)]
pub struct RecordingPlatform {
    pub events: Vec<PlatformEvent>,
}

impl Platform for RecordingPlatform {
    fn emit_event(&mut self, event: PlatformEvent) {
        self.events.push(event);
    }
}
