//! grid_demo — smallest example for the gw grid-world simulation engine.
//!
//! Walks 4 players across a 10x10 open square for 60 ticks, driving the demo
//! AI loop (Idle -> Thinking -> Tip -> StraightWalk -> Idle) by hand in place
//! of a real host's clock-driven `complete()` call.

use std::time::Instant;

use anyhow::Result;

use gw_ai::{AiConfig, Platform, PlatformEvent};
use gw_script::{GridScript, MapStructure, PlayerInit, ScriptApi, ScriptInitOptions};

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_SIDE:    u32 = 10;
const PLAYER_COUNT: u32 = 4;
const SEED:         u64 = 1337;
const TICKS:        u32 = 60;

// ── Narrative sink ────────────────────────────────────────────────────────────

/// Prints each AI-loop narrative event to stdout as it happens, instead of
/// forwarding it to a UI thread the way a real host would.
#[derive(Default)]
struct ConsolePlatform {
    events_seen: usize,
}

impl Platform for ConsolePlatform {
    fn emit_event(&mut self, event: PlatformEvent) {
        self.events_seen += 1;
        match event {
            PlatformEvent::ThinkingStart { player_id, content } => {
                println!("  [{player_id}] {content}");
            }
            PlatformEvent::ThinkingEnd { player_id } => {
                println!("  [{player_id}] done thinking");
            }
            PlatformEvent::ConversationStart { .. }
            | PlatformEvent::ConversationUpdate { .. }
            | PlatformEvent::ConversationEnd { .. } => {}
        }
    }
}

// ── Map ───────────────────────────────────────────────────────────────────────

fn build_map() -> MapStructure {
    let side = MAP_SIDE;
    let mut tiles = vec![1i64; (side * side) as usize];
    // A short obstacle wall down the middle, with a one-tile gap to walk through.
    for y in 0..side {
        if y != side / 2 {
            tiles[(y * side + side / 2) as usize] = 0;
        }
    }
    MapStructure {
        width: side,
        height: side,
        tiles,
        spawn_points: (0..PLAYER_COUNT).map(|i| (i, 0)).collect(),
        portals: vec![],
        areas: vec![],
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== grid_demo — gw grid-world engine ===");
    println!("Players: {PLAYER_COUNT}  |  Ticks: {TICKS}  |  Seed: {SEED}");
    println!();

    // 1. Build the map.
    let structure = build_map();
    println!("Map: {MAP_SIDE}x{MAP_SIDE}, obstacle wall with a mid-row gap");

    // 2. Build the script with the demo AI loop enabled.
    let ai = AiConfig {
        thinking_delay_ms: 250,
        min_wait_ticks: 3,
        max_wait_ticks: 6,
        min_walk: 2,
        max_walk: 4,
    };
    let mut script = GridScript::new(ScriptInitOptions {
        saved_data: None,
        structure,
        platform: Box::new(ConsolePlatform::default()),
        ai: Some(ai),
        rng_seed: SEED,
    })?;
    tracing::info!(thinking_delay_ms = ai.thinking_delay_ms, "ai loop enabled");

    // 3. Spawn the player roster.
    let mut players = std::collections::HashMap::new();
    for i in 0..PLAYER_COUNT {
        players.insert(format!("player-{i}"), PlayerInit { x: i, y: 0, facing: None });
    }
    script.setup_players(&players)?;
    println!("Spawned {} players along the top row", players.len());
    println!();

    // 4. Run the tick loop, completing a player's "thinking" as soon as its
    //    status turns up (standing in for a host's real-clock timer).
    let t0 = Instant::now();
    let mut thinking_completions = 0usize;
    for tick in 0..TICKS {
        let views = script.tick()?;
        for (id, view) in &views {
            if view.status.as_ref().and_then(|v| v.as_str()) == Some("thinking") {
                script.complete_thinking(id)?;
                thinking_completions += 1;
            }
        }
        tracing::trace!(tick, "tick complete");
    }
    let elapsed = t0.elapsed();

    // 5. Round-trip a snapshot to prove save/restore works end to end.
    let snapshot = script.save()?;
    let mut restored = GridScript::new(ScriptInitOptions {
        saved_data: Some(snapshot),
        structure: build_map(),
        platform: Box::new(ConsolePlatform::default()),
        ai: Some(ai),
        rng_seed: SEED,
    })?;
    let restored_views = restored.tick()?;

    // 6. Summary.
    println!();
    println!("Simulation complete in {:.3} s ({TICKS} ticks)", elapsed.as_secs_f64());
    println!("  thinking completions driven: {thinking_completions}");
    println!();

    println!("{:<12} {:<6} {:<6} {:<10}", "Player", "X", "Y", "Status");
    println!("{}", "-".repeat(36));
    let mut ids: Vec<_> = restored_views.keys().cloned().collect();
    ids.sort();
    for id in ids {
        let view = &restored_views[&id];
        let status = view.status.as_ref().and_then(|v| v.as_str()).unwrap_or("-").to_string();
        println!("{:<12} {:<6} {:<6} {:<10}", id, view.x, view.y, status);
    }

    Ok(())
}
