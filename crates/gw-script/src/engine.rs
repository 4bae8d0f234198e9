//! `GridScript` — the concrete `ScriptApi` implementation (spec.md §4.8).

use crate::error::{ScriptError, ScriptResult};
use crate::types::{direction_to_u8, MoveView, PlayerInit, PlayerView, ScriptInitOptions};
use gw_ai::{AiLoop, PlayerId, PlayerInited, PlayerStatus, ThinkingHandle};
use gw_core::geometry::Direction;
use gw_core::rng::SmallRngSource;
use gw_ecs::{Entity, World};
use gw_map::Map;
use gw_pipeline::{DynamicCollider, FaceDirection, GoalPathfinding, Move, PathPlan, Pipeline, Position, StraightWalk};
use std::collections::HashMap;

/// The `setupPlayers`/`tick`/`save` façade over one `World` + `Map` +
/// `Pipeline` (spec.md §6 `ScriptApi`).
pub struct GridScript {
    world: World,
    map: Map,
    pipeline: Pipeline,
    roster: HashMap<String, Entity>,
    /// `total_ticks` of the `Move` an entity had *last* tick, so a player
    /// whose move completed this tick still gets one `{current: -1, total}`
    /// frame (spec.md §4.8).
    last_move: HashMap<Entity, u32>,
    /// Set only when `ScriptInitOptions.ai` was `Some` — lets `save`/restore
    /// reap orphaned `Thinking` tasks without the caller needing to know
    /// whether AI is even wired in.
    thinking: Option<ThinkingHandle>,
}

impl GridScript {
    pub fn new(options: ScriptInitOptions) -> ScriptResult<Self> {
        let map = options.structure.build()?;
        let mut world = World::new();
        world.register::<Position>();
        world.register::<FaceDirection>();
        world.register::<Move>();
        world.register::<StraightWalk>();
        world.register::<PathPlan>();
        world.register::<GoalPathfinding>();
        world.register::<DynamicCollider>();
        world.register::<PlayerId>();
        world.register::<PlayerInited>();

        let mut pipeline = Pipeline::core();
        let mut thinking = None;
        if let Some(config) = options.ai {
            let (ai_loop, handle) = AiLoop::new(SmallRngSource::new(options.rng_seed), config, options.platform);
            ai_loop.install(&mut world);
            pipeline = pipeline.push_boxed(Box::new(ai_loop));
            thinking = Some(handle);
        }

        let mut script = Self {
            world,
            map,
            pipeline,
            roster: HashMap::new(),
            last_move: HashMap::new(),
            thinking,
        };

        if let Some(bytes) = options.saved_data {
            script.restore(&bytes)?;
        }

        Ok(script)
    }

    /// Hands the host a handle it can call `complete()` on once its own
    /// real-clock timer for an entity's thinking delay elapses (spec.md §5:
    /// "the task manager's asynchronous `complete()`, driven by a
    /// host-provided timer"). `None` when no `AiConfig` was supplied.
    ///
    /// This lives outside the `ScriptApi` trait itself — spec.md's trait
    /// shape has no room for it, and a boxed `dyn ScriptApi` can't expose it;
    /// hosts that need it hold a concrete `GridScript` instead.
    pub fn thinking_handle(&self) -> Option<&ThinkingHandle> {
        self.thinking.as_ref()
    }

    /// Convenience wrapper around `thinking_handle().complete(world, entity)`
    /// for hosts that only know the player by id, not by `Entity` — a no-op
    /// if no `AiConfig` was supplied.
    pub fn complete_thinking(&mut self, player_id: &str) -> ScriptResult<()> {
        let entity = *self.roster.get(player_id).ok_or_else(|| ScriptError::UnknownPlayer(player_id.to_string()))?;
        if let Some(handle) = &self.thinking {
            handle.complete(&mut self.world, entity);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn entity_for(&self, player_id: &str) -> Entity {
        self.roster[player_id]
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn restore(&mut self, bytes: &[u8]) -> ScriptResult<()> {
        let snapshot: gw_ecs::Snapshot = serde_json::from_slice(bytes)?;
        self.world.restore(&snapshot)?;
        if let Some(handle) = &self.thinking {
            handle.reap_orphans(&mut self.world);
        }
        self.roster = self
            .world
            .query_once(&[std::any::TypeId::of::<PlayerId>()], &[])
            .into_iter()
            .filter_map(|entity| self.world.get::<PlayerId>(entity).map(|id| (id.0.clone(), entity)))
            .collect();
        Ok(())
    }

    fn player_view(&mut self, entity: Entity) -> Option<PlayerView> {
        let position = *self.world.get::<Position>(entity)?;
        let facing = self.world.get::<FaceDirection>(entity).map(|f| f.0).unwrap_or(Direction::Up);

        let move_view = if let Some(m) = self.world.get::<Move>(entity) {
            self.last_move.insert(entity, m.total_ticks);
            Some(MoveView {
                current: (m.total_ticks - m.remaining_ticks) as i64,
                total: m.total_ticks,
            })
        } else if let Some(last_total) = self.last_move.remove(&entity) {
            Some(MoveView { current: -1, total: last_total })
        } else {
            None
        };

        let status = self.world.get::<PlayerStatus>(entity).map(player_status_json);

        Some(PlayerView {
            x: position.x,
            y: position.y,
            direction: direction_to_u8(facing),
            r#move: move_view,
            status,
        })
    }
}

fn player_status_json(status: &PlayerStatus) -> serde_json::Value {
    match status {
        PlayerStatus::Thinking => serde_json::Value::String("thinking".to_string()),
        PlayerStatus::Tip => serde_json::Value::String("tip".to_string()),
        PlayerStatus::Custom(text) => serde_json::Value::String(text.clone()),
    }
}

impl crate::ScriptApi for GridScript {
    fn setup_players(&mut self, players: &HashMap<String, PlayerInit>) -> ScriptResult<()> {
        let departed: Vec<String> = self.roster.keys().filter(|id| !players.contains_key(*id)).cloned().collect();
        for id in departed {
            if let Some(entity) = self.roster.remove(&id) {
                self.world.delete(entity);
                self.last_move.remove(&entity);
            }
        }

        for (id, init) in players {
            if self.roster.contains_key(id) {
                continue;
            }
            let entity = self.world.spawn();
            self.world.set(entity, Position { x: init.x, y: init.y })?;
            let facing: Option<Direction> = init.facing.and_then(Into::into);
            self.world.set(entity, FaceDirection(facing.unwrap_or(Direction::Up)))?;
            self.world.set(entity, PlayerId(id.clone()))?;
            self.world.set(entity, PlayerInited)?;
            self.roster.insert(id.clone(), entity);
        }

        self.world.sync();
        Ok(())
    }

    fn tick(&mut self) -> ScriptResult<HashMap<String, PlayerView>> {
        self.pipeline.run_tick(&mut self.world, &self.map);

        let ids: Vec<String> = self.roster.keys().cloned().collect();
        let mut out = HashMap::with_capacity(ids.len());
        for id in ids {
            let entity = self.roster[&id];
            if let Some(view) = self.player_view(entity) {
                out.insert(id, view);
            }
        }
        Ok(out)
    }

    fn save(&self) -> ScriptResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.world.serialize())?)
    }
}
