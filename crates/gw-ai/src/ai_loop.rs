//! The demo AI state machine (spec §4.7 "AI loop"): Idle → Thinking →
//! Tip(waiting) → StraightWalk → Idle.

use crate::components::{PlayerId, PlayerInited, PlayerStatus, Thinking};
use crate::platform::{Platform, PlatformEvent};
use gw_core::rng::RandomSource;
use gw_ecs::{Entity, RelationKind, RelationTarget, World};
use gw_map::Map;
use gw_pipeline::{GoalPathfinding, Move, PathPlan, Pass, StraightWalk};
use gw_task::TaskManager;
use std::any::TypeId;

/// Tunable defaults from spec.md §4.7.
#[derive(Clone, Copy, Debug)]
pub struct AiConfig {
    pub thinking_delay_ms: u64,
    pub min_wait_ticks: u32,
    pub max_wait_ticks: u32,
    pub min_walk: u32,
    pub max_walk: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 1000,
            min_wait_ticks: 30,
            max_wait_ticks: 100,
            min_walk: 5,
            max_walk: 10,
        }
    }
}

/// A cheap, cloneable handle onto the AI loop's task manager, for a host to
/// call back into once its own real-clock timer fires (spec §4.7
/// `start(entity)` returning a `complete()`, driven externally per spec §5:
/// "the task manager's asynchronous complete(), driven by a host-provided
/// timer").
#[derive(Clone)]
pub struct ThinkingHandle(TaskManager<Thinking>);

impl ThinkingHandle {
    /// Call once `thinkingDelayMs` has elapsed since `entity` entered the
    /// Idle→Thinking transition. A no-op if the task was already cancelled
    /// (e.g. the entity was deleted, or something else called `stop`).
    pub fn complete(&self, world: &mut World, entity: Entity) {
        self.0.complete(world, entity);
    }

    /// Drops any `Task↦Thinking` relation a handle didn't survive a snapshot
    /// round trip to reclaim. Call once, right after `World::restore`.
    pub fn reap_orphans(&self, world: &mut World) {
        self.0.reap_orphans(world);
    }
}

/// The AI loop itself. Implements [`Pass`] so a host can `Pipeline::push`
/// it alongside the core movement passes (spec §4.6 step 8, "AI and user
/// passes run after core movement passes"); [`AiLoop::run_once`] is the same
/// three queries called directly, for hosts or tests that don't drive it
/// through a `Pipeline`.
pub struct AiLoop<R: RandomSource> {
    tasks: TaskManager<Thinking>,
    config: AiConfig,
    rng: R,
    platform: Box<dyn Platform>,
}

impl<R: RandomSource> AiLoop<R> {
    pub fn new(rng: R, config: AiConfig, platform: Box<dyn Platform>) -> (Self, ThinkingHandle) {
        let tasks = TaskManager::new();
        let handle = ThinkingHandle(tasks.clone());
        (
            Self {
                tasks,
                config,
                rng,
                platform,
            },
            handle,
        )
    }

    /// Registers the component types this loop touches and the task
    /// manager's relation hooks. Call once per `World`.
    pub fn install(&self, world: &mut World) {
        world.register::<PlayerId>();
        world.register::<PlayerStatus>();
        world.register::<PlayerInited>();
        world.register::<Thinking>();
        self.tasks.install(world);
    }

    /// Drops any `Task↦Thinking` relation left behind by a handle that did
    /// not survive a snapshot round trip. Call once, right after
    /// `World::restore`.
    pub fn reap_orphans(&self, world: &mut World) {
        self.tasks.reap_orphans(world);
    }

    /// Runs the three-query state machine once.
    pub fn run_once(&mut self, world: &mut World) {
        self.run_idle_pass(world);
        self.run_task_done_pass(world);
        self.run_timer_fired_pass(world);
    }

    fn run_idle_pass(&mut self, world: &mut World) {
        let candidates = world.query_once(
            &[TypeId::of::<PlayerInited>(), TypeId::of::<PlayerId>()],
            &[
                TypeId::of::<Move>(),
                TypeId::of::<StraightWalk>(),
                TypeId::of::<PathPlan>(),
                TypeId::of::<GoalPathfinding>(),
                TypeId::of::<Thinking>(),
            ],
        );
        for entity in candidates {
            let _ = world.set(entity, Thinking);
            let _ = world.set(entity, PlayerStatus::Thinking);
            self.tasks.start(world, entity);
            tracing::debug!(entity = %entity, delay_ms = self.config.thinking_delay_ms, "player started thinking");
        }
    }

    fn run_task_done_pass(&mut self, world: &mut World) {
        let target = RelationTarget::Component(Thinking::NAME);
        let done = world.relation_sources(RelationKind::TaskCompleted, target);
        for entity in done {
            if !world.has::<Thinking>(entity) {
                continue;
            }
            if world.has_relation(RelationKind::Timer, entity, target) || world.has_relation(RelationKind::Timeout, entity, target) {
                continue;
            }
            let wait = self.rng.range_inclusive(self.config.min_wait_ticks, self.config.max_wait_ticks);
            let _ = world.set(entity, PlayerStatus::Tip);
            let _ = world.set_timer(entity, target, wait);

            if let Some(PlayerId(id)) = world.get::<PlayerId>(entity) {
                self.platform.emit_event(PlatformEvent::ThinkingStart {
                    player_id: id.clone(),
                    content: format!("thinking for {wait} ticks"),
                });
            }
        }
    }

    fn run_timer_fired_pass(&mut self, world: &mut World) {
        let target = RelationTarget::Component(Thinking::NAME);
        let timed_out = world.relation_sources(RelationKind::Timeout, target);
        for entity in timed_out {
            if !world.has::<Thinking>(entity) || !world.has::<PlayerId>(entity) {
                continue;
            }

            if let Some(PlayerId(id)) = world.get::<PlayerId>(entity) {
                self.platform.emit_event(PlatformEvent::ThinkingEnd { player_id: id.clone() });
            }

            world.remove::<PlayerStatus>(entity);
            world.remove::<Thinking>(entity);
            world.remove_relation(RelationKind::Task, entity, target);
            world.remove_relation(RelationKind::TaskCompleted, entity, target);
            world.remove_relation(RelationKind::Timeout, entity, target);

            let direction = self.rng.direction();
            let distance = self.rng.range_inclusive(self.config.min_walk, self.config.max_walk);
            let _ = world.set(entity, StraightWalk { direction, remaining_distance: distance });
        }
    }
}

impl<R: RandomSource + 'static> Pass for AiLoop<R> {
    fn name(&self) -> &'static str {
        "AiLoopPass"
    }

    fn run(&mut self, world: &mut World, _map: &Map, _colliders: &mut gw_core::bitset::TileBitSet) {
        self.run_once(world);
    }
}
