//! `Pass`/`Pipeline` — the tick's ordered, synchronous sequence of passes
//! (spec §4.6).

use gw_core::bitset::TileBitSet;
use gw_ecs::World;
use gw_map::Map;

/// One stage of the tick pipeline.
///
/// Mirrors the donor framework's `ScheduleModifier` trait shape, but holds
/// an ordered `Vec<Box<dyn Pass>>` rather than a statically chained pair —
/// the pipeline's composition (core passes plus however many AI/user passes
/// a host plugs in) is only known at runtime.
pub trait Pass {
    /// Used only for `tracing` spans; has no effect on behaviour.
    fn name(&self) -> &'static str;

    /// `colliders` is this tick's dynamic-obstacle bitset: written by
    /// `DynamicColliderPass`, read by every pass downstream of it.
    fn run(&mut self, world: &mut World, map: &Map, colliders: &mut TileBitSet);
}

/// An ordered sequence of passes, run once per tick, followed by
/// `world.sync()` (spec §4.6 step 9).
///
/// Owns the collision bitset across ticks and `reset`s it in place rather
/// than reallocating (spec §4.2: "used across ticks to avoid per-tick
/// allocation").
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
    colliders: TileBitSet,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            passes: Vec::new(),
            colliders: TileBitSet::new(0),
        }
    }

    /// Builds the pipeline with the seven core passes in their fixed,
    /// spec-mandated order. AI/user passes (spec §4.6 step 8) are pushed
    /// afterward by the caller, ahead of any `run_tick` call.
    pub fn core() -> Self {
        use crate::passes::{
            DynamicColliderPass, MovementPass, PathFindingPass, PendingPass, PlanExecutionPass, StraightWalkPass, TimerPass,
        };
        Self::new()
            .push(PendingPass)
            .push(TimerPass)
            .push(DynamicColliderPass)
            .push(MovementPass)
            .push(PathFindingPass)
            .push(PlanExecutionPass)
            .push(StraightWalkPass)
    }

    pub fn push(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Same as [`Pipeline::push`], for a pass a caller only has as a
    /// `Box<dyn Pass>` — e.g. a host composing passes whose concrete type it
    /// doesn't name (an `AiLoop<R>` picked at runtime).
    pub fn push_boxed(mut self, pass: Box<dyn Pass>) -> Self {
        self.passes.push(pass);
        self
    }

    /// Runs every pass in order, then `world.sync()`.
    pub fn run_tick(&mut self, world: &mut World, map: &Map) {
        self.colliders.reset(map.grid().len());
        for pass in &mut self.passes {
            tracing::trace!(pass = pass.name(), "running pass");
            pass.run(world, map, &mut self.colliders);
        }
        world.sync();
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
