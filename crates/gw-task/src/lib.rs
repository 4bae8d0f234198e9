//! Long-running, cancellable work tracked via the `Task`/`TaskCompleted`
//! relations (spec §4.7 "Task manager").
//!
//! `World`'s relation hooks only see `(Entity, RelationTarget)` — they can't
//! reach back into `World` to mutate it while it's mid-call (the same split
//! `World::set`/`Column::set` borrow discipline `gw-ecs` already uses for its
//! component hooks). So the orphan-relation hook can only flag an entity; the
//! actual cleanup (removing the stale relation, logging the warning) happens
//! in [`TaskManager::reap_orphans`], which a host calls once after anything
//! that can produce an orphan — in practice, right after `World::restore`.

use gw_ecs::{Component, Entity, RelationKind, RelationTarget, World};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

/// A shared cancellation flag handed back by [`TaskManager::start`].
///
/// Cloning shares the same underlying flag; cancelling any clone cancels all
/// of them. This engine is single-threaded and cooperative (no passes run
/// concurrently), so a plain `Rc<Cell<bool>>` is enough — there's no async
/// runtime or thread pool here for a task to actually race against.
#[derive(Clone)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    fn new() -> Self {
        Self(Rc::new(Cell::new(false)))
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Tracks in-flight tasks for one component-target type `T` (e.g. the
/// `Thinking` delay in `gw-ai`'s state machine).
///
/// One `TaskManager<T>` is meant to be installed per `World` for the
/// lifetime of that world; it owns no `World` state itself beyond the
/// `Rc<RefCell<_>>` bookkeeping its hooks need to share with `self`.
pub struct TaskManager<T: Component> {
    handles: Rc<RefCell<HashMap<Entity, CancelHandle>>>,
    orphans: Rc<RefCell<Vec<Entity>>>,
    _marker: PhantomData<T>,
}

impl<T: Component> Default for TaskManager<T> {
    fn default() -> Self {
        Self {
            handles: Rc::new(RefCell::new(HashMap::new())),
            orphans: Rc::new(RefCell::new(Vec::new())),
            _marker: PhantomData,
        }
    }
}

/// Cheap: shares the same underlying tables, it does not duplicate them.
/// Lets a host keep one clone pushed into the pipeline (wrapped as a `Pass`)
/// and another held onto for out-of-band `complete()` calls from its own
/// timer, without wrapping the whole manager in `Rc<RefCell<_>>` itself.
impl<T: Component> Clone for TaskManager<T> {
    fn clone(&self) -> Self {
        Self {
            handles: self.handles.clone(),
            orphans: self.orphans.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Component> TaskManager<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn target() -> RelationTarget {
        RelationTarget::Component(T::NAME)
    }

    /// Registers this manager's two relation hooks on `world`. Call once,
    /// right after constructing both the `World` and this manager.
    pub fn install(&self, world: &mut World) {
        let known = self.handles.clone();
        let orphans = self.orphans.clone();
        world.on_relation_set(RelationKind::Task, move |entity, target, _value| {
            if target == Self::target() && !known.borrow().contains_key(&entity) {
                orphans.borrow_mut().push(entity);
            }
        });

        let known = self.handles.clone();
        world.on_relation_remove(RelationKind::Task, move |entity, target| {
            if target == Self::target() {
                if let Some(handle) = known.borrow_mut().remove(&entity) {
                    handle.cancel();
                }
            }
        });
    }

    /// Starts tracking a task on `entity`: attaches `Task↦T` and returns a
    /// handle the caller can poll for early cancellation.
    pub fn start(&self, world: &mut World, entity: Entity) -> CancelHandle {
        let handle = CancelHandle::new();
        self.handles.borrow_mut().insert(entity, handle.clone());
        let _ = world.set_relation(RelationKind::Task, entity, Self::target(), serde_json::Value::Null);
        handle
    }

    /// Marks the task done: swaps `Task↦T` for `TaskCompleted↦T` and flushes.
    /// A no-op if `entity`'s task was already cancelled or stopped — a timer
    /// that fires after `stop()` shouldn't resurrect a relation nobody's
    /// waiting on.
    pub fn complete(&self, world: &mut World, entity: Entity) {
        if self.handles.borrow_mut().remove(&entity).is_none() {
            return;
        }
        world.remove_relation(RelationKind::Task, entity, Self::target());
        let _ = world.set_relation(RelationKind::TaskCompleted, entity, Self::target(), serde_json::Value::Null);
        world.sync();
    }

    /// Cancels and fully retracts a task: drops the handle, removes the `T`
    /// component itself along with both relations.
    pub fn stop(&self, world: &mut World, entity: Entity) {
        if let Some(handle) = self.handles.borrow_mut().remove(&entity) {
            handle.cancel();
        }
        world.remove::<T>(entity);
        world.remove_relation(RelationKind::Task, entity, Self::target());
        world.remove_relation(RelationKind::TaskCompleted, entity, Self::target());
    }

    /// Drops every `Task↦T` relation flagged by the `on_relation_set` hook as
    /// having no registered handle, logging a warning for each. Intended to
    /// run once right after `World::restore` — a snapshot taken mid-task
    /// carries the relation forward but this manager's in-memory handles
    /// never survive the round trip.
    pub fn reap_orphans(&self, world: &mut World) {
        let pending: Vec<Entity> = self.orphans.borrow_mut().drain(..).collect();
        for entity in pending {
            if world.has_relation(RelationKind::Task, entity, Self::target()) {
                tracing::warn!(entity = %entity, target = T::NAME, "orphaned Task relation with no registered handle, dropping");
                world.remove_relation(RelationKind::Task, entity, Self::target());
            }
        }
    }
}
