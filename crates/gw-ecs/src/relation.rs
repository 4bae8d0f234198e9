//! Relations: components parameterised by a target entity or a target
//! component type (spec §4.5, §9 "cyclic references").

use crate::entity::Entity;
use std::collections::BTreeMap;

/// The closed set of relation kinds this engine uses (spec §3/§4.7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RelationKind {
    Pending,
    Timer,
    Timeout,
    Task,
    TaskCompleted,
}

/// What a relation row points at.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RelationTarget {
    Entity(Entity),
    /// The target's registered component name (spec: relations parameterised
    /// by a component *type*, e.g. `Timer↦FaceDirection`).
    Component(&'static str),
}

#[derive(Default)]
pub(crate) struct RelationHooks {
    on_set: Vec<Box<dyn FnMut(Entity, RelationTarget, &serde_json::Value)>>,
    on_remove: Vec<Box<dyn FnMut(Entity, RelationTarget)>>,
}

/// Relation rows, keyed by `(kind, source entity, target)`.
///
/// Values are stored as `serde_json::Value` rather than a second
/// type-erasure vtable: relation payloads in this engine are either a plain
/// integer (`Timer`) or absent (tag relations), and the snapshot format is
/// JSON natively, so there is nothing a typed column would buy here that a
/// `Value` doesn't already give for free.
#[derive(Default)]
pub(crate) struct RelationIndex {
    rows: BTreeMap<(RelationKind, Entity, RelationTarget), serde_json::Value>,
    hooks: std::collections::HashMap<RelationKind, RelationHooks>,
}

impl RelationIndex {
    pub(crate) fn set(&mut self, kind: RelationKind, entity: Entity, target: RelationTarget, value: serde_json::Value) {
        self.rows.insert((kind, entity, target), value.clone());
        if let Some(hooks) = self.hooks.get_mut(&kind) {
            for hook in &mut hooks.on_set {
                hook(entity, target, &value);
            }
        }
    }

    pub(crate) fn get(&self, kind: RelationKind, entity: Entity, target: RelationTarget) -> Option<&serde_json::Value> {
        self.rows.get(&(kind, entity, target))
    }

    pub(crate) fn has(&self, kind: RelationKind, entity: Entity, target: RelationTarget) -> bool {
        self.rows.contains_key(&(kind, entity, target))
    }

    pub(crate) fn remove(&mut self, kind: RelationKind, entity: Entity, target: RelationTarget) -> Option<serde_json::Value> {
        let removed = self.rows.remove(&(kind, entity, target));
        if removed.is_some() {
            if let Some(hooks) = self.hooks.get_mut(&kind) {
                for hook in &mut hooks.on_remove {
                    hook(entity, target);
                }
            }
        }
        removed
    }

    /// Every row of `kind`, regardless of source entity or target — used by
    /// passes that sweep a whole relation kind each tick (e.g. `TimerPass`).
    pub(crate) fn rows_of_kind(&self, kind: RelationKind) -> Vec<(Entity, RelationTarget, serde_json::Value)> {
        self.rows
            .iter()
            .filter(|((k, _, _), _)| *k == kind)
            .map(|((_, entity, target), value)| (*entity, *target, value.clone()))
            .collect()
    }

    /// All entities with a `(kind, target)` row, regardless of value — the
    /// inverse lookup of [`wildcard`](Self::wildcard), used by passes that
    /// query "who has `Kind↦target`" (e.g. `Pending↦FaceDirection`).
    pub(crate) fn sources(&self, kind: RelationKind, target: RelationTarget) -> Vec<Entity> {
        self.rows
            .keys()
            .filter(|(k, _, t)| *k == kind && *t == target)
            .map(|(_, entity, _)| *entity)
            .collect()
    }

    /// All `(target, value)` rows of `kind` belonging to `entity`.
    pub(crate) fn wildcard(&self, kind: RelationKind, entity: Entity) -> Vec<(RelationTarget, &serde_json::Value)> {
        self.rows
            .iter()
            .filter(|((k, e, _), _)| *k == kind && *e == entity)
            .map(|((_, _, target), value)| (*target, value))
            .collect()
    }

    /// Remove every row with `entity` as source or as an `Entity` target —
    /// the cascade spec.md §9 calls for on entity deletion.
    pub(crate) fn cascade_delete(&mut self, entity: Entity) {
        let doomed: Vec<_> = self
            .rows
            .keys()
            .filter(|(_, source, target)| *source == entity || *target == RelationTarget::Entity(entity))
            .cloned()
            .collect();
        for key in doomed {
            self.rows.remove(&key);
            let (kind, source, target) = key;
            if let Some(hooks) = self.hooks.get_mut(&kind) {
                for hook in &mut hooks.on_remove {
                    hook(source, target);
                }
            }
        }
    }

    pub(crate) fn on_set(&mut self, kind: RelationKind, hook: impl FnMut(Entity, RelationTarget, &serde_json::Value) + 'static) {
        self.hooks.entry(kind).or_default().on_set.push(Box::new(hook));
    }

    pub(crate) fn on_remove(&mut self, kind: RelationKind, hook: impl FnMut(Entity, RelationTarget) + 'static) {
        self.hooks.entry(kind).or_default().on_remove.push(Box::new(hook));
    }

    pub(crate) fn iter_for_entity(&self, entity: Entity) -> impl Iterator<Item = (RelationKind, RelationTarget, &serde_json::Value)> {
        self.rows
            .iter()
            .filter(move |((_, source, _), _)| *source == entity)
            .map(|((kind, _, target), value)| (*kind, *target, value))
    }
}

impl RelationKind {
    pub fn name(self) -> &'static str {
        match self {
            RelationKind::Pending => "Pending",
            RelationKind::Timer => "Timer",
            RelationKind::Timeout => "Timeout",
            RelationKind::Task => "Task",
            RelationKind::TaskCompleted => "TaskCompleted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Pending" => Some(RelationKind::Pending),
            "Timer" => Some(RelationKind::Timer),
            "Timeout" => Some(RelationKind::Timeout),
            "Task" => Some(RelationKind::Task),
            "TaskCompleted" => Some(RelationKind::TaskCompleted),
            _ => None,
        }
    }
}
