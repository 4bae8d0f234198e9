//! `World` — the entity/component/relation store and its query cache.

use crate::component::{Column, ColumnDyn, Component};
use crate::entity::{Entity, EntityAllocator};
use crate::error::{EcsError, EcsResult};
use crate::relation::{RelationIndex, RelationKind, RelationTarget};
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::collections::HashMap;

const SNAPSHOT_VERSION: u32 = 1;

/// Handle to a cached query, returned by [`World::create_query`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct QueryId(usize);

struct QueryEntry {
    required: Vec<TypeId>,
    negative: Vec<TypeId>,
    matches: Vec<Entity>,
}

/// Fluent query spec: `QueryBuilder::new().require::<Position>().exclude::<Move>()`.
#[derive(Default)]
pub struct QueryBuilder {
    required: Vec<TypeId>,
    negative: Vec<TypeId>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require<C: Component>(mut self) -> Self {
        self.required.push(TypeId::of::<C>());
        self
    }

    pub fn exclude<C: Component>(mut self) -> Self {
        self.negative.push(TypeId::of::<C>());
        self
    }
}

#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    columns: HashMap<TypeId, Box<dyn ColumnDyn>>,
    column_order: Vec<TypeId>,
    names: HashMap<TypeId, &'static str>,
    name_to_type: HashMap<&'static str, TypeId>,
    relations: RelationIndex,
    queries: Vec<QueryEntry>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- entities --------------------------------------------------

    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Removes all components/relations and invalidates the handle. A no-op
    /// if `entity` is already gone (spec §4.5 failure model).
    pub fn delete(&mut self, entity: Entity) {
        if !self.allocator.is_alive(entity) {
            return;
        }
        for type_id in self.column_order.clone() {
            if let Some(column) = self.columns.get_mut(&type_id) {
                column.remove_erased(entity);
            }
        }
        self.relations.cascade_delete(entity);
        self.allocator.mark_deleted(entity);
    }

    // ---- components --------------------------------------------------

    fn column_mut<C: Component>(&mut self) -> &mut Column<C> {
        let type_id = TypeId::of::<C>();
        self.columns.entry(type_id).or_insert_with(|| {
            self.column_order.push(type_id);
            Box::<Column<C>>::default()
        });
        self.names.insert(type_id, C::NAME);
        self.name_to_type.insert(C::NAME, type_id);
        self.columns
            .get_mut(&type_id)
            .unwrap()
            .as_any_mut()
            .downcast_mut::<Column<C>>()
            .expect("TypeId collision between distinct Component types")
    }

    fn column<C: Component>(&self) -> Option<&Column<C>> {
        let type_id = TypeId::of::<C>();
        self.columns
            .get(&type_id)
            .map(|c| c.as_any().downcast_ref::<Column<C>>().expect("TypeId collision"))
    }

    fn has_erased(&self, entity: Entity, type_id: TypeId) -> bool {
        self.columns.get(&type_id).map(|c| c.has(entity)).unwrap_or(false)
    }

    /// Ensures a component type's column (and registered name) exists
    /// without attaching any data — needed before [`restore`](Self::restore)
    /// on a fresh `World`, so named components in the snapshot resolve.
    pub fn register<C: Component>(&mut self) {
        self.column_mut::<C>();
    }

    /// `EntityGone` if `entity` is not alive (spec: "`set` on a deleted
    /// entity is a logic error").
    pub fn set<C: Component>(&mut self, entity: Entity, value: C) -> EcsResult<()> {
        if !self.allocator.is_alive(entity) {
            return Err(EcsError::EntityGone(entity));
        }
        self.column_mut::<C>().set(entity, value);
        Ok(())
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.column::<C>()?.get(entity)
    }

    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity) && self.column::<C>().map(|c| c.get(entity).is_some()).unwrap_or(false)
    }

    /// No-op (returns `None`) if `entity` is already gone.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.column_mut::<C>().remove(entity)
    }

    pub fn on_init<C: Component>(&mut self, hook: impl FnMut(Entity, &C) + 'static) {
        self.column_mut::<C>().on_init(hook);
    }

    pub fn on_set<C: Component>(&mut self, hook: impl FnMut(Entity, &C) + 'static) {
        self.column_mut::<C>().on_set(hook);
    }

    pub fn on_remove<C: Component>(&mut self, hook: impl FnMut(Entity) + 'static) {
        self.column_mut::<C>().on_remove(hook);
    }

    // ---- relations --------------------------------------------------

    pub fn set_relation(
        &mut self,
        kind: RelationKind,
        entity: Entity,
        target: RelationTarget,
        value: serde_json::Value,
    ) -> EcsResult<()> {
        if !self.allocator.is_alive(entity) {
            return Err(EcsError::EntityGone(entity));
        }
        self.relations.set(kind, entity, target, value);
        Ok(())
    }

    pub fn get_relation(&self, kind: RelationKind, entity: Entity, target: RelationTarget) -> Option<&serde_json::Value> {
        if !self.allocator.is_alive(entity) {
            return None;
        }
        self.relations.get(kind, entity, target)
    }

    pub fn has_relation(&self, kind: RelationKind, entity: Entity, target: RelationTarget) -> bool {
        self.allocator.is_alive(entity) && self.relations.has(kind, entity, target)
    }

    pub fn remove_relation(&mut self, kind: RelationKind, entity: Entity, target: RelationTarget) -> Option<serde_json::Value> {
        self.relations.remove(kind, entity, target)
    }

    pub fn relation_wildcard(&self, kind: RelationKind, entity: Entity) -> Vec<(RelationTarget, &serde_json::Value)> {
        self.relations.wildcard(kind, entity)
    }

    /// Every entity with a `(kind, target)` relation row — e.g. every entity
    /// with `Pending↦FaceDirection`.
    pub fn relation_sources(&self, kind: RelationKind, target: RelationTarget) -> Vec<Entity> {
        self.relations.sources(kind, target)
    }

    /// Every `(source, target, value)` row of `kind`, across all entities.
    pub fn relation_rows(&self, kind: RelationKind) -> Vec<(Entity, RelationTarget, serde_json::Value)> {
        self.relations.rows_of_kind(kind)
    }

    pub fn on_relation_set(&mut self, kind: RelationKind, hook: impl FnMut(Entity, RelationTarget, &serde_json::Value) + 'static) {
        self.relations.on_set(kind, hook);
    }

    pub fn on_relation_remove(&mut self, kind: RelationKind, hook: impl FnMut(Entity, RelationTarget) + 'static) {
        self.relations.on_remove(kind, hook);
    }

    /// Convenience wrapper: `Timer`/`Timeout` relations always carry a plain
    /// tick count.
    pub fn set_timer(&mut self, entity: Entity, target: RelationTarget, ticks: u32) -> EcsResult<()> {
        self.set_relation(RelationKind::Timer, entity, target, serde_json::json!(ticks))
    }

    pub fn get_timer(&self, entity: Entity, target: RelationTarget) -> Option<u32> {
        self.get_relation(RelationKind::Timer, entity, target)
            .and_then(|v| v.as_u64())
            .map(|v| v as u32)
    }

    // ---- queries --------------------------------------------------

    pub fn create_query(&mut self, builder: QueryBuilder) -> QueryId {
        let matches = Self::recompute(&self.allocator, &self.columns, &builder.required, &builder.negative);
        self.queries.push(QueryEntry {
            required: builder.required,
            negative: builder.negative,
            matches,
        });
        QueryId(self.queries.len() - 1)
    }

    fn recompute(
        allocator: &EntityAllocator,
        columns: &HashMap<TypeId, Box<dyn ColumnDyn>>,
        required: &[TypeId],
        negative: &[TypeId],
    ) -> Vec<Entity> {
        allocator
            .alive_entities()
            .filter(|&entity| {
                required.iter().all(|t| columns.get(t).map(|c| c.has(entity)).unwrap_or(false))
                    && negative.iter().all(|t| !columns.get(t).map(|c| c.has(entity)).unwrap_or(false))
            })
            .collect()
    }

    /// Iterate the entities matched at the last `sync()` (or query creation,
    /// whichever is most recent). The list is snapshotted before the first
    /// callback runs, so mutations mid-iteration never cause an entity to be
    /// visited twice or the loop to observe its own edits (spec §4.5).
    pub fn for_each(&self, query: QueryId, mut f: impl FnMut(Entity)) {
        let snapshot = self.queries[query.0].matches.clone();
        for entity in snapshot {
            if self.allocator.is_alive(entity) {
                f(entity);
            }
        }
    }

    /// Ad hoc, uncached membership test — convenient in tests and for
    /// one-off lookups outside the pass pipeline.
    pub fn matches(&self, entity: Entity, required: &[TypeId], negative: &[TypeId]) -> bool {
        self.allocator.is_alive(entity)
            && required.iter().all(|t| self.has_erased(entity, *t))
            && negative.iter().all(|t| !self.has_erased(entity, *t))
    }

    /// One-shot, uncached query: recomputed fresh on every call rather than
    /// registered in the query cache. Passes that run their query exactly
    /// once per tick (the pipeline's core passes, the AI loop) use this
    /// instead of `create_query`/`for_each`, since repeated per-tick
    /// `create_query` calls would grow `World`'s query table without bound
    /// for no caching benefit at that cadence.
    pub fn query_once(&self, required: &[TypeId], negative: &[TypeId]) -> Vec<Entity> {
        Self::recompute(&self.allocator, &self.columns, required, negative)
    }

    /// Applies deferred slot recycling and refreshes every cached query's
    /// membership list (spec §4.5: "mutations made during iteration are
    /// visible to later passes only after the next `sync()`").
    pub fn sync(&mut self) {
        self.allocator.flush_recycled();
        for i in 0..self.queries.len() {
            let (required, negative) = (self.queries[i].required.clone(), self.queries[i].negative.clone());
            let matches = Self::recompute(&self.allocator, &self.columns, &required, &negative);
            self.queries[i].matches = matches;
        }
    }

    // ---- serialization --------------------------------------------------

    pub fn serialize(&self) -> Snapshot {
        let mut entities = Vec::new();
        for entity in self.allocator.alive_entities() {
            let mut components = Vec::new();
            for type_id in &self.column_order {
                if let Some(column) = self.columns.get(type_id) {
                    if let Some(value) = column.serialize_entity(entity) {
                        components.push(ComponentEntry {
                            kind: ComponentType::Named(column.name().to_string()),
                            value: Some(value),
                        });
                    }
                }
            }
            for (kind, target, value) in self.relations.iter_for_entity(entity) {
                let target_ref = match target {
                    RelationTarget::Entity(e) => TargetRef::EntityId { id: e.index, generation: e.generation },
                    RelationTarget::Component(name) => TargetRef::ComponentName(name.to_string()),
                };
                components.push(ComponentEntry {
                    kind: ComponentType::Relation {
                        component: kind.name().to_string(),
                        target: target_ref,
                    },
                    value: if value.is_null() { None } else { Some(value.clone()) },
                });
            }
            entities.push(EntitySnapshot {
                id: entity.index,
                generation: entity.generation,
                components,
            });
        }
        Snapshot {
            version: SNAPSHOT_VERSION,
            entities,
        }
    }

    /// Replays entity creation and component/relation `set` in order onto
    /// `self`, which must be a fresh `World` that has already `register`ed
    /// every component type the snapshot can reference.
    ///
    /// Each row's slot is rebuilt directly from its recorded `(id,
    /// generation)` via `EntityAllocator::restore_slot`, rather than relying
    /// on a fresh allocator's `allocate()` to reproduce the original
    /// assignment by allocation order alone — that order is only a dense
    /// `0..N` prefix if no entity was ever deleted before the snapshot was
    /// taken, which this engine cannot assume.
    pub fn restore(&mut self, snapshot: &Snapshot) -> EcsResult<()> {
        for entity_snapshot in &snapshot.entities {
            let entity = self.allocator.restore_slot(entity_snapshot.id, entity_snapshot.generation);
            for entry in &entity_snapshot.components {
                let value = entry.value.clone().unwrap_or(serde_json::Value::Null);
                match &entry.kind {
                    ComponentType::Named(name) => {
                        let type_id = *self
                            .name_to_type
                            .get(name.as_str())
                            .ok_or_else(|| EcsError::UnknownComponent(name.clone()))?;
                        self.columns
                            .get_mut(&type_id)
                            .expect("registered name always has a column")
                            .deserialize_set(entity, value)?;
                    }
                    ComponentType::Relation { component, target } => {
                        let kind = RelationKind::from_name(component)
                            .ok_or_else(|| EcsError::UnknownComponent(component.clone()))?;
                        let relation_target = match target {
                            TargetRef::EntityId { id, generation } => RelationTarget::Entity(Entity {
                                index: *id,
                                generation: *generation,
                            }),
                            TargetRef::ComponentName(name) => {
                                let (&static_name, _) = self
                                    .name_to_type
                                    .get_key_value(name.as_str())
                                    .ok_or_else(|| EcsError::UnknownComponent(name.clone()))?;
                                RelationTarget::Component(static_name)
                            }
                        };
                        self.relations.set(kind, entity, relation_target, value);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub version: u32,
    pub entities: Vec<EntitySnapshot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    pub id: u32,
    pub generation: u32,
    pub components: Vec<ComponentEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ComponentEntry {
    #[serde(rename = "type")]
    pub kind: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ComponentType {
    Named(String),
    Relation { component: String, target: TargetRef },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TargetRef {
    EntityId { id: u32, generation: u32 },
    ComponentName(String),
}
