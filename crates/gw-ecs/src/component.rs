//! Component trait, per-type storage column, and synchronous hooks.
//!
//! Generalizes the donor framework's `ComponentVec`/`TypedComponentVec`
//! type-erasure technique (`Box<dyn Any>` + `TypeId` + `downcast`) from a
//! dense, entity-count-long array to a sparse, entity-addressed map that
//! supports per-entity presence and removal.

use crate::entity::Entity;
use crate::error::EcsError;
use std::any::Any;
use std::collections::HashMap;

/// A component type: plain data, identified by a stable registered name
/// (spec §4.5: "component registry keyed by stable string name").
pub trait Component: 'static + serde::Serialize + serde::de::DeserializeOwned {
    const NAME: &'static str;
}

struct Hooks<C> {
    on_init: Vec<Box<dyn FnMut(Entity, &C)>>,
    on_set: Vec<Box<dyn FnMut(Entity, &C)>>,
    on_remove: Vec<Box<dyn FnMut(Entity)>>,
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self {
            on_init: Vec::new(),
            on_set: Vec::new(),
            on_remove: Vec::new(),
        }
    }
}

impl<C> Hooks<C> {
    fn fire_init(&mut self, entity: Entity, value: &C) {
        for hook in &mut self.on_init {
            hook(entity, value);
        }
    }

    fn fire_set(&mut self, entity: Entity, value: &C) {
        for hook in &mut self.on_set {
            hook(entity, value);
        }
    }

    fn fire_remove(&mut self, entity: Entity) {
        for hook in &mut self.on_remove {
            hook(entity);
        }
    }
}

/// Dense-by-`TypeId`, sparse-by-entity storage for one component type.
pub(crate) struct Column<C> {
    data: HashMap<u32, C>,
    hooks: Hooks<C>,
}

impl<C> Default for Column<C> {
    fn default() -> Self {
        Self {
            data: HashMap::new(),
            hooks: Hooks::default(),
        }
    }
}

impl<C: Component> Column<C> {
    pub(crate) fn set(&mut self, entity: Entity, value: C) {
        // Split-borrow: `data` and `hooks` are disjoint fields, so we can
        // hold a shared borrow into `data` while mutating `hooks` through
        // the same `&mut Column<C>`.
        let Column { data, hooks } = self;
        let existed = data.contains_key(&entity.index);
        data.insert(entity.index, value);
        let stored = data.get(&entity.index).expect("just inserted");
        if existed {
            hooks.fire_set(entity, stored);
        } else {
            hooks.fire_init(entity, stored);
        }
    }

    pub(crate) fn get(&self, entity: Entity) -> Option<&C> {
        self.data.get(&entity.index)
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> Option<C> {
        let removed = self.data.remove(&entity.index);
        if removed.is_some() {
            self.hooks.fire_remove(entity);
        }
        removed
    }

    pub(crate) fn on_init(&mut self, hook: impl FnMut(Entity, &C) + 'static) {
        self.hooks.on_init.push(Box::new(hook));
    }

    pub(crate) fn on_set(&mut self, hook: impl FnMut(Entity, &C) + 'static) {
        self.hooks.on_set.push(Box::new(hook));
    }

    pub(crate) fn on_remove(&mut self, hook: impl FnMut(Entity) + 'static) {
        self.hooks.on_remove.push(Box::new(hook));
    }
}

/// Type-erased facade over a [`Column<C>`], so `World` can hold every
/// component type's storage in one `HashMap<TypeId, _>` and still serialize
/// generically.
pub(crate) trait ColumnDyn: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn name(&self) -> &'static str;
    fn has(&self, entity: Entity) -> bool;
    fn remove_erased(&mut self, entity: Entity);
    fn serialize_entity(&self, entity: Entity) -> Option<serde_json::Value>;
    fn deserialize_set(&mut self, entity: Entity, value: serde_json::Value) -> Result<(), EcsError>;
}

impl<C: Component> ColumnDyn for Column<C> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        C::NAME
    }

    fn has(&self, entity: Entity) -> bool {
        self.data.contains_key(&entity.index)
    }

    fn remove_erased(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn serialize_entity(&self, entity: Entity) -> Option<serde_json::Value> {
        self.data
            .get(&entity.index)
            .map(|value| serde_json::to_value(value).expect("component values are always serializable"))
    }

    fn deserialize_set(&mut self, entity: Entity, value: serde_json::Value) -> Result<(), EcsError> {
        let typed: C = serde_json::from_value(value).map_err(|_| EcsError::UnknownComponent(C::NAME.to_string()))?;
        self.set(entity, typed);
        Ok(())
    }
}
