use crate::*;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Position {
    x: i32,
    y: i32,
}
impl Component for Position {
    const NAME: &'static str = "Position";
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Health(u32);
impl Component for Health {
    const NAME: &'static str = "Health";
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Frozen;
impl Component for Frozen {
    const NAME: &'static str = "Frozen";
}

mod entity_lifecycle {
    use super::*;

    #[test]
    fn fresh_entities_are_alive_and_distinct() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        assert_ne!(a, b);
        assert!(world.is_alive(a));
        assert!(world.is_alive(b));
    }

    #[test]
    fn delete_is_visible_immediately_but_slot_waits_for_sync() {
        let mut world = World::new();
        let e = world.spawn();
        world.delete(e);
        assert!(!world.is_alive(e));

        // Before sync, a fresh spawn must not reuse e's slot with a stale
        // generation collision.
        let f = world.spawn();
        assert_ne!(e, f);

        world.sync();
        let g = world.spawn();
        // g may now reuse e's index, but never its generation.
        if g.index == e.index {
            assert_ne!(g.generation, e.generation);
        }
    }

    #[test]
    fn delete_twice_is_a_silent_no_op() {
        let mut world = World::new();
        let e = world.spawn();
        world.delete(e);
        world.delete(e); // must not panic
        assert!(!world.is_alive(e));
    }
}

mod components {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut world = World::new();
        let e = world.spawn();
        world.set(e, Position { x: 1, y: 2 }).unwrap();
        assert_eq!(world.get::<Position>(e), Some(&Position { x: 1, y: 2 }));
        assert!(world.has::<Position>(e));
    }

    #[test]
    fn set_on_deleted_entity_is_entity_gone() {
        let mut world = World::new();
        let e = world.spawn();
        world.delete(e);
        let err = world.set(e, Position { x: 0, y: 0 }).unwrap_err();
        assert_eq!(err, EcsError::EntityGone(e));
    }

    #[test]
    fn remove_returns_the_value_once_then_none() {
        let mut world = World::new();
        let e = world.spawn();
        world.set(e, Health(10)).unwrap();
        assert_eq!(world.remove::<Health>(e), Some(Health(10)));
        assert_eq!(world.remove::<Health>(e), None);
        assert!(!world.has::<Health>(e));
    }

    #[test]
    fn delete_detaches_every_component() {
        let mut world = World::new();
        let e = world.spawn();
        world.set(e, Position { x: 0, y: 0 }).unwrap();
        world.set(e, Health(5)).unwrap();
        world.delete(e);
        assert_eq!(world.get::<Position>(e), None);
        assert_eq!(world.get::<Health>(e), None);
    }
}

mod hooks {
    use super::*;

    #[test]
    fn on_init_fires_once_for_first_set_and_on_set_for_later_ones() {
        let mut world = World::new();
        let inits = Rc::new(RefCell::new(0));
        let sets = Rc::new(RefCell::new(0));
        {
            let inits = inits.clone();
            world.on_init::<Health>(move |_, _| *inits.borrow_mut() += 1);
        }
        {
            let sets = sets.clone();
            world.on_set::<Health>(move |_, _| *sets.borrow_mut() += 1);
        }

        let e = world.spawn();
        world.set(e, Health(1)).unwrap();
        world.set(e, Health(2)).unwrap();
        world.set(e, Health(3)).unwrap();

        assert_eq!(*inits.borrow(), 1);
        assert_eq!(*sets.borrow(), 2);
    }

    #[test]
    fn on_remove_fires_on_explicit_remove_and_on_delete() {
        let mut world = World::new();
        let removed = Rc::new(RefCell::new(0));
        {
            let removed = removed.clone();
            world.on_remove::<Health>(move |_| *removed.borrow_mut() += 1);
        }

        let a = world.spawn();
        world.set(a, Health(1)).unwrap();
        world.remove::<Health>(a);

        let b = world.spawn();
        world.set(b, Health(1)).unwrap();
        world.delete(b);

        assert_eq!(*removed.borrow(), 2);
    }

    #[test]
    fn hook_sees_the_value_from_the_set_call_that_triggered_it() {
        // Hooks fire at the moment of mutation, not deferred to sync() —
        // the callback must observe the just-written value.
        let mut world = World::new();
        let last_seen = Rc::new(RefCell::new(0));
        {
            let last_seen = last_seen.clone();
            world.on_set::<Health>(move |_, value| *last_seen.borrow_mut() = value.0);
        }
        let e = world.spawn();
        world.set(e, Health(1)).unwrap();
        world.set(e, Health(9)).unwrap();
        assert_eq!(*last_seen.borrow(), 9);
    }
}

mod queries {
    use super::*;

    #[test]
    fn query_matches_required_and_excludes_negative() {
        let mut world = World::new();
        let a = world.spawn();
        world.set(a, Position { x: 0, y: 0 }).unwrap();
        world.set(a, Frozen).unwrap();

        let b = world.spawn();
        world.set(b, Position { x: 1, y: 1 }).unwrap();

        let query = world.create_query(QueryBuilder::new().require::<Position>().exclude::<Frozen>());
        let mut matched = Vec::new();
        world.for_each(query, |e| matched.push(e));

        assert_eq!(matched, vec![b]);
    }

    #[test]
    fn query_membership_only_updates_on_sync() {
        let mut world = World::new();
        let e = world.spawn();
        let query = world.create_query(QueryBuilder::new().require::<Health>());

        let mut matched = Vec::new();
        world.for_each(query, |x| matched.push(x));
        assert!(matched.is_empty());

        world.set(e, Health(1)).unwrap();
        let mut matched = Vec::new();
        world.for_each(query, |x| matched.push(x));
        assert!(matched.is_empty(), "query cache must not change before sync()");

        world.sync();
        let mut matched = Vec::new();
        world.for_each(query, |x| matched.push(x));
        assert_eq!(matched, vec![e]);
    }

    #[test]
    fn for_each_skips_entities_deleted_since_the_cache_was_last_synced() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        world.set(a, Health(1)).unwrap();
        world.set(b, Health(1)).unwrap();
        world.sync();

        let query = world.create_query(QueryBuilder::new().require::<Health>());
        world.delete(a);

        let mut visited = Vec::new();
        world.for_each(query, |e| visited.push(e));
        assert_eq!(visited, vec![b]);
    }
}

mod uncached_queries {
    use super::*;
    use std::any::TypeId;

    #[test]
    fn query_once_reflects_state_immediately_without_needing_sync() {
        let mut world = World::new();
        let a = world.spawn();
        world.set(a, Health(1)).unwrap();

        let found = world.query_once(&[TypeId::of::<Health>()], &[]);
        assert_eq!(found, vec![a]);

        world.remove::<Health>(a);
        let found = world.query_once(&[TypeId::of::<Health>()], &[]);
        assert!(found.is_empty(), "query_once must not need a sync() to see the removal");
    }
}

mod relations {
    use super::*;

    #[test]
    fn set_get_has_remove_round_trip() {
        let mut world = World::new();
        let source = world.spawn();
        let target = world.spawn();
        let rel_target = RelationTarget::Entity(target);

        world.set_relation(RelationKind::Pending, source, rel_target, serde_json::Value::Null).unwrap();
        assert!(world.has_relation(RelationKind::Pending, source, rel_target));
        assert_eq!(world.remove_relation(RelationKind::Pending, source, rel_target), Some(serde_json::Value::Null));
        assert!(!world.has_relation(RelationKind::Pending, source, rel_target));
    }

    #[test]
    fn timer_helpers_round_trip_a_tick_count() {
        let mut world = World::new();
        let e = world.spawn();
        let target = RelationTarget::Entity(e);
        world.set_timer(e, target, 42).unwrap();
        assert_eq!(world.get_timer(e, target), Some(42));
    }

    #[test]
    fn cascade_delete_removes_rows_where_entity_is_source_or_target() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        world.set_relation(RelationKind::Task, a, RelationTarget::Entity(b), serde_json::Value::Null).unwrap();
        world.set_relation(RelationKind::Task, b, RelationTarget::Entity(a), serde_json::Value::Null).unwrap();

        world.delete(a);

        assert!(!world.has_relation(RelationKind::Task, a, RelationTarget::Entity(b)));
        assert!(!world.has_relation(RelationKind::Task, b, RelationTarget::Entity(a)));
    }

    #[test]
    fn relation_sources_finds_every_entity_pointing_at_a_fixed_target() {
        let mut world = World::new();
        let shared_target = world.spawn();
        let a = world.spawn();
        let b = world.spawn();
        let c = world.spawn();
        world.set_relation(RelationKind::Task, a, RelationTarget::Entity(shared_target), serde_json::Value::Null).unwrap();
        world.set_relation(RelationKind::Task, b, RelationTarget::Entity(shared_target), serde_json::Value::Null).unwrap();
        world.set_relation(RelationKind::Task, c, RelationTarget::Entity(a), serde_json::Value::Null).unwrap();

        let mut sources = world.relation_sources(RelationKind::Task, RelationTarget::Entity(shared_target));
        sources.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(sources, expected);
    }

    #[test]
    fn relation_rows_sweeps_every_row_of_a_kind() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        let t = world.spawn();
        world.set_relation(RelationKind::Timer, a, RelationTarget::Entity(t), serde_json::json!(3)).unwrap();
        world.set_relation(RelationKind::Timer, b, RelationTarget::Entity(t), serde_json::json!(0)).unwrap();
        world.set_relation(RelationKind::Task, a, RelationTarget::Entity(t), serde_json::Value::Null).unwrap();

        let rows = world.relation_rows(RelationKind::Timer);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn wildcard_returns_every_row_for_a_kind_regardless_of_target() {
        let mut world = World::new();
        let a = world.spawn();
        let t1 = world.spawn();
        let t2 = world.spawn();
        world.set_relation(RelationKind::Task, a, RelationTarget::Entity(t1), serde_json::json!(1)).unwrap();
        world.set_relation(RelationKind::Task, a, RelationTarget::Entity(t2), serde_json::json!(2)).unwrap();

        let rows = world.relation_wildcard(RelationKind::Task, a);
        assert_eq!(rows.len(), 2);
    }
}

mod snapshot {
    use super::*;

    #[test]
    fn serialize_then_restore_reproduces_component_state() {
        let mut world = World::new();
        let a = world.spawn();
        world.set(a, Position { x: 3, y: 4 }).unwrap();
        world.set(a, Health(7)).unwrap();
        let b = world.spawn();
        world.set(b, Position { x: -1, y: -2 }).unwrap();

        let snapshot = world.serialize();

        let mut restored = World::new();
        restored.register::<Position>();
        restored.register::<Health>();
        restored.restore(&snapshot).unwrap();

        assert_eq!(restored.get::<Position>(a), Some(&Position { x: 3, y: 4 }));
        assert_eq!(restored.get::<Health>(a), Some(&Health(7)));
        assert_eq!(restored.get::<Position>(b), Some(&Position { x: -1, y: -2 }));
        assert_eq!(restored.serialize(), snapshot);
    }

    #[test]
    fn serialize_then_restore_reproduces_relations() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        world.set(a, Health(1)).unwrap();
        world.set_relation(RelationKind::Task, a, RelationTarget::Entity(b), serde_json::json!(5)).unwrap();

        let snapshot = world.serialize();

        let mut restored = World::new();
        restored.register::<Health>();
        restored.restore(&snapshot).unwrap();

        assert_eq!(restored.get_relation(RelationKind::Task, a, RelationTarget::Entity(b)), Some(&serde_json::json!(5)));
    }

    #[test]
    fn restoring_an_unregistered_component_name_is_an_error() {
        let mut world = World::new();
        let a = world.spawn();
        world.set(a, Health(1)).unwrap();
        let snapshot = world.serialize();

        let mut restored = World::new();
        // deliberately never registered Health
        let err = restored.restore(&snapshot).unwrap_err();
        assert_eq!(err, EcsError::UnknownComponent("Health".to_string()));
    }

    #[test]
    fn empty_world_round_trips_to_an_empty_entity_list() {
        let world = World::new();
        let snapshot = world.serialize();
        assert!(snapshot.entities.is_empty());
        assert_eq!(snapshot.version, 1);
    }

    #[test]
    fn a_surviving_entity_keeps_its_original_id_after_an_earlier_entity_is_deleted() {
        let mut world = World::new();
        let a = world.spawn();
        let b = world.spawn();
        world.set(b, Position { x: 9, y: 9 }).unwrap();
        world.set_relation(RelationKind::Task, b, RelationTarget::Entity(b), serde_json::json!(1)).unwrap();

        // Deleting and syncing the low-index entity leaves `alive_entities()`
        // with a gapped, non-dense index range — the case a fresh
        // allocator's sequential `allocate()` can no longer reproduce.
        world.delete(a);
        world.sync();
        assert!(b.index > 0, "b must be the higher-index survivor for this to test anything");

        let snapshot = world.serialize();

        let mut restored = World::new();
        restored.register::<Position>();
        restored.restore(&snapshot).unwrap();

        assert!(!restored.is_alive(a));
        assert!(restored.is_alive(b));
        assert_eq!(restored.get::<Position>(b), Some(&Position { x: 9, y: 9 }));
        assert_eq!(restored.get_relation(RelationKind::Task, b, RelationTarget::Entity(b)), Some(&serde_json::json!(1)));
        assert_eq!(restored.serialize(), snapshot);
    }
}
