//! The Position / Velocity / Health walkthrough, end to end.

use serde::Serialize;
use sieve_component::{Component, QueryDescriptor};
use sieve_world::{World, WorldError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Position {
    x: i32,
    y: i32,
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Velocity {
    x: i32,
    y: i32,
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Health(u32);

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

#[test]
fn test_position_velocity_health_scenario() {
    let mut world = World::new();
    world.register::<Position>().unwrap();
    world.register::<Velocity>().unwrap();
    world.register::<Health>().unwrap();

    let e1 = world
        .create_entity((Position { x: 0, y: 0 }, Velocity { x: 1, y: 1 }))
        .unwrap();
    let e2 = world
        .create_entity((Position { x: 10, y: 10 }, Health(100)))
        .unwrap();
    let e3 = world.create_entity((Position { x: 20, y: 20 },)).unwrap();

    let positions = QueryDescriptor::new().require::<Position>();
    assert_eq!(world.query(&positions).unwrap().entities(), vec![e1, e2, e3]);

    let wounded = QueryDescriptor::new().require::<Position>().require::<Health>();
    let result = world.query(&wounded).unwrap();
    assert_eq!(result.entities(), vec![e2]);
    assert_eq!(
        result.rows()[0].to_json().unwrap(),
        serde_json::json!({
            "entity": e2.id(),
            "position": {"x": 10, "y": 10},
            "health": 100,
        })
    );

    let with_health = QueryDescriptor::new().require::<Position>().optional::<Health>();
    let result = world.query(&with_health).unwrap();
    assert_eq!(result.entities(), vec![e1, e2, e3]);
    assert!(!result.row(e1).unwrap().has("health"));
    assert_eq!(result.row(e2).unwrap().get::<Health>(), Some(&Health(100)));
    assert!(!result.row(e3).unwrap().has("health"));

    world.remove_component::<Health>(e2).unwrap();
    assert!(world.query(&wounded).unwrap().is_empty());
}

#[test]
fn test_deleted_entity_never_reappears() {
    let mut world = World::new();
    world.register::<Position>().unwrap();

    let gone = world.create_entity((Position { x: 1, y: 1 },)).unwrap();
    world.delete_entity(gone);
    let fresh = world.create_entity((Position { x: 2, y: 2 },)).unwrap();

    assert_ne!(gone, fresh);
    let result = world
        .query(&QueryDescriptor::new().require::<Position>())
        .unwrap();
    assert_eq!(result.entities(), vec![fresh]);
    assert!(result.row(gone).is_none());
}

#[test]
fn test_unregistered_type_fails_every_mutation_and_query() {
    let mut world = World::new();
    world.register::<Position>().unwrap();
    let e = world.create_entity((Position { x: 0, y: 0 },)).unwrap();

    let unknown = WorldError::UnknownComponentType("Health".into());
    assert_eq!(world.add_component(e, Health(1)).unwrap_err(), unknown);
    assert_eq!(world.remove_component::<Health>(e).unwrap_err(), unknown);
    assert_eq!(
        world
            .query(&QueryDescriptor::new().require::<Health>())
            .unwrap_err(),
        unknown
    );
    assert_eq!(world.create_entity((Health(1),)).unwrap_err(), unknown);

    // Everything else is total.
    assert!(!world.delete_entity(sieve_component::Entity::from_raw(77)));
    assert!(world.get_component::<Health>(e).is_none());
    assert!(!world.has_component::<Health>(e));
}

#[test]
fn test_independent_worlds_do_not_share_state() {
    let mut first = World::new();
    let mut second = World::new();
    first.register::<Health>().unwrap();
    second.register::<Position>().unwrap();
    second.register::<Health>().unwrap();

    let a = first.create_entity((Health(1),)).unwrap();
    let b = second.create_entity((Health(2),)).unwrap();

    assert_eq!(a, b);
    assert_eq!(first.get_component::<Health>(a), Some(&Health(1)));
    assert_eq!(second.get_component::<Health>(b), Some(&Health(2)));
    assert_ne!(
        first.component_index::<Health>(),
        second.component_index::<Health>()
    );
}
