//! # tick_loop, an example host
//!
//! Drives a [`World`] the way a simulation loop would: register component
//! types once, spawn a few entities, then on every tick run queries and
//! write results back.
//!
//! Set `SIEVE_WORLD_CONFIG` to a JSON [`WorldConfig`] to override the
//! defaults, and `RUST_LOG=sieve_world=trace` to see every index mutation.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use components::{Health, Name, Position, Velocity};
use sieve_component::{Entity, QueryDescriptor};
use sieve_world::{World, WorldConfig};

/// Number of ticks to simulate.
const TICKS: u32 = 5;

/// Damage applied to every entity with `Health` each tick.
const DAMAGE_PER_TICK: u32 = 30;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tick_loop=info".parse()?))
        .init();

    let config = match std::env::var("SIEVE_WORLD_CONFIG") {
        Ok(json) => WorldConfig::from_json_str(&json).context("invalid SIEVE_WORLD_CONFIG")?,
        Err(_) => WorldConfig::new("tick_loop"),
    };
    let mut world = World::with_config(config);

    world.register::<Position>()?;
    world.register::<Velocity>()?;
    world.register::<Health>()?;
    world.register::<Name>()?;

    world.create_entity((
        Name::new("drifter"),
        Position::new(0.0, 0.0),
        Velocity::new(1.0, 1.0),
    ))?;
    world.create_entity((
        Name::new("tank"),
        Position::new(10.0, 10.0),
        Health::full(100),
    ))?;
    world.create_entity((
        Name::new("scout"),
        Position::new(20.0, 20.0),
        Velocity::new(-2.0, 0.5),
        Health::full(50),
    ))?;
    world.create_entity((Position::new(30.0, 30.0),))?;
    info!(entities = world.entity_count(), "world populated");

    let movers = QueryDescriptor::new().require::<Position>().require::<Velocity>();
    let living = QueryDescriptor::new().require::<Health>();
    let report = QueryDescriptor::new()
        .require::<Position>()
        .optional::<Name>()
        .optional::<Health>();

    for tick in 1..=TICKS {
        move_entities(&mut world, &movers)?;
        let fallen = apply_damage(&mut world, &living)?;
        for entity in &fallen {
            world.delete_entity(*entity);
        }

        let snapshot = world.query(&report)?.to_json()?;
        info!(tick, fallen = fallen.len(), "{snapshot}");
    }

    info!(entities = world.entity_count(), "simulation finished");
    Ok(())
}

/// Adds each mover's velocity to its position.
fn move_entities(world: &mut World, movers: &QueryDescriptor) -> Result<()> {
    let steps: Vec<(Entity, Velocity)> = world
        .query(movers)?
        .iter()
        .filter_map(|row| Some((row.entity(), *row.get::<Velocity>()?)))
        .collect();

    for (entity, velocity) in steps {
        if let Some(position) = world.get_component_mut::<Position>(entity) {
            position.0 += velocity.0;
        }
    }
    Ok(())
}

/// Damages every entity with health, returning those that dropped to zero.
fn apply_damage(world: &mut World, living: &QueryDescriptor) -> Result<Vec<Entity>> {
    let targets = world.query(living)?.entities();

    let mut fallen = Vec::new();
    for entity in targets {
        if let Some(health) = world.get_component_mut::<Health>(entity) {
            health.damage(DAMAGE_PER_TICK);
            if !health.is_alive() {
                fallen.push(entity);
            }
        }
    }
    Ok(fallen)
}
