//! # sieve_world
//!
//! The coordinating layer of the sieve entity index. A [`World`] owns the
//! component registry, one store per component type, and a membership mask
//! per live entity, and keeps the three consistent on every mutation:
//! an entity's mask has bit `i` set exactly when store `i` holds a value
//! for it.
//!
//! Queries scan the masks and join the matching entities across stores:
//!
//! ```rust
//! use serde::Serialize;
//! use sieve_component::{Component, QueryDescriptor};
//! use sieve_world::World;
//!
//! #[derive(Debug, Serialize, PartialEq)]
//! struct Position(f32, f32);
//! impl Component for Position {
//!     fn type_name() -> &'static str { "Position" }
//! }
//!
//! #[derive(Debug, Serialize, PartialEq)]
//! struct Health(u32);
//! impl Component for Health {
//!     fn type_name() -> &'static str { "Health" }
//! }
//!
//! let mut world = World::new();
//! world.register::<Position>().unwrap();
//! world.register::<Health>().unwrap();
//!
//! let a = world.create_entity((Position(0.0, 0.0),)).unwrap();
//! let b = world.create_entity((Position(1.0, 1.0), Health(100))).unwrap();
//!
//! let query = QueryDescriptor::new().require::<Position>().optional::<Health>();
//! let result = world.query(&query).unwrap();
//! assert_eq!(result.entities(), vec![a, b]);
//! assert_eq!(result.rows()[1].get::<Health>(), Some(&Health(100)));
//! assert!(result.rows()[0].get::<Health>().is_none());
//! ```
//!
//! The world is not internally synchronised. Hosts sharing one across
//! threads wrap it in a reader/writer lock, or give each worker its own.

pub mod bundle;
pub mod config;
pub mod error;
pub mod query;
pub mod world;

pub use bundle::{Bundle, BundleWriter};
pub use config::WorldConfig;
pub use error::WorldError;
pub use query::{QueryField, QueryResult, QueryRow};
pub use world::World;
