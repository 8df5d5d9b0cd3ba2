//! # sieve_component
//!
//! The leaf layer of the sieve entity index. Defines what a component is,
//! how component types are numbered, and where component values live.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all indexed data must satisfy.
//! - [`ComponentKey`]: a component kind named by Rust type or string tag.
//! - [`Entity`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: monotonically increasing, never-reused IDs.
//! - [`ComponentRegistry`]: dense [`ComponentIndex`] assignment.
//! - [`ComponentStore`] / [`ComponentStores`]: one `Entity -> T` table per type.
//! - [`ComponentMask`]: the per-entity membership bit-set.
//! - [`QueryDescriptor`]: required / optional / excluded component lists.

pub mod component;
pub mod entity;
pub mod mask;
pub mod query;
pub mod registry;
pub mod store;

pub use component::{Component, ComponentKey, ComponentMeta, ComponentTypeId, field_name};
pub use entity::{Entity, EntityAllocator};
pub use mask::ComponentMask;
pub use query::QueryDescriptor;
pub use registry::{ComponentIndex, ComponentRegistry, RegistryError};
pub use store::{ComponentStore, ComponentStores, ErasedStore};
