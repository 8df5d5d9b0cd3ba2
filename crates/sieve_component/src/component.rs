//! Core [`Component`] trait and associated metadata.
//!
//! Every value stored in a world must implement [`Component`]. The trait
//! requires `Send + Sync + 'static` so a world can sit behind a host-side
//! lock, and `Serialize` so query rows can be rendered as JSON records.
//!
//! ## Type Identity
//!
//! [`ComponentTypeId`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. A Rust type and a string tag carrying
//! the same name therefore denote the same component kind, which lets hosts
//! build queries from configuration data as well as from types.

use std::any::{Any, TypeId};
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A unique identifier for a component kind, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name.
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// Lowercases the first character of a component name to produce the field
/// name used in query rows (`"Position"` becomes `"position"`).
#[must_use]
pub fn field_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Names a component kind, either through a Rust type or a string tag.
///
/// Serialises as the bare name, so query descriptors can be written in
/// configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ComponentKey {
    id: ComponentTypeId,
    name: Cow<'static, str>,
}

impl ComponentKey {
    /// The key for Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self {
            id: T::component_type_id(),
            name: Cow::Borrowed(T::type_name()),
        }
    }

    /// The key for a component kind known only by name.
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self {
            id: ComponentTypeId::from_name(&name),
            name,
        }
    }

    #[must_use]
    pub fn id(&self) -> ComponentTypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<String> for ComponentKey {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<&'static str> for ComponentKey {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<ComponentKey> for String {
    fn from(key: ComponentKey) -> Self {
        key.name.into_owned()
    }
}

impl std::fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Renders a type-erased component as JSON. Returns `None` when the value is
/// not of the component type the metadata describes.
pub type ToJsonFn = fn(&dyn Any) -> Option<Result<serde_json::Value, serde_json::Error>>;

/// Metadata about a registered component type, used by type-erased code
/// (query rows, registry lookups by tag).
#[derive(Debug, Clone)]
pub struct ComponentMeta {
    /// The name-derived type identifier.
    pub type_id: ComponentTypeId,
    /// The human-readable name of the component (e.g. `"Position"`).
    pub name: &'static str,
    /// The field name used in query rows (e.g. `"position"`).
    pub field_name: String,
    /// The Rust type registered under `name`.
    pub rust_type: TypeId,
    /// Serialise a single component instance to a JSON value.
    pub to_json_fn: ToJsonFn,
}

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use sieve_component::Component;
///
/// #[derive(Debug, Clone, Serialize)]
/// struct Health {
///     current: u32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Sized + Send + Sync + 'static + Serialize {
    /// A human-readable name for this component type. Must be unique among
    /// the component types registered in one world.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    /// Returns the [`ComponentMeta`] descriptor for this component type.
    fn meta() -> ComponentMeta {
        ComponentMeta {
            type_id: Self::component_type_id(),
            name: Self::type_name(),
            field_name: field_name(Self::type_name()),
            rust_type: TypeId::of::<Self>(),
            to_json_fn: |value: &dyn Any| value.downcast_ref::<Self>().map(serde_json::to_value),
        }
    }
}
