//! Component bundles for entity creation.
//!
//! A [`Bundle`] is a tuple of component values handed to
//! [`World::create_entity`](crate::World::create_entity). Bundles are
//! implemented for `()` and for tuples of up to twelve components; a single
//! component is passed as a one-element tuple, `(value,)`.
//!
//! Creation is two-phase: [`Bundle::component_indices`] resolves every type
//! against the registry first, and only if all resolve does the world
//! allocate an entity and [`Bundle::write`] the values.

use sieve_component::{Component, ComponentIndex, ComponentRegistry};

use crate::error::WorldError;

/// Receives the components of a bundle one at a time, in tuple order.
pub trait BundleWriter {
    fn put<T: Component>(&mut self, value: T);
}

/// A group of component values inserted together.
pub trait Bundle: Send + Sync + 'static {
    /// Resolves the index of every component type in the bundle, in tuple
    /// order. Fails on the first unregistered type.
    fn component_indices(registry: &ComponentRegistry) -> Result<Vec<ComponentIndex>, WorldError>;

    /// Hands each component to `writer`, in tuple order.
    fn write<W: BundleWriter>(self, writer: &mut W);
}

/// Resolves `T` or reports it as unknown.
pub(crate) fn resolve<T: Component>(registry: &ComponentRegistry) -> Result<ComponentIndex, WorldError> {
    registry
        .index_of::<T>()
        .ok_or_else(|| WorldError::UnknownComponentType(T::type_name().to_string()))
}

macro_rules! impl_bundle {
    ($($name:ident),*) => {
        impl<$($name: Component),*> Bundle for ($($name,)*) {
            #[allow(unused_variables)]
            fn component_indices(
                registry: &ComponentRegistry,
            ) -> Result<Vec<ComponentIndex>, WorldError> {
                Ok(vec![$(resolve::<$name>(registry)?),*])
            }

            #[allow(non_snake_case, unused_variables)]
            fn write<W: BundleWriter>(self, writer: &mut W) {
                let ($($name,)*) = self;
                $(writer.put($name);)*
            }
        }
    };
}

impl_bundle!();
impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
impl_bundle!(A, B, C, D, E, F, G, H, I);
impl_bundle!(A, B, C, D, E, F, G, H, I, J);
impl_bundle!(A, B, C, D, E, F, G, H, I, J, K);
impl_bundle!(A, B, C, D, E, F, G, H, I, J, K, L);
