//! World error types.

use sieve_component::RegistryError;

/// Errors raised by [`World`](crate::World) operations.
///
/// Every variant is raised before the failing operation mutates anything,
/// so there is never partial state to roll back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// An operation needed the index of a component type that was never
    /// registered with this world.
    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    /// A different Rust type is already registered under this component name.
    #[error("component name {0:?} is already registered for a different type")]
    DuplicateComponentName(String),
}

impl From<RegistryError> for WorldError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NameTaken(name) => Self::DuplicateComponentName(name.to_string()),
        }
    }
}
