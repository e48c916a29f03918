use crate::{container::Registry, errors::ContainerError};

pub mod arc;

/// Allows custom behaviour when resolving typed values from a [Registry]
pub trait Resolver {
    fn resolve(registry: &Registry) -> Result<Self, ContainerError>
    where
        Self: Sized;
}
