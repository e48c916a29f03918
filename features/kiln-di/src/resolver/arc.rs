use std::{any::type_name, sync::Arc};

use crate::{container::Registry, errors::ContainerError, resolver::Resolver, types::Injectable};

/// Resolves the value bound under `type_name::<T>()`
impl<T: Injectable> Resolver for Arc<T> {
    fn resolve(registry: &Registry) -> Result<Self, ContainerError> {
        registry.get_as::<T>(type_name::<T>())
    }
}

impl<Resolvable: Resolver> Resolver for Option<Resolvable> {
    fn resolve(registry: &Registry) -> Result<Self, ContainerError>
    where
        Self: Sized,
    {
        match Resolvable::resolve(registry) {
            Ok(resolved) => Ok(Some(resolved)),
            // If the required type is not registered Option does not fail
            Err(ContainerError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
