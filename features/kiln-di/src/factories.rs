use std::{fmt::Debug, sync::Arc};

use crate::{
    container::Registry,
    parameters::Parameters,
    types::{DynError, Injectable, Instance},
};

/// A factory producing an instance, called with the registry and the binding's parameters
pub type FactoryFn =
    Arc<dyn Fn(&Registry, &Parameters) -> Result<Instance, DynError> + Send + Sync>;

/// The means of producing a bound value
///
/// The kind is chosen once at registration and never inferred afterwards.
#[derive(Clone)]
pub enum Component {
    /// Called on first `get`, the result is cached
    Factory(FactoryFn),
    /// Built through the registry's introspector on first `get`
    Class(String),
    /// Returned as-is
    Value(Instance),
}
impl Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Factory(_) => f.write_str("Factory"),
            Component::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Component::Value(instance) => f.debug_tuple("Value").field(instance).finish(),
        }
    }
}

impl Component {
    pub fn factory<T, E, F>(factory: F) -> Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(&Registry, &Parameters) -> Result<T, E> + Send + Sync + 'static,
    {
        let factory: FactoryFn = Arc::new(move |registry: &Registry, parameters: &Parameters| {
            factory(registry, parameters)
                .map(Instance::new)
                .map_err(Into::<DynError>::into)
        });
        Component::Factory(factory)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Component::Class(name.into())
    }

    pub fn value(value: impl Injectable) -> Self {
        Component::Value(Instance::new(value))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Component::Factory(_) => "factory",
            Component::Class(_) => "class",
            Component::Value(_) => "value",
        }
    }
}

/// A registered id together with its component and parameter overrides
#[derive(Debug, Clone)]
pub struct Binding {
    pub component: Component,
    pub parameters: Parameters,
    /// Stamped on install, distinguishes a binding from a later replacement
    pub(crate) generation: u64,
}
