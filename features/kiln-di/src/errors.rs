use thiserror::Error;

use crate::{introspect::ClassKind, types::DynError};

/// Errors raised while looking up, building or caching components
#[derive(Error, Debug)]
pub enum ContainerError {
    /// Nothing is bound under the requested id
    #[error("No binding registered for '{0}'")]
    NotFound(String),
    /// The introspector has no description of the class
    #[error("Class '{0}' is not known")]
    UnknownClass(String),
    /// The class exists but cannot be constructed
    #[error("Class '{class}' is {kind} and cannot be instantiated")]
    NotInstantiable { class: String, kind: ClassKind },
    /// Autowiring ran out of options for a constructor parameter
    #[error("Unable to resolve parameter '{parameter}' of '{class}'")]
    UnresolvedParameter { parameter: String, class: String },
    /// Materializing a component failed
    #[error("Failed to resolve '{id}': {source}")]
    Resolution {
        id: String,
        #[source]
        source: DynError,
    },
    /// The id is already being resolved further up the stack
    #[error("Circular dependency detected: {}", chain.join(" -> "))]
    CircularDependency { chain: Vec<String> },
    /// A constructor or factory asked for an argument it was not given
    #[error("Missing argument '{0}'")]
    MissingArgument(String),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
    /// Cache parameters could not be serialized into a key
    #[error("Could not derive a cache key for '{key}'")]
    CacheKey {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ContainerError {
    pub(crate) fn resolution(id: &str, source: impl Into<DynError>) -> Self {
        ContainerError::Resolution {
            id: id.to_string(),
            source: source.into(),
        }
    }

    /// Unwraps nested [ContainerError::Resolution] errors down to the first non-wrapper
    ///
    /// Stops early if a wrapped source is not a [ContainerError] (e.g. a factory's own error)
    pub fn root_cause(&self) -> &ContainerError {
        let mut current = self;
        while let ContainerError::Resolution { source, .. } = current {
            match source.downcast_ref::<ContainerError>() {
                Some(inner) => current = inner,
                None => break,
            }
        }
        current
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContainerError::NotFound(_))
    }
}
