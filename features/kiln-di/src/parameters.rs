use std::sync::Arc;

use crate::{
    errors::ContainerError,
    types::{Injectable, Instance},
};

/// Ordered mapping from parameter name to value
///
/// Used for registration parameters, build overrides and the resolved
/// arguments handed to a constructor.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    entries: Vec<(String, Instance)>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Injectable) -> Self {
        self.insert(name, Instance::new(value));
        self
    }

    /// Inserts a value, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, value: Instance) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Positional access, in insertion order
    pub fn nth(&self, index: usize) -> Option<&Instance> {
        self.entries.get(index).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Gets a named value as its concrete type
    pub fn value<T: Injectable>(&self, name: &str) -> Result<Arc<T>, ContainerError> {
        let instance = self
            .get(name)
            .ok_or_else(|| ContainerError::MissingArgument(name.to_string()))?;

        instance
            .downcast()
            .map_err(|actual_type| ContainerError::DowncastFailed {
                required_type: std::any::type_name::<T>(),
                actual_type,
            })
    }

    /// Same as [Parameters::value] but clones the value out of its `Arc`
    pub fn cloned<T: Injectable + Clone>(&self, name: &str) -> Result<T, ContainerError> {
        self.value::<T>(name).map(|value| T::clone(&value))
    }
}
