use std::{any::TypeId, collections::HashMap, sync::Arc};

use kiln_di::{Component, Injectable, Instance, Registry, TypeInfo};

use crate::errors::ConfigError;

/// A provider to register all configs.
///
/// Configs can be registered and retrieved based on type, and are handed to a
/// [Registry] once at startup through [ConfigProvider::install].
#[derive(Debug, Default)]
pub struct ConfigProvider {
    configs: HashMap<TypeId, Instance>,
}

impl ConfigProvider {
    /// Initializes an empty Config Provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a config with specified type.
    ///
    /// Returns `None` if no config of that type was added
    pub fn get_config<T: Injectable>(&self) -> Option<Arc<T>> {
        self.configs
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast().ok())
    }

    /// Retrieve a config with specified type, failing if it is missing
    pub fn require_config<T: Injectable>(&self) -> Result<Arc<T>, ConfigError> {
        self.get_config()
            .ok_or_else(|| ConfigError::Missing(TypeInfo::of::<T>()))
    }

    /// Add a config to the registry.
    ///
    /// If the config type is already registered, it will return a
    /// [`ConfigError`] runtime error
    pub fn add_config<T: Injectable>(&mut self, config: T) -> Result<&mut Self, ConfigError> {
        let info = TypeInfo::of::<T>();

        if self.configs.contains_key(&info.type_id) {
            return Err(ConfigError::AlreadyRegistered(info));
        }

        self.configs.insert(info.type_id, Instance::new(config));
        Ok(self)
    }

    /// Can optionally add a config to the registry.
    ///
    /// If the config provided is `Some(T)`, it will be the same as calling [`ConfigProvider::add_config`]
    /// If the config provided is `None`, then the function just returns `Ok(self)` for chaining
    pub fn maybe_add_config<T: Injectable>(
        &mut self,
        config: Option<T>,
    ) -> Result<&mut Self, ConfigError> {
        match config {
            Some(c) => self.add_config(c),
            None => Ok(self),
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Binds every config under its type name
    ///
    /// Existing bindings are kept, returns the number of configs installed
    pub fn install(&self, registry: &Registry) -> usize {
        let mut installed = 0;
        for config in self.configs.values() {
            if registry.register(config.info.type_name, Component::Value(config.clone())) {
                installed += 1;
            } else {
                tracing::debug!("'{}' is already bound - keeping the existing binding", config.info);
            }
        }

        tracing::debug!(
            "Installed {installed} of {} configs into the registry",
            self.configs.len()
        );
        installed
    }
}
