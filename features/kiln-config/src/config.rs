use std::{any::type_name, ops::Deref, sync::Arc};

use kiln_di::{ContainerError, Injectable, Registry, Resolver};

/// A wrapper type to allow for config injections
///
/// This provides a simple way to retrieve configs installed into a
/// [Registry] by a [ConfigProvider](crate::provider::ConfigProvider)
///
/// # Example
/// ```rust
/// use kiln_config::{config::Config, provider::ConfigProvider};
/// use kiln_di::Registry;
///
/// pub struct MyModuleConfig {
///     enabled: bool,
/// }
///
/// let mut config_provider = ConfigProvider::new();
/// config_provider
///     .add_config(MyModuleConfig { enabled: true })
///     .unwrap();
///
/// let registry = Registry::new();
/// config_provider.install(&registry);
///
/// let config = registry.resolve::<Config<MyModuleConfig>>().unwrap();
/// assert!(config.enabled);
/// ```
pub struct Config<T> {
    inner: Arc<T>,
}
impl<T> Deref for Config<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<T> Config<T> {
    pub fn inner(&self) -> Arc<T> {
        self.inner.clone()
    }

    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }
}

impl<T: Injectable> Resolver for Config<T> {
    fn resolve(registry: &Registry) -> Result<Self, ContainerError>
    where
        Self: Sized,
    {
        let config_name = type_name::<T>();
        let inner = registry.get_as::<T>(config_name)?;

        Ok(Config { inner })
    }
}
