use std::{any::type_name, sync::Arc};

use crate::{
    container::Registry,
    dependency_graph::DependencyGraphErrors,
    factories::Component,
    introspect::{ClassCatalog, ClassInfo, ClassIntrospector, Constructible},
    parameters::Parameters,
    types::{DynError, Injectable},
};

/// Settings of a [Registry]
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Bind unbound but instantiable classes on demand while building
    pub autowire: bool,
}
impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig { autowire: true }
    }
}

//////////////////////////////////////////////////////////////////////
///
/// Collects classes and bindings before the registry is shared.
///
/// Typed helpers (`add_*`) bind under `std::any::type_name::<T>()`, the same
/// name [TypeRef::of](crate::TypeRef::of) produces, so typed dependencies
/// autowire without spelling out ids.
pub struct RegistryBuilder {
    catalog: ClassCatalog,
    /// Consulted for classes the catalog does not define
    introspector: Option<Arc<dyn ClassIntrospector>>,
    bindings: Vec<(String, Component, Parameters)>,
    config: RegistryConfig,
}
impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        RegistryBuilder {
            catalog: ClassCatalog::new(),
            introspector: None,
            bindings: Vec::new(),
            config: RegistryConfig::default(),
        }
    }
}
impl RegistryBuilder {
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a custom introspector
    ///
    /// Classes added through [RegistryBuilder::define] still take precedence.
    pub fn introspector(mut self, introspector: impl ClassIntrospector + 'static) -> Self {
        self.introspector = Some(Arc::new(introspector));
        self
    }

    /// Describes a class without binding it
    pub fn define(mut self, info: ClassInfo) -> Self {
        self.catalog.insert(info);
        self
    }

    pub fn define_class<T: Constructible>(mut self) -> Self {
        self.catalog.add::<T>();
        self
    }

    /// Binds `id` - later bindings for the same id replace earlier ones
    pub fn bind(self, id: impl Into<String>, component: Component) -> Self {
        self.bind_with(id, component, Parameters::new())
    }

    pub fn bind_with(
        mut self,
        id: impl Into<String>,
        component: Component,
        parameters: Parameters,
    ) -> Self {
        self.bindings.push((id.into(), component, parameters));
        self
    }

    pub fn add_instance<T: Injectable>(self, instance: T) -> Self {
        self.bind(type_name::<T>(), Component::value(instance))
    }

    pub fn add_factory<T, E, F>(self, factory: F) -> Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(&Registry, &Parameters) -> Result<T, E> + Send + Sync + 'static,
    {
        self.bind(type_name::<T>(), Component::factory(factory))
    }

    /// Describes `T` and binds it under its class name
    pub fn add_class<T: Constructible>(self) -> Self {
        self.define_class::<T>()
            .bind(T::class_name(), Component::class(T::class_name()))
    }

    pub fn build(self) -> Registry {
        let RegistryBuilder {
            catalog,
            introspector,
            bindings,
            config,
        } = self;

        tracing::debug!(
            "Building registry with {} classes and {} bindings",
            catalog.len(),
            bindings.len()
        );

        let introspector: Arc<dyn ClassIntrospector> = match introspector {
            Some(fallback) if !catalog.is_empty() => {
                Arc::new(LayeredIntrospector { catalog, fallback })
            }
            Some(introspector) => introspector,
            None => Arc::new(catalog),
        };
        let registry = Registry::from_parts(introspector, config);
        for (id, component, parameters) in bindings {
            registry.set_with(id, component, parameters);
        }
        registry
    }

    /// Builds the registry and validates its dependency graph
    pub fn build_checked(self) -> Result<Registry, DependencyGraphErrors> {
        let registry = self.build();
        registry.graph().check()?;
        Ok(registry)
    }
}

/// Builder catalog in front of a custom introspector
struct LayeredIntrospector {
    catalog: ClassCatalog,
    fallback: Arc<dyn ClassIntrospector>,
}
impl ClassIntrospector for LayeredIntrospector {
    fn inspect(&self, class: &str) -> Option<Arc<ClassInfo>> {
        self.catalog
            .inspect(class)
            .or_else(|| self.fallback.inspect(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Port(u16);

    #[test]
    fn typed_helpers_bind_under_type_names() {
        let registry = RegistryBuilder::new()
            .add_instance(Port(8080))
            .add_factory(|registry, _| {
                let port = registry.get_as::<Port>(type_name::<Port>())?;
                Ok::<_, DynError>(format!("127.0.0.1:{}", port.0))
            })
            .build();

        assert!(registry.has(type_name::<Port>()));
        assert_eq!(
            *registry.get_as::<String>(type_name::<String>()).unwrap(),
            "127.0.0.1:8080"
        );
    }

    #[test]
    fn later_bindings_replace_earlier_ones() {
        let registry = RegistryBuilder::new()
            .bind("port", Component::value(Port(1)))
            .bind("port", Component::value(Port(2)))
            .build();

        assert_eq!(*registry.get_as::<Port>("port").unwrap(), Port(2));
    }

    #[test]
    fn defined_classes_are_not_bound() {
        let registry = RegistryBuilder::new()
            .define(ClassInfo::default_constructible::<String>("Clock"))
            .build();

        assert!(registry.list().is_empty());
        assert!(registry.introspector().inspect("Clock").is_some());
    }

    #[test]
    fn build_checked_rejects_broken_graphs() {
        let broken = RegistryBuilder::new()
            .bind("ghost", Component::class("Ghost"))
            .build_checked();
        assert_eq!(broken.unwrap_err().errors.len(), 1);

        let valid = RegistryBuilder::new()
            .define(ClassInfo::default_constructible::<String>("Clock"))
            .bind("clock", Component::class("Clock"))
            .build_checked();
        assert!(valid.is_ok());
    }

    #[test]
    fn defined_classes_survive_a_custom_introspector() {
        let mut external = ClassCatalog::new();
        external
            .insert(ClassInfo::default_constructible::<String>("Clock"))
            .insert(ClassInfo::default_constructible::<u8>("Shared"));

        let registry = RegistryBuilder::new()
            .define(ClassInfo::default_constructible::<u32>("Shared"))
            .introspector(external)
            .define(ClassInfo::default_constructible::<u16>("Timer"))
            .bind("timer", Component::class("Timer"))
            .build();

        assert!(registry.introspector().inspect("Clock").is_some());
        assert_eq!(*registry.get_as::<u16>("timer").unwrap(), 0);
        assert!(registry
            .build_as::<u32>("Shared", &Parameters::new())
            .is_ok());
    }
}
