use std::{
    any::type_name,
    cell::RefCell,
    collections::{BTreeSet, HashMap},
    fmt::Debug,
    sync::Arc,
};

use parking_lot::ReentrantMutex;
use serde::Serialize;

use crate::{
    builder::{RegistryBuilder, RegistryConfig},
    dependency_graph::DependencyGraph,
    errors::ContainerError,
    factories::{Binding, Component},
    introspect::{ClassInfo, ClassIntrospector, ParameterSpec},
    memo::{self, MemoKey},
    parameters::Parameters,
    resolver::Resolver,
    types::{DynError, Injectable, Instance},
};

/// Registry holding all bindings and the instances produced from them
///
/// Cloning is cheap, all clones share the same state.
/// Resolution runs in a reentrant critical section: factories and
/// constructors may call back into the registry on the same thread, while
/// other threads wait, so each id is materialized at most once.
#[derive(Clone)]
pub struct Registry(Arc<RegistryInner>);
struct RegistryInner {
    state: ReentrantMutex<RefCell<State>>,
    introspector: Arc<dyn ClassIntrospector>,
    config: RegistryConfig,
}

#[derive(Default)]
struct State {
    bindings: HashMap<String, Binding>,
    instances: HashMap<String, Instance>,
    /// Values stored through [Registry::cache]
    memo: HashMap<MemoKey, Instance>,
    /// Ids currently being materialized, outermost first
    resolving: Vec<String>,
    next_generation: u64,
}
impl State {
    /// Installs a binding and drops the cached instance, returns the replaced binding
    fn install(
        &mut self,
        id: String,
        component: Component,
        parameters: Parameters,
    ) -> Option<Binding> {
        self.next_generation += 1;
        self.instances.remove(&id);
        self.bindings.insert(
            id,
            Binding {
                component,
                parameters,
                generation: self.next_generation,
            },
        )
    }
}

/// Pops `id` off the resolution stack when dropped, also while unwinding
struct ResolvingEntry<'a> {
    state: &'a RefCell<State>,
    id: &'a str,
}
impl Drop for ResolvingEntry<'_> {
    fn drop(&mut self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        let position = state
            .resolving
            .iter()
            .rposition(|resolving| resolving == self.id);
        if let Some(position) = position {
            state.resolving.remove(position);
        }
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.0.state.lock();
        let Ok(state) = guard.try_borrow() else {
            return f.write_str("Registry { <resolving> }");
        };

        let mut ids: Vec<_> = state.bindings.iter().collect();
        ids.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut map = f.debug_struct("Registry");
        for (id, binding) in ids {
            let val = if state.instances.contains_key(id) {
                "cached"
            } else {
                binding.component.kind()
            };
            map.field(id, &val);
        }
        map.finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry with an empty class catalog
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(
        introspector: Arc<dyn ClassIntrospector>,
        config: RegistryConfig,
    ) -> Self {
        Self(Arc::new(RegistryInner {
            state: ReentrantMutex::new(RefCell::new(State::default())),
            introspector,
            config,
        }))
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.0.config
    }

    pub fn introspector(&self) -> &dyn ClassIntrospector {
        self.0.introspector.as_ref()
    }
}

// Binding table
impl Registry {
    /// Binds `id` unless it is already bound - the first registration wins
    ///
    /// Returns true if the binding was installed
    pub fn register(&self, id: impl Into<String>, component: Component) -> bool {
        self.register_with(id, component, Parameters::new())
    }

    /// [Registry::register] with parameter overrides
    pub fn register_with(
        &self,
        id: impl Into<String>,
        component: Component,
        parameters: Parameters,
    ) -> bool {
        let id = id.into();
        let guard = self.0.state.lock();
        let mut state = guard.borrow_mut();

        if state.bindings.contains_key(&id) {
            tracing::debug!("'{id}' is already bound - keeping the first registration");
            return false;
        }

        tracing::debug!("Binding '{id}' to {}", component.kind());
        state.install(id, component, parameters);
        true
    }

    /// Binds `id`, replacing any existing binding and its cached instance
    pub fn set(&self, id: impl Into<String>, component: Component) {
        self.set_with(id, component, Parameters::new())
    }

    /// [Registry::set] with parameter overrides
    pub fn set_with(&self, id: impl Into<String>, component: Component, parameters: Parameters) {
        let id = id.into();
        let guard = self.0.state.lock();
        let mut state = guard.borrow_mut();

        let kind = component.kind();
        match state.install(id.clone(), component, parameters) {
            Some(_) => tracing::debug!("Replaced binding '{id}' with {kind}"),
            None => tracing::debug!("Binding '{id}' to {kind}"),
        }
    }

    /// True if `id` is bound, nothing is constructed
    pub fn has(&self, id: &str) -> bool {
        self.0.state.lock().borrow().bindings.contains_key(id)
    }

    /// Removes the binding and its cached instance
    ///
    /// Returns true if there was a binding
    pub fn remove(&self, id: &str) -> bool {
        let guard = self.0.state.lock();
        let mut state = guard.borrow_mut();

        state.instances.remove(id);
        let removed = state.bindings.remove(id).is_some();
        if removed {
            tracing::debug!("Removed binding '{id}'");
        }
        removed
    }

    /// Snapshot of all bound ids
    pub fn list(&self) -> BTreeSet<String> {
        self.0.state.lock().borrow().bindings.keys().cloned().collect()
    }

    /// Drops every binding, cached instance and memoized value
    pub fn clear(&self) {
        let guard = self.0.state.lock();
        let mut state = guard.borrow_mut();

        tracing::debug!(
            "Clearing {} bindings and {} memoized values",
            state.bindings.len(),
            state.memo.len()
        );
        state.bindings.clear();
        state.instances.clear();
        state.memo.clear();
    }

    /// Snapshot of all bindings, sorted by id
    pub(crate) fn bindings(&self) -> Vec<(String, Binding)> {
        let guard = self.0.state.lock();
        let state = guard.borrow();

        let mut bindings: Vec<_> = state
            .bindings
            .iter()
            .map(|(id, binding)| (id.clone(), binding.clone()))
            .collect();
        bindings.sort_by(|(a, _), (b, _)| a.cmp(b));
        bindings
    }
}

// Resolution
impl Registry {
    /// Returns the value bound to `id`, materializing and caching it on first access
    pub fn get(&self, id: &str) -> Result<Instance, ContainerError> {
        let guard = self.0.state.lock();

        let binding = {
            let mut state = guard.borrow_mut();

            if let Some(instance) = state.instances.get(id) {
                tracing::trace!("Returning cached instance of '{id}'");
                return Ok(instance.clone());
            }

            let Some(binding) = state.bindings.get(id).cloned() else {
                return Err(ContainerError::NotFound(id.to_string()));
            };

            if state.resolving.iter().any(|resolving| resolving == id) {
                let mut chain = state.resolving.clone();
                chain.push(id.to_string()); // Add current so chain is complete

                tracing::warn!("Circular dependency detected: {}", chain.join(" -> "));
                return Err(ContainerError::CircularDependency { chain });
            }

            state.resolving.push(id.to_string());
            binding
        };

        // No borrow may be held here, the binding can call back into the registry
        let resolving = ResolvingEntry { state: &guard, id };
        let result = self.materialize(id, &binding);
        drop(resolving);

        let mut state = guard.borrow_mut();
        let instance = result.map_err(|error| ContainerError::resolution(id, error))?;

        let unchanged = state
            .bindings
            .get(id)
            .is_some_and(|current| current.generation == binding.generation);
        if unchanged {
            state.instances.insert(id.to_string(), instance.clone());
        } else {
            tracing::debug!("Binding '{id}' changed while it was constructed - not caching");
        }

        Ok(instance)
    }

    /// [Registry::get] downcast to the expected type
    pub fn get_as<T: Injectable>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        downcast(self.get(id)?)
    }

    /// Resolves a value through its [Resolver] implementation
    pub fn resolve<R: Resolver>(&self) -> Result<R, ContainerError> {
        R::resolve(self)
    }

    fn materialize(&self, id: &str, binding: &Binding) -> Result<Instance, DynError> {
        let instance = match &binding.component {
            Component::Value(instance) => return Ok(instance.clone()),
            Component::Factory(factory) => {
                tracing::debug!("Invoking factory for '{id}'");
                factory(self, &binding.parameters)?
            }
            Component::Class(class) => self.build(class, &binding.parameters)?,
        };

        tracing::debug!("Constructed instance of '{id}' ({})", instance.info);
        Ok(instance)
    }
}

// Construction
impl Registry {
    /// Constructs a new instance of `class`, autowiring its constructor
    ///
    /// Every call constructs a fresh instance, nothing is cached. Each
    /// parameter is resolved in declaration order from, in priority:
    /// 1. `overrides`
    /// 2. its declared type(s) - the registry itself, or a bound or autowirable id
    /// 3. its default value
    pub fn build(&self, class: &str, overrides: &Parameters) -> Result<Instance, ContainerError> {
        let _guard = self.0.state.lock();

        let info = self
            .0
            .introspector
            .inspect(class)
            .ok_or_else(|| ContainerError::UnknownClass(class.to_string()))?;

        let construct = match info.construct_fn() {
            Some(construct) if info.is_instantiable() => construct,
            _ => {
                return Err(ContainerError::NotInstantiable {
                    class: class.to_string(),
                    kind: info.kind(),
                })
            }
        };

        let mut arguments = Parameters::new();
        match info.constructor() {
            Some(constructor) => {
                for parameter in constructor {
                    let value = self.resolve_parameter(&info, parameter, overrides)?;
                    arguments.insert(parameter.name(), value);
                }
            }
            None => tracing::trace!("'{class}' has no constructor - using default construction"),
        }

        tracing::debug!("Building '{class}' with {} arguments", arguments.len());
        construct(arguments).map_err(|error| ContainerError::resolution(class, error))
    }

    /// [Registry::build] downcast to the expected type
    pub fn build_as<T: Injectable>(
        &self,
        class: &str,
        overrides: &Parameters,
    ) -> Result<Arc<T>, ContainerError> {
        downcast(self.build(class, overrides)?)
    }

    fn resolve_parameter(
        &self,
        class: &ClassInfo,
        parameter: &ParameterSpec,
        overrides: &Parameters,
    ) -> Result<Instance, ContainerError> {
        if let Some(value) = overrides.get(parameter.name()) {
            return Ok(value.clone());
        }

        // Builtin types are never autowired
        let mut candidates = parameter.types().iter().filter(|ty| !ty.is_builtin());

        if parameter.is_union() {
            for candidate in candidates {
                if candidate.is_registry() {
                    return Ok(self.as_instance());
                }
                if !self.can_autowire(candidate.name()) {
                    continue;
                }

                match self.autowire(candidate.name()) {
                    Ok(value) => return Ok(value),
                    Err(error) => tracing::debug!(
                        "Union member '{candidate}' for '{}' of '{}' failed, trying next - {error}",
                        parameter.name(),
                        class.name()
                    ),
                }
            }
        } else if let Some(candidate) = candidates.next() {
            if candidate.is_registry() {
                return Ok(self.as_instance());
            }
            if self.can_autowire(candidate.name()) {
                return self.autowire(candidate.name());
            }
        }

        if let Some(default) = parameter.default() {
            return Ok(default.clone());
        }

        tracing::error!(
            "Unable to resolve parameter '{}' of '{}'",
            parameter.name(),
            class.name()
        );
        Err(ContainerError::UnresolvedParameter {
            parameter: parameter.name().to_string(),
            class: class.name().to_string(),
        })
    }

    /// True if `name` is bound, or is an instantiable class that may be bound on demand
    pub(crate) fn can_autowire(&self, name: &str) -> bool {
        self.has(name) || self.autowirable_class(name)
    }

    pub(crate) fn autowirable_class(&self, name: &str) -> bool {
        self.0.config.autowire
            && self
                .0
                .introspector
                .inspect(name)
                .is_some_and(|info| info.is_instantiable())
    }

    /// Binds `name` to its class if unbound and resolves it
    ///
    /// A binding installed here is dropped again if its first resolution fails.
    fn autowire(&self, name: &str) -> Result<Instance, ContainerError> {
        let installed = self.install_autowired(name);
        let result = self.get(name);

        if let (Err(error), Some(generation)) = (&result, installed) {
            let guard = self.0.state.lock();
            let mut state = guard.borrow_mut();

            let unchanged = state
                .bindings
                .get(name)
                .is_some_and(|current| current.generation == generation);
            if unchanged {
                tracing::debug!("Dropping autowired binding '{name}' - {error}");
                state.bindings.remove(name);
            }
        }

        result
    }

    /// Binds `name` to its own class unless bound, returns the new binding's generation
    fn install_autowired(&self, name: &str) -> Option<u64> {
        let guard = self.0.state.lock();
        let mut state = guard.borrow_mut();

        if state.bindings.contains_key(name) {
            return None;
        }

        state.install(name.to_string(), Component::class(name), Parameters::new());
        tracing::debug!("Autowired class '{name}'");
        let generation = state.next_generation;
        Some(generation)
    }

    fn as_instance(&self) -> Instance {
        Instance::new(self.clone())
    }
}

// Memoization
impl Registry {
    /// Memoizes `producer` under `key` and `parameters`
    ///
    /// The first call for a key and parameter set runs `producer`, later calls
    /// return the stored value. Different parameters produce independent entries.
    pub fn cache<T, P, E, F>(
        &self,
        key: &str,
        producer: F,
        parameters: &P,
    ) -> Result<Arc<T>, ContainerError>
    where
        T: Injectable,
        P: Serialize + ?Sized,
        E: Into<DynError>,
        F: FnOnce(&P) -> Result<T, E>,
    {
        let cache_key = memo::cache_key(key, parameters)?;
        let guard = self.0.state.lock();

        let cached = guard.borrow().memo.get(&cache_key).cloned();
        let instance = match cached {
            Some(instance) => {
                tracing::trace!("Returning memoized value for '{cache_key}'");
                instance
            }
            None => {
                tracing::debug!("Computing memoized value for '{cache_key}'");
                let value =
                    producer(parameters).map_err(|error| ContainerError::resolution(key, error))?;
                let instance = Instance::new(value);
                guard
                    .borrow_mut()
                    .memo
                    .insert(cache_key, instance.clone());
                instance
            }
        };

        downcast(instance)
    }

    /// Static view of the dependencies between all bindings
    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::new(self)
    }
}

fn downcast<T: Injectable>(instance: Instance) -> Result<Arc<T>, ContainerError> {
    instance
        .downcast()
        .map_err(|actual_type| ContainerError::DowncastFailed {
            required_type: type_name::<T>(),
            actual_type,
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{introspect::ClassCatalog, types::TypeRef};

    #[derive(Debug)]
    struct Counter(usize);

    #[test]
    fn register_keeps_first_and_set_replaces() {
        let registry = Registry::new();

        assert!(registry.register("x", Component::value(1_u32)));
        assert!(!registry.register("x", Component::value(2_u32)));
        assert_eq!(*registry.get_as::<u32>("x").unwrap(), 1);

        registry.set("x", Component::value(3_u32));
        assert_eq!(*registry.get_as::<u32>("x").unwrap(), 3);
    }

    #[test]
    fn factory_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Registry::new();
        let counted = calls.clone();
        registry.set(
            "counter",
            Component::factory(move |_, _| {
                Ok::<_, DynError>(Counter(counted.fetch_add(1, Ordering::SeqCst)))
            }),
        );

        let first = registry.get("counter").unwrap();
        let second = registry.get("counter").unwrap();

        assert!(first.ptr_eq(&second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn factory_receives_registered_parameters() {
        let registry = Registry::new();
        registry.set_with(
            "dsn",
            Component::factory(|_, parameters| {
                Ok::<_, DynError>(format!(
                    "{}://{}",
                    parameters.cloned::<String>("driver")?,
                    parameters.cloned::<String>("path")?
                ))
            }),
            Parameters::new()
                .with("driver", String::from("sqlite"))
                .with("path", String::from("app.db")),
        );

        assert_eq!(*registry.get_as::<String>("dsn").unwrap(), "sqlite://app.db");
    }

    #[test]
    fn set_and_remove_invalidate_the_cache() {
        let registry = Registry::new();
        registry.set("n", Component::factory(|_, _| Ok::<_, DynError>(Counter(1))));
        let before = registry.get("n").unwrap();

        registry.set("n", Component::factory(|_, _| Ok::<_, DynError>(Counter(2))));
        let after = registry.get("n").unwrap();
        assert!(!before.ptr_eq(&after));
        assert_eq!(after.downcast::<Counter>().unwrap().0, 2);

        assert!(registry.remove("n"));
        assert!(!registry.remove("n"));
        assert!(registry.get("n").unwrap_err().is_not_found());
    }

    #[test]
    fn list_is_a_snapshot() {
        let registry = Registry::new();
        registry.set("a", Component::value(()));
        registry.set("b", Component::value(()));

        let listed = registry.list();
        registry.remove("a");
        registry.set("c", Component::value(()));

        assert_eq!(listed.into_iter().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(registry.list().into_iter().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn clear_empties_everything() {
        let registry = Registry::new();
        registry.set("a", Component::value(1_u8));
        registry.get("a").unwrap();
        registry
            .cache("memo", |_| Ok::<_, DynError>(1_u8), &())
            .unwrap();

        registry.clear();

        assert!(registry.list().is_empty());
        assert!(registry.get("a").unwrap_err().is_not_found());
        let recomputed = registry
            .cache("memo", |_| Ok::<_, DynError>(2_u8), &())
            .unwrap();
        assert_eq!(*recomputed, 2);
    }

    #[test]
    fn factories_can_resolve_their_own_dependencies() {
        let registry = Registry::new();
        registry.set("base", Component::value(20_u32));
        registry.set(
            "derived",
            Component::factory(|registry, _| {
                let base = registry.get_as::<u32>("base")?;
                Ok::<_, DynError>(*base + 1)
            }),
        );

        assert_eq!(*registry.get_as::<u32>("derived").unwrap(), 21);
    }

    #[test]
    fn cycles_fail_fast() {
        let registry = Registry::new();
        registry.set(
            "a",
            Component::factory(|registry, _| registry.get("b").map(|_| ())),
        );
        registry.set(
            "b",
            Component::factory(|registry, _| registry.get("a").map(|_| ())),
        );

        let error = registry.get("a").unwrap_err();
        assert!(matches!(
            error.root_cause(),
            ContainerError::CircularDependency { chain } if chain == &["a", "b", "a"]
        ));

        // The failed attempt leaves nothing half resolved behind
        registry.set("b", Component::value(()));
        assert!(registry.get("a").is_ok());
    }

    #[test]
    fn failed_factories_are_wrapped_and_retried_on_next_get() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let registry = Registry::new();
        registry.set(
            "flaky",
            Component::factory(move |_, _| match counted.fetch_add(1, Ordering::SeqCst) {
                0 => Err("not yet"),
                _ => Ok(Counter(1)),
            }),
        );

        let error = registry.get("flaky").unwrap_err();
        assert_eq!(error.to_string(), "Failed to resolve 'flaky': not yet");
        assert!(registry.get("flaky").is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn replacing_a_binding_during_construction_skips_caching() {
        let registry = Registry::new();
        registry.set(
            "config",
            Component::factory(|registry, _| {
                registry.set("config", Component::value(String::from("replaced")));
                Ok::<_, DynError>(String::from("original"))
            }),
        );

        assert_eq!(*registry.get_as::<String>("config").unwrap(), "original");
        assert_eq!(*registry.get_as::<String>("config").unwrap(), "replaced");
    }

    #[test]
    fn get_as_reports_type_mismatch() {
        let registry = Registry::new();
        registry.set("port", Component::value(8080_u16));

        assert!(matches!(
            registry.get_as::<String>("port"),
            Err(ContainerError::DowncastFailed { actual_type: "u16", .. })
        ));
    }

    #[test]
    fn build_never_caches() {
        let mut catalog = ClassCatalog::new();
        catalog.insert(ClassInfo::new("Counter", |_| Ok::<_, DynError>(Counter(0))));
        let registry = Registry::builder().introspector(catalog).build();

        let first = registry.build("Counter", &Parameters::new()).unwrap();
        let second = registry.build("Counter", &Parameters::new()).unwrap();

        assert!(!first.ptr_eq(&second));
        assert!(registry.list().is_empty());
    }

    #[test]
    fn unbound_classes_are_autowired_and_cached() {
        let mut catalog = ClassCatalog::new();
        catalog
            .insert(ClassInfo::default_constructible::<String>("Logger"))
            .insert(
                ClassInfo::new("Service", |arguments| arguments.value::<String>("logger"))
                    .parameter(ParameterSpec::new("logger").typed(TypeRef::named("Logger"))),
            );
        let registry = Registry::builder().introspector(catalog).build();

        registry.build("Service", &Parameters::new()).unwrap();

        assert!(registry.has("Logger"));
        let logger = registry.get("Logger").unwrap();
        assert!(logger.ptr_eq(&registry.get("Logger").unwrap()));
    }

    #[test]
    fn autowiring_can_be_disabled() {
        let mut catalog = ClassCatalog::new();
        catalog
            .insert(ClassInfo::default_constructible::<String>("Logger"))
            .insert(
                ClassInfo::new("Service", |arguments| arguments.value::<String>("logger"))
                    .parameter(ParameterSpec::new("logger").typed(TypeRef::named("Logger"))),
            );
        let registry = Registry::builder()
            .introspector(catalog)
            .config(RegistryConfig { autowire: false })
            .build();

        assert!(matches!(
            registry.build("Service", &Parameters::new()),
            Err(ContainerError::UnresolvedParameter { parameter, class })
                if parameter == "logger" && class == "Service"
        ));
        assert!(!registry.has("Logger"));
    }

    #[test]
    fn debug_lists_bindings_and_cache_state() {
        let registry = Registry::new();
        registry.set("a", Component::value(1_u8));
        registry.set("b", Component::class("B"));
        registry.get("a").unwrap();

        assert_eq!(
            format!("{registry:?}"),
            r#"Registry { a: "cached", b: "class" }"#
        );
    }

    #[test]
    fn panicking_factories_leave_the_id_resolvable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let registry = Registry::new();
        registry.set(
            "flaky",
            Component::factory(move |_, _| {
                if counted.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("factory blew up");
                }
                Ok::<_, DynError>(Counter(1))
            }),
        );

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.get("flaky")
        }));
        assert!(unwound.is_err());

        let instance = registry.get("flaky").unwrap();
        assert_eq!(instance.downcast::<Counter>().unwrap().0, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_autowiring_leaves_no_binding_behind() {
        let mut catalog = ClassCatalog::new();
        catalog
            .insert(ClassInfo::new("RedisCache", |_| {
                Err::<String, _>("redis is down")
            }))
            .insert(ClassInfo::default_constructible::<String>("FileCache"))
            .insert(
                ClassInfo::new("Service", |arguments| arguments.value::<String>("cache"))
                    .parameter(ParameterSpec::new("cache").union([
                        TypeRef::named("RedisCache"),
                        TypeRef::named("FileCache"),
                    ])),
            );
        let registry = Registry::builder().introspector(catalog).build();

        registry.build("Service", &Parameters::new()).unwrap();

        assert!(!registry.has("RedisCache"));
        assert_eq!(
            registry.list().into_iter().collect::<Vec<_>>(),
            ["FileCache"]
        );
    }

    #[test]
    fn explicit_bindings_survive_failed_resolution() {
        let mut catalog = ClassCatalog::new();
        catalog.insert(ClassInfo::new("RedisCache", |_| {
            Err::<String, _>("redis is down")
        }));
        let registry = Registry::builder().introspector(catalog).build();
        registry.set("RedisCache", Component::class("RedisCache"));

        assert!(registry.autowire("RedisCache").is_err());
        assert!(registry.has("RedisCache"));
    }
}
