//! Kiln DI is a service registry which builds object graphs on demand.
//!
//! Components are bound under string ids as one of
//! 1. a factory - called once, on first lookup
//! 2. a class name - constructed through its [ClassInfo], autowiring the constructor
//! 3. a ready value
//!
//! Every lookup after the first returns the same shared [Instance].
//!
//! # Examples
//!
//! ```rust
//! use std::any::type_name;
//! use kiln_di::{ClassInfo, Component, DynError, Parameters, ParameterSpec, Registry, TypeRef};
//!
//! struct Config {
//!     driver: String,
//! }
//!
//! struct Database {
//!     config: std::sync::Arc<Config>,
//! }
//!
//! let registry = Registry::builder()
//!     .define(
//!         ClassInfo::new("Database", |arguments: Parameters| {
//!             Ok::<_, DynError>(Database {
//!                 config: arguments.value("config")?,
//!             })
//!         })
//!         .parameter(ParameterSpec::new("config").typed(TypeRef::of::<Config>())),
//!     )
//!     .add_instance(Config {
//!         driver: "sqlite".to_string(),
//!     })
//!     .bind("db", Component::class("Database"))
//!     .build();
//!
//! let db = registry.get_as::<Database>("db").unwrap();
//! assert_eq!(db.config.driver, "sqlite");
//! assert!(registry.has(type_name::<Config>()));
//! ```

pub mod builder;
pub mod container;
pub mod dependency_graph;
pub mod errors;
pub mod factories;
pub mod introspect;
mod memo;
pub mod parameters;
pub mod resolver;
pub mod types;

pub use builder::{RegistryBuilder, RegistryConfig};
pub use container::Registry;
pub use dependency_graph::{DependencyGraph, DependencyGraphError, DependencyGraphErrors};
pub use errors::ContainerError;
pub use factories::{Binding, Component, FactoryFn};
pub use introspect::{
    ClassCatalog, ClassInfo, ClassIntrospector, ClassKind, ConstructFn, Constructible,
    ParameterSpec,
};
pub use parameters::Parameters;
pub use resolver::Resolver;
pub use types::{DynError, Injectable, Instance, TypeInfo, TypeRef};
