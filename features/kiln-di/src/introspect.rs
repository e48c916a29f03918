//! Describes how classes are constructed
//!
//! The registry never inspects Rust types at runtime. Instead every
//! constructible class is described up front by a [ClassInfo], either written
//! by hand or derived from a [Constructible] implementation, and looked up
//! through a [ClassIntrospector].

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use crate::{
    parameters::Parameters,
    types::{DynError, Injectable, Instance, TypeRef},
};

/// Constructs an instance from its fully resolved arguments
pub type ConstructFn = Arc<dyn Fn(Parameters) -> Result<Instance, DynError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Concrete,
    Abstract,
    Interface,
}
impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ClassKind::Concrete => "concrete",
            ClassKind::Abstract => "abstract",
            ClassKind::Interface => "an interface",
        })
    }
}

/// A single constructor parameter
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    name: String,
    types: Vec<TypeRef>,
    default: Option<Instance>,
}

impl ParameterSpec {
    /// An untyped parameter without a default
    pub fn new(name: impl Into<String>) -> Self {
        ParameterSpec {
            name: name.into(),
            types: Vec::new(),
            default: None,
        }
    }

    /// Adds a declared type, calling this more than once declares a union
    pub fn typed(mut self, type_ref: TypeRef) -> Self {
        self.types.push(type_ref);
        self
    }

    /// Declares a union, members are tried in the given order
    pub fn union(mut self, members: impl IntoIterator<Item = TypeRef>) -> Self {
        self.types.extend(members);
        self
    }

    pub fn default_value(mut self, value: impl Injectable) -> Self {
        self.default = Some(Instance::new(value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeRef] {
        &self.types
    }

    pub fn is_union(&self) -> bool {
        self.types.len() > 1
    }

    pub fn default(&self) -> Option<&Instance> {
        self.default.as_ref()
    }
}

/// Everything the registry needs to know to build a class
#[derive(Clone)]
pub struct ClassInfo {
    name: String,
    kind: ClassKind,
    /// None = the class has no constructor and is default constructed
    constructor: Option<Vec<ParameterSpec>>,
    construct: Option<ConstructFn>,
}
impl Debug for ClassInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("constructor", &self.constructor)
            .finish()
    }
}

impl ClassInfo {
    /// A concrete class with a constructor, add its parameters with [ClassInfo::parameter]
    pub fn new<T, E, F>(name: impl Into<String>, construct: F) -> Self
    where
        T: Injectable,
        E: Into<DynError>,
        F: Fn(Parameters) -> Result<T, E> + Send + Sync + 'static,
    {
        let construct: ConstructFn = Arc::new(move |arguments: Parameters| {
            construct(arguments).map(Instance::new).map_err(Into::<DynError>::into)
        });

        ClassInfo {
            name: name.into(),
            kind: ClassKind::Concrete,
            constructor: Some(Vec::new()),
            construct: Some(construct),
        }
    }

    /// A concrete class without a constructor
    pub fn default_constructible<T: Injectable + Default>(name: impl Into<String>) -> Self {
        let construct: ConstructFn =
            Arc::new(|_: Parameters| Ok::<_, DynError>(Instance::new(T::default())));

        ClassInfo {
            name: name.into(),
            kind: ClassKind::Concrete,
            constructor: None,
            construct: Some(construct),
        }
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::non_instantiable(name, ClassKind::Abstract)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::non_instantiable(name, ClassKind::Interface)
    }

    fn non_instantiable(name: impl Into<String>, kind: ClassKind) -> Self {
        ClassInfo {
            name: name.into(),
            kind,
            constructor: None,
            construct: None,
        }
    }

    /// Appends a constructor parameter
    ///
    /// Declaring a parameter on a class without a constructor gives it one.
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.constructor.get_or_insert_with(Vec::new).push(parameter);
        self
    }

    pub fn parameters(mut self, parameters: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.constructor
            .get_or_insert_with(Vec::new)
            .extend(parameters);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_instantiable(&self) -> bool {
        self.kind == ClassKind::Concrete && self.construct.is_some()
    }

    /// Constructor parameters in declaration order, None if there is no constructor
    pub fn constructor(&self) -> Option<&[ParameterSpec]> {
        self.constructor.as_deref()
    }

    pub(crate) fn construct_fn(&self) -> Option<&ConstructFn> {
        self.construct.as_ref()
    }
}

/// Reads constructor information for a class name
pub trait ClassIntrospector: Send + Sync {
    /// Returns the class description, or None if the class is unknown
    fn inspect(&self, class: &str) -> Option<Arc<ClassInfo>>;
}

/// A type that describes its own constructor
///
/// # Example
/// ```rust
/// use kiln_di::{Constructible, DynError, Parameters, ParameterSpec, TypeRef};
///
/// struct Widget {
///     color: String,
/// }
///
/// impl Constructible for Widget {
///     fn class_name() -> &'static str {
///         "Widget"
///     }
///
///     fn parameters() -> Vec<ParameterSpec> {
///         vec![ParameterSpec::new("color")
///             .typed(TypeRef::builtin("string"))
///             .default_value(String::from("blue"))]
///     }
///
///     fn construct(arguments: Parameters) -> Result<Self, DynError> {
///         Ok(Widget {
///             color: arguments.cloned("color")?,
///         })
///     }
/// }
/// ```
pub trait Constructible: Injectable + Sized {
    /// The name this class is registered and autowired under
    fn class_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Constructor parameters in declaration order
    fn parameters() -> Vec<ParameterSpec>;

    /// Builds the instance from its resolved arguments
    fn construct(arguments: Parameters) -> Result<Self, DynError>;

    fn class_info() -> ClassInfo {
        ClassInfo::new(Self::class_name(), Self::construct).parameters(Self::parameters())
    }
}

/// In-memory [ClassIntrospector] filled with explicit descriptions
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: HashMap<String, Arc<ClassInfo>>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a class description
    pub fn insert(&mut self, info: ClassInfo) -> &mut Self {
        self.classes.insert(info.name.clone(), Arc::new(info));
        self
    }

    pub fn add<T: Constructible>(&mut self) -> &mut Self {
        self.insert(T::class_info())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassIntrospector for ClassCatalog {
    fn inspect(&self, class: &str) -> Option<Arc<ClassInfo>> {
        self.classes.get(class).cloned()
    }
}
