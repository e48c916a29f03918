use std::collections::{BTreeMap, HashSet, VecDeque};

use thiserror::Error;

use crate::{
    container::Registry,
    factories::{Binding, Component},
    introspect::ClassKind,
    parameters::Parameters,
};

/// Graph of every binding and the ids its construction depends on
///
/// Built from a snapshot of the registry using the same rules as
/// [Registry::build], without constructing anything. Used to find missing and
/// circular dependencies up front.
///
/// Factories and values are opaque and have no outgoing edges. Classes that
/// would be autowired appear as their own nodes.
pub struct DependencyGraph {
    map: BTreeMap<String, Vec<String>>,
    /// Problems found while reading the bindings
    issues: Vec<DependencyGraphError>,
}
impl DependencyGraph {
    pub fn new(registry: &Registry) -> Self {
        let bindings = registry.bindings();
        let bound: HashSet<String> = bindings.iter().map(|(id, _)| id.clone()).collect();

        let mut graph = Self {
            map: BTreeMap::new(),
            issues: Vec::new(),
        };

        // None = unbound class reached through autowiring
        let mut queue: VecDeque<(String, Option<Binding>)> = bindings
            .into_iter()
            .map(|(id, binding)| (id, Some(binding)))
            .collect();

        while let Some((id, binding)) = queue.pop_front() {
            if graph.map.contains_key(&id) {
                continue;
            }

            let (class, parameters) = match binding {
                Some(Binding {
                    component: Component::Class(class),
                    parameters,
                    ..
                }) => (class, parameters),
                Some(_) => {
                    graph.map.insert(id, Vec::new());
                    continue;
                }
                None => (id.clone(), Parameters::new()),
            };

            let dependencies =
                graph.class_dependencies(registry, &id, &class, &parameters, &bound, &mut queue);
            graph.map.insert(id, dependencies);
        }

        graph
    }

    fn class_dependencies(
        &mut self,
        registry: &Registry,
        id: &str,
        class: &str,
        overrides: &Parameters,
        bound: &HashSet<String>,
        queue: &mut VecDeque<(String, Option<Binding>)>,
    ) -> Vec<String> {
        let Some(info) = registry.introspector().inspect(class) else {
            self.issues.push(DependencyGraphError::UnknownClass {
                class: class.to_string(),
                required_by: id.to_string(),
            });
            return Vec::new();
        };

        if !info.is_instantiable() {
            self.issues.push(DependencyGraphError::NotInstantiable {
                class: class.to_string(),
                kind: info.kind(),
                required_by: id.to_string(),
            });
            return Vec::new();
        }

        let mut dependencies = Vec::new();
        for parameter in info.constructor().unwrap_or_default() {
            if overrides.contains(parameter.name()) {
                continue;
            }

            let mut resolved = false;
            for candidate in parameter.types().iter().filter(|ty| !ty.is_builtin()) {
                if candidate.is_registry() {
                    resolved = true;
                    break;
                }

                let name = candidate.name();
                let is_bound = bound.contains(name);
                if is_bound || registry.autowirable_class(name) {
                    if !is_bound {
                        queue.push_back((name.to_string(), None));
                    }
                    dependencies.push(name.to_string());
                    resolved = true;
                    break;
                }
            }

            if !resolved && parameter.default().is_none() {
                let dependency = match parameter.types() {
                    [] => "(untyped)".to_string(),
                    types => types
                        .iter()
                        .map(|ty| ty.name())
                        .collect::<Vec<_>>()
                        .join("|"),
                };

                self.issues.push(DependencyGraphError::MissingDependency {
                    parameter: parameter.name().to_string(),
                    dependency,
                    required_by: id.to_string(),
                });
            }
        }

        dependencies
    }

    /// Ids `id` depends on, None if `id` is not part of the graph
    pub fn dependencies(&self, id: &str) -> Option<&[String]> {
        self.map.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Validate the graph
    ///
    /// Returns a list of all issues
    pub fn check(&self) -> Result<(), DependencyGraphErrors> {
        let mut checked = HashSet::new();
        let mut errors = self.issues.clone();
        for id in self.map.keys() {
            let mut dependency_chain = Vec::new();
            check_recurse(self, &mut checked, &mut errors, &mut dependency_chain, id);
        }

        if !errors.is_empty() {
            return Err(DependencyGraphErrors { errors });
        }

        return Ok(());

        fn check_recurse<'a>(
            graph: &'a DependencyGraph,
            checked: &mut HashSet<&'a str>,
            errors: &mut Vec<DependencyGraphError>,
            dependency_chain: &mut Vec<&'a str>,
            id: &'a str,
        ) {
            // Circular Dependency Check
            if dependency_chain.contains(&id) {
                let mut chain: Vec<String> =
                    dependency_chain.iter().map(|id| id.to_string()).collect();
                chain.push(id.to_string()); // Add current so chain is complete

                errors.push(DependencyGraphError::CircularDependency {
                    from: chain[0].clone(),
                    to: id.to_string(),
                    chain,
                });
                return;
            }

            // Skip other checks if already checked
            if !checked.insert(id) {
                return;
            };

            let Some(dependencies) = graph.map.get(id) else {
                return;
            };

            dependency_chain.push(id);
            for dependency in dependencies {
                check_recurse(graph, checked, errors, dependency_chain, dependency);
            }
            dependency_chain.pop();
        }
    }
}

impl std::fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, dependencies) in &self.map {
            if dependencies.is_empty() {
                writeln!(f, "{id}")?;
            } else {
                writeln!(f, "{id} -> {}", dependencies.join(", "))?;
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone)]
pub enum DependencyGraphError {
    #[error("'{required_by}' is bound to class '{class}' but it is not known")]
    UnknownClass { class: String, required_by: String },
    #[error("'{required_by}' is bound to class '{class}' but it is {kind}")]
    NotInstantiable {
        class: String,
        kind: ClassKind,
        required_by: String,
    },
    #[error("'{required_by}' needs '{dependency}' for parameter '{parameter}' but it is missing")]
    MissingDependency {
        parameter: String,
        dependency: String,
        required_by: String,
    },
    #[error("A Circular Dependency exists between '{from}' and '{to}' through {chain:?}")]
    CircularDependency {
        from: String,
        to: String,
        chain: Vec<String>,
    },
}
impl std::fmt::Display for DependencyGraphErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push("The dependency graph had one or more errors:".to_string());
        for error in &self.errors {
            display.push(format!("- {}", error));
        }
        f.write_str(&display.join("\n"))
    }
}

#[derive(Error, Debug, Clone)]
pub struct DependencyGraphErrors {
    pub errors: Vec<DependencyGraphError>,
}
