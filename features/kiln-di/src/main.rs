use std::{error::Error, sync::Arc};

use kiln_di::{
    Component, Constructible, DynError, ParameterSpec, Parameters, Registry, TypeRef,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = Registry::builder()
        .add_instance(Config {
            driver: "sqlite".to_string(),
        })
        .add_class::<Database>()
        .bind("db", Component::class(Database::class_name()))
        .build_checked()?;

    println!("{:?}", registry);
    print!("{}", registry.graph());

    let db = registry.get_as::<Database>("db")?;
    println!(
        "{:?} - driver '{}', {} bindings at construction",
        db, db.config.driver, db.registry_ids
    );

    let report = registry.cache(
        "report",
        |parameters| Ok::<_, DynError>(parameters.join(",")),
        &["users", "posts"],
    )?;
    println!("{}", report);

    Ok(())
}

#[derive(Debug)]
struct Config {
    driver: String,
}

#[derive(Debug)]
struct Database {
    config: Arc<Config>,
    registry_ids: usize,
}
impl Constructible for Database {
    fn class_name() -> &'static str {
        "Database"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::new("config").typed(TypeRef::of::<Config>()),
            ParameterSpec::new("registry").typed(TypeRef::registry()),
        ]
    }

    fn construct(arguments: Parameters) -> Result<Self, DynError> {
        let registry = arguments.value::<Registry>("registry")?;
        Ok(Database {
            config: arguments.value("config")?,
            registry_ids: registry.list().len(),
        })
    }
}
