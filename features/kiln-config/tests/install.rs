use std::{any::type_name, sync::Arc};

use kiln_config::{config::Config, errors::ConfigError, provider::ConfigProvider};
use kiln_di::{
    ClassInfo, Component, ContainerError, DynError, ParameterSpec, Parameters, Registry, TypeRef,
};

#[derive(Debug, Clone, PartialEq)]
struct DatabaseConfig {
    driver: String,
}

#[derive(Debug, Clone, PartialEq)]
struct MailConfig {
    host: String,
}

struct Database {
    config: Arc<DatabaseConfig>,
}

#[test]
fn duplicate_configs_are_rejected() {
    let mut provider = ConfigProvider::new();
    provider
        .add_config(DatabaseConfig {
            driver: "sqlite".into(),
        })
        .unwrap();

    let error = provider
        .add_config(DatabaseConfig {
            driver: "mysql".into(),
        })
        .unwrap_err();

    assert!(matches!(error, ConfigError::AlreadyRegistered(info) if info.type_name.ends_with("DatabaseConfig")));
    assert_eq!(provider.get_config::<DatabaseConfig>().unwrap().driver, "sqlite");
}

#[test]
fn maybe_add_skips_none() {
    let mut provider = ConfigProvider::new();
    provider
        .maybe_add_config::<MailConfig>(None)
        .unwrap()
        .maybe_add_config(Some(DatabaseConfig {
            driver: "sqlite".into(),
        }))
        .unwrap();

    assert_eq!(provider.len(), 1);
    assert!(provider.get_config::<MailConfig>().is_none());
    assert!(matches!(
        provider.require_config::<MailConfig>(),
        Err(ConfigError::Missing(_))
    ));
}

#[test]
fn installed_configs_resolve_and_autowire() {
    let mut provider = ConfigProvider::new();
    provider
        .add_config(DatabaseConfig {
            driver: "sqlite".into(),
        })
        .unwrap();

    let registry = Registry::builder()
        .define(
            ClassInfo::new("Database", |arguments: Parameters| {
                Ok::<_, DynError>(Database {
                    config: arguments.value("config")?,
                })
            })
            .parameter(ParameterSpec::new("config").typed(TypeRef::of::<DatabaseConfig>())),
        )
        .bind("db", Component::class("Database"))
        .build();

    assert_eq!(provider.install(&registry), 1);

    let config = registry.resolve::<Config<DatabaseConfig>>().unwrap();
    let db = registry.get_as::<Database>("db").unwrap();

    assert_eq!(config.driver, "sqlite");
    assert!(Arc::ptr_eq(&db.config, &config.into_inner()));
}

#[test]
fn install_keeps_existing_bindings() {
    let registry = Registry::new();
    registry.set(
        type_name::<MailConfig>(),
        Component::value(MailConfig {
            host: "mail.internal".into(),
        }),
    );

    let mut provider = ConfigProvider::new();
    provider
        .add_config(MailConfig {
            host: "localhost".into(),
        })
        .unwrap();

    assert_eq!(provider.install(&registry), 0);
    assert_eq!(
        registry.resolve::<Config<MailConfig>>().unwrap().host,
        "mail.internal"
    );
}

#[test]
fn missing_config_is_not_found() {
    let registry = Registry::new();

    assert!(matches!(
        registry.resolve::<Config<MailConfig>>(),
        Err(ContainerError::NotFound(_))
    ));
    assert!(registry
        .resolve::<Option<Config<MailConfig>>>()
        .unwrap()
        .is_none());
}
