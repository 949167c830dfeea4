mod common;

use flyq_endpoint::{ComponentSettings, ConfigurationError, NoGlobalTls, StaticGlobalTls};
use std::sync::Arc;

use crate::common::settings_file;

#[test]
fn test_missing_path_yields_defaults() {
    let settings = ComponentSettings::load_or_default(None::<&str>).expect("load failed");

    assert_eq!(settings.scheme, "flyq");
    assert!(settings.brokers.is_none());
    assert!(!settings.use_global_ssl_context_parameters);
    assert!(settings.template().unwrap().is_none());
}

#[test]
fn test_settings_file_drives_component_defaults() {
    let file = settings_file(
        r#"
        brokers = "a:9092,b:9092"
        use_global_ssl_context_parameters = true

        [defaults]
        clientId = "billing"
        consumersCount = "2"
        "additionalProperties.linger.ms" = "5"

        [global_tls]
        truststore_location = "/etc/flyq/truststore.jks"
        "#,
    );

    let settings = ComponentSettings::load_or_default(Some(file.path())).expect("load failed");
    let global = settings.global_tls.clone().map(Arc::new);
    let component = settings
        .build_component(StaticGlobalTls(global))
        .expect("build failed");

    assert_eq!(component.brokers(), Some("a:9092,b:9092"));
    assert!(component.use_global_ssl_context_parameters());

    let endpoint = component.resolve_endpoint("flyq:invoices?clientId=override").unwrap();
    let cfg = endpoint.configuration();
    assert_eq!(cfg.broker_list(), vec!["a:9092", "b:9092"]);
    assert_eq!(cfg.client_id.as_deref(), Some("override"));
    assert_eq!(cfg.consumers_count, 2);
    assert_eq!(cfg.additional_property("linger.ms"), Some("5"));
    assert!(endpoint.is_tls());
}

#[test]
fn test_brokers_shorthand_wins_over_defaults() {
    let file = settings_file(
        r#"
        brokers = "short:9092"

        [defaults]
        brokers = "long:9092"
        "#,
    );

    let settings = ComponentSettings::load_or_default(Some(file.path())).unwrap();
    let template = settings.template().unwrap().expect("template expected");

    assert_eq!(template.brokers.as_deref(), Some("short:9092"));
}

#[test]
fn test_unknown_default_option_is_rejected() {
    let file = settings_file(
        r#"
        [defaults]
        bootstrapServers = "a:9092"
        "#,
    );

    let settings = ComponentSettings::load_or_default(Some(file.path())).unwrap();
    let err = settings.build_component(NoGlobalTls).unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::UnknownOption {
            option: "bootstrapServers".to_string()
        }
    );
}

#[test]
fn test_malformed_file_reports_context() {
    let file = settings_file("brokers = [");

    let err = ComponentSettings::load_or_default(Some(file.path())).unwrap_err();

    assert!(format!("{:#}", err).contains("parsing component settings TOML"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = ComponentSettings::load_or_default(Some("/nonexistent/flyq.toml")).unwrap_err();

    assert!(err.to_string().contains("/nonexistent/flyq.toml"));
}
