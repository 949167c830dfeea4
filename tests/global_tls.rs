use std::sync::Arc;
use flyq_endpoint::{install_global_tls, Component, ProcessGlobalTls, TlsParameters, GLOBAL_TLS};

// Only test in this binary touching GLOBAL_TLS: it can be set once per process.
#[test]
fn test_process_global_tls_is_installed_once_and_shared() {
    let mut component = Component::new(ProcessGlobalTls);
    component.set_use_global_ssl_context_parameters(true);

    let before = component.resolve_endpoint("flyq:t").unwrap();
    assert!(!before.is_tls());

    let first = TlsParameters {
        protocol: "TLSv1.2".to_string(),
        ..TlsParameters::default()
    };
    assert!(install_global_tls(first));
    assert!(!install_global_tls(TlsParameters::default()));

    let after = component.resolve_endpoint("flyq:t").unwrap();
    let attached = after.configuration().tls_parameters.as_ref().unwrap();
    assert_eq!(attached.protocol, "TLSv1.2");
    assert!(Arc::ptr_eq(attached, GLOBAL_TLS.get().unwrap()));
}
