use std::path::PathBuf;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

/// Transport security settings for the connection to the brokers.
/// Shared as `Arc<TlsParameters>` and never mutated once attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsParameters {
    pub protocol: String,

    pub keystore_location: Option<PathBuf>,
    pub keystore_password: Option<String>,

    pub truststore_location: Option<PathBuf>,
    pub truststore_password: Option<String>,

    /// PEM material, used instead of key/trust stores.
    pub key_location: Option<PathBuf>,
    pub cert_location: Option<PathBuf>,
    pub ca_location: Option<PathBuf>,

    /// `https` verifies the broker host name, empty disables the check.
    pub endpoint_identification_algorithm: String,
}

impl Default for TlsParameters {
    fn default() -> Self {
        Self {
            protocol: "TLSv1.3".to_string(),
            keystore_location: None,
            keystore_password: None,
            truststore_location: None,
            truststore_password: None,
            key_location: None,
            cert_location: None,
            ca_location: None,
            endpoint_identification_algorithm: "https".to_string(),
        }
    }
}

/// Process-wide TLS context an embedding application may expose to every
/// component that opts in.
pub trait GlobalTlsSource: Send + Sync {
    fn global_tls(&self) -> Option<Arc<TlsParameters>>;
}

/// No global context available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGlobalTls;

impl GlobalTlsSource for NoGlobalTls {
    fn global_tls(&self) -> Option<Arc<TlsParameters>> {
        None
    }
}

/// A fixed global context, typically loaded once at startup.
#[derive(Debug, Default, Clone)]
pub struct StaticGlobalTls(pub Option<Arc<TlsParameters>>);

impl GlobalTlsSource for StaticGlobalTls {
    fn global_tls(&self) -> Option<Arc<TlsParameters>> {
        self.0.clone()
    }
}

impl<F> GlobalTlsSource for F
where
    F: Fn() -> Option<Arc<TlsParameters>> + Send + Sync,
{
    fn global_tls(&self) -> Option<Arc<TlsParameters>> {
        self()
    }
}

/// Effective TLS settings for an endpoint.
///
/// Local settings always win. The global lookup is consulted only when the
/// component opted in, and only when nothing was set locally.
pub fn resolve<F>(
    local: Option<Arc<TlsParameters>>,
    global_enabled: bool,
    lookup: F,
) -> Option<Arc<TlsParameters>>
where
    F: FnOnce() -> Option<Arc<TlsParameters>>,
{
    match local {
        Some(tls) => Some(tls),
        None if global_enabled => lookup(),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn tls(protocol: &str) -> Arc<TlsParameters> {
        Arc::new(TlsParameters {
            protocol: protocol.to_string(),
            ..TlsParameters::default()
        })
    }

    #[test]
    fn test_local_wins_over_enabled_global() {
        let local = tls("TLSv1.2");
        let global = tls("TLSv1.3");

        let resolved = resolve(Some(local.clone()), true, || Some(global.clone()));

        assert!(Arc::ptr_eq(&resolved.unwrap(), &local));
    }

    #[test]
    fn test_global_used_when_local_unset_and_enabled() {
        let global = tls("TLSv1.3");
        let resolved = resolve(None, true, || Some(global.clone()));

        assert!(Arc::ptr_eq(&resolved.unwrap(), &global));
    }

    #[test]
    fn test_enabled_without_global_stays_plaintext() {
        assert!(resolve(None, true, || None).is_none());
    }

    #[test]
    fn test_disabled_never_consults_global() {
        let calls = Cell::new(0);
        let resolved = resolve(None, false, || {
            calls.set(calls.get() + 1);
            Some(tls("TLSv1.3"))
        });

        assert!(resolved.is_none());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_closure_and_static_sources() {
        let global = tls("TLSv1.3");
        let from_closure = {
            let global = global.clone();
            move || Some(global.clone())
        };
        let from_static = StaticGlobalTls(Some(global.clone()));

        assert_eq!(from_closure.global_tls(), Some(global.clone()));
        assert_eq!(from_static.global_tls(), Some(global));
        assert_eq!(NoGlobalTls.global_tls(), None);
    }

    #[test]
    fn test_tls_parameters_from_toml() {
        let parsed: TlsParameters = toml::from_str(
            r#"
            truststore_location = "/etc/flyq/truststore.jks"
            endpoint_identification_algorithm = ""
            "#,
        )
        .expect("parse failed");

        assert_eq!(parsed.protocol, "TLSv1.3");
        assert_eq!(
            parsed.truststore_location,
            Some(PathBuf::from("/etc/flyq/truststore.jks"))
        );
        assert!(parsed.endpoint_identification_algorithm.is_empty());
    }
}
