use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::component::{Component, DEFAULT_SCHEME};
use crate::core::config::EndpointConfig;
use crate::core::options::Params;
use crate::core::ssl::{GlobalTlsSource, TlsParameters};
use crate::core::ConfigurationError;

/// Component-level defaults loaded from TOML.
///
/// ```toml
/// brokers = "a:9092,b:9092"
/// use_global_ssl_context_parameters = true
///
/// [defaults]
/// clientId = "billing"
/// "additionalProperties.linger.ms" = "5"
///
/// [global_tls]
/// truststore_location = "/etc/flyq/truststore.jks"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSettings {
    pub scheme: String,

    /// Shorthand for `defaults.brokers`; wins when both are set.
    pub brokers: Option<String>,

    pub use_global_ssl_context_parameters: bool,

    /// Endpoint options every endpoint inherits, by option name.
    pub defaults: BTreeMap<String, String>,

    /// Process-wide TLS context offered to components that opt in.
    pub global_tls: Option<TlsParameters>,
}

impl Default for ComponentSettings {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            brokers: None,
            use_global_ssl_context_parameters: false,
            defaults: BTreeMap::new(),
            global_tls: None,
        }
    }
}

impl ComponentSettings {
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::read_from_file(p), // propagate errors unchanged
            None => Ok(Self::default()),
        }
    }

    fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {:?}", path.as_ref()))?;
        let settings: ComponentSettings = toml::from_str(&raw)
            .with_context(|| "parsing component settings TOML")?;
        Ok(settings)
    }

    /// Template configuration, or `None` when nothing is set at component level.
    pub fn template(&self) -> Result<Option<EndpointConfig>, ConfigurationError> {
        if self.brokers.is_none() && self.defaults.is_empty() {
            return Ok(None);
        }

        let params: Params = self
            .defaults
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let mut template = EndpointConfig::default().apply(&params)?;
        if let Some(brokers) = &self.brokers {
            template.brokers = Some(brokers.clone());
        }
        Ok(Some(template))
    }

    pub fn build_component(
        &self,
        global_tls: impl GlobalTlsSource + 'static,
    ) -> Result<Component, ConfigurationError> {
        let mut component = Component::new(global_tls).with_scheme(&self.scheme);
        if let Some(template) = self.template()? {
            component.set_configuration(template);
        }
        component.set_use_global_ssl_context_parameters(self.use_global_ssl_context_parameters);
        Ok(component)
    }
}
