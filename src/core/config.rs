use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::core::error::ConfigurationError;
use crate::core::options::{self, Configurable, OptionValue, Params, Setter};
use crate::core::ssl::TlsParameters;
use crate::core::worker_pool::WorkerPoolHandle;

pub const ADDITIONAL_PROPERTIES_PREFIX: &str = "additionalProperties.";

/// Security protocol used to talk to the brokers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecurityProtocol {
    #[default]
    Plaintext,
    Ssl,
    SaslPlaintext,
    SaslSsl,
}

impl fmt::Display for SecurityProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecurityProtocol::Plaintext => write!(f, "PLAINTEXT"),
            SecurityProtocol::Ssl => write!(f, "SSL"),
            SecurityProtocol::SaslPlaintext => write!(f, "SASL_PLAINTEXT"),
            SecurityProtocol::SaslSsl => write!(f, "SASL_SSL"),
        }
    }
}

impl FromStr for SecurityProtocol {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PLAINTEXT" => Ok(SecurityProtocol::Plaintext),
            "SSL" => Ok(SecurityProtocol::Ssl),
            "SASL_PLAINTEXT" => Ok(SecurityProtocol::SaslPlaintext),
            "SASL_SSL" => Ok(SecurityProtocol::SaslSsl),
            _ => Err(()),
        }
    }
}

/// Where a consumer starts when its group has no committed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetReset {
    Earliest,
    #[default]
    Latest,
    None,
}

impl fmt::Display for OffsetReset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetReset::Earliest => write!(f, "earliest"),
            OffsetReset::Latest => write!(f, "latest"),
            OffsetReset::None => write!(f, "none"),
        }
    }
}

impl FromStr for OffsetReset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "earliest" => Ok(OffsetReset::Earliest),
            "latest" => Ok(OffsetReset::Latest),
            "none" => Ok(OffsetReset::None),
            _ => Err(()),
        }
    }
}

/// Every option an endpoint can be tuned with.
///
/// A component may hold one of these as a template; each endpoint gets its own
/// copy. `tls_parameters` and `worker_pool` are shared resources and are
/// copied by reference, everything else by value.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    /// Set from the uri path. A `topic` option is accepted but the factory
    /// puts the path segment back.
    pub topic: String,

    /// `host1:port1,host2:port2`, known as `bootstrap.servers` on the broker side.
    pub brokers: Option<String>,

    pub client_id: Option<String>,
    pub group_id: Option<String>,
    pub security_protocol: SecurityProtocol,
    pub auto_offset_reset: OffsetReset,

    /// Number of consumers reading from the topic. At least 1.
    pub consumers_count: u32,

    pub request_timeout: Duration,

    pub tls_parameters: Option<Arc<TlsParameters>>,
    pub worker_pool: Option<WorkerPoolHandle>,

    /// Options passed through to the client untouched, in insertion order.
    pub additional_properties: Vec<(String, String)>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            topic: String::new(),
            brokers: None,
            client_id: None,
            group_id: None,
            security_protocol: SecurityProtocol::default(),
            auto_offset_reset: OffsetReset::default(),
            consumers_count: 1,
            request_timeout: Duration::from_millis(30_000),
            tls_parameters: None,
            worker_pool: None,
            additional_properties: Vec::new(),
        }
    }
}

impl EndpointConfig {
    /// Independent copy: scalars by value, shared resources by reference.
    pub fn copy(&self) -> EndpointConfig {
        self.clone()
    }

    /// Returns a copy of `self` with `params` applied. Every name in `params`
    /// must be a configuration option.
    pub fn apply(&self, params: &Params) -> Result<EndpointConfig, ConfigurationError> {
        let mut next = self.copy();
        options::bind_all(&mut next, params)?;
        Ok(next)
    }

    pub fn broker_list(&self) -> Vec<&str> {
        self.brokers
            .as_deref()
            .map(|b| b.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn additional_property(&self, name: &str) -> Option<&str> {
        self.additional_properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_additional_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.additional_properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.additional_properties.push((name, value)),
        }
    }
}

fn set_topic(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.topic = v.to_text(name)?;
    Ok(())
}

fn set_brokers(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.brokers = Some(v.to_text(name)?);
    Ok(())
}

fn set_client_id(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.client_id = Some(v.to_text(name)?);
    Ok(())
}

fn set_group_id(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.group_id = Some(v.to_text(name)?);
    Ok(())
}

fn set_security_protocol(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    let raw = v.to_text(name)?;
    c.security_protocol = raw
        .parse()
        .map_err(|_| ConfigurationError::invalid(name, "PLAINTEXT, SSL, SASL_PLAINTEXT or SASL_SSL", v))?;
    Ok(())
}

fn set_auto_offset_reset(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    let raw = v.to_text(name)?;
    c.auto_offset_reset = raw
        .parse()
        .map_err(|_| ConfigurationError::invalid(name, "earliest, latest or none", v))?;
    Ok(())
}

fn set_consumers_count(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    let count = v.to_u32(name)?;
    if count == 0 {
        return Err(ConfigurationError::invalid(name, "at least 1", v));
    }
    c.consumers_count = count;
    Ok(())
}

fn set_request_timeout(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.request_timeout = Duration::from_millis(v.to_u64(name)?);
    Ok(())
}

fn set_tls_parameters(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.tls_parameters = Some(v.to_tls(name)?);
    Ok(())
}

fn set_worker_pool(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    c.worker_pool = Some(v.to_worker_pool(name)?);
    Ok(())
}

fn set_additional(c: &mut EndpointConfig, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    let key = &name[ADDITIONAL_PROPERTIES_PREFIX.len()..];
    c.set_additional_property(key, v.to_text(name)?);
    Ok(())
}

const CONFIG_OPTIONS: &[(&str, Setter<EndpointConfig>)] = &[
    ("topic", set_topic),
    ("brokers", set_brokers),
    ("clientId", set_client_id),
    ("groupId", set_group_id),
    ("securityProtocol", set_security_protocol),
    ("autoOffsetReset", set_auto_offset_reset),
    ("consumersCount", set_consumers_count),
    ("requestTimeoutMs", set_request_timeout),
    ("sslContextParameters", set_tls_parameters),
    ("workerPool", set_worker_pool),
];

const CONFIG_PREFIXED_OPTIONS: &[(&str, Setter<EndpointConfig>)] =
    &[(ADDITIONAL_PROPERTIES_PREFIX, set_additional)];

impl Configurable for EndpointConfig {
    fn options() -> &'static [(&'static str, Setter<Self>)] {
        CONFIG_OPTIONS
    }

    fn prefixed_options() -> &'static [(&'static str, Setter<Self>)] {
        CONFIG_PREFIXED_OPTIONS
    }
}
