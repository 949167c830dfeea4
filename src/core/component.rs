use std::fmt;
use std::sync::Arc;
use flyq_uri::EndpointAddress;
use tracing::{debug, info, warn};

use crate::core::config::EndpointConfig;
use crate::core::endpoint::Endpoint;
use crate::core::error::ConfigurationError;
use crate::core::options::{self, Params};
use crate::core::ssl::{self, GlobalTlsSource, NoGlobalTls};
use crate::core::worker_pool::WorkerPoolHandle;

pub const DEFAULT_SCHEME: &str = "flyq";

/// Creates endpoints from `scheme:topic?options` addresses.
///
/// Holds the component-level defaults every endpoint starts from: an optional
/// template configuration, an optional shared worker pool and whether the
/// process-wide TLS context may be used. Setters take `&mut self`, so a
/// component is fully configured before it is shared for endpoint creation.
pub struct Component {
    scheme: String,
    configuration: Option<EndpointConfig>,
    worker_pool: Option<WorkerPoolHandle>,
    use_global_ssl_context_parameters: bool,
    global_tls: Arc<dyn GlobalTlsSource>,
}

impl Default for Component {
    fn default() -> Self {
        Self::new(NoGlobalTls)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("scheme", &self.scheme)
            .field("configuration", &self.configuration)
            .field("worker_pool", &self.worker_pool)
            .field(
                "use_global_ssl_context_parameters",
                &self.use_global_ssl_context_parameters,
            )
            .finish_non_exhaustive()
    }
}

impl Component {
    /// `global_tls` is only consulted once
    /// [`set_use_global_ssl_context_parameters`](Self::set_use_global_ssl_context_parameters)
    /// is enabled.
    pub fn new(global_tls: impl GlobalTlsSource + 'static) -> Self {
        Component {
            scheme: DEFAULT_SCHEME.to_string(),
            configuration: None,
            worker_pool: None,
            use_global_ssl_context_parameters: false,
            global_tls: Arc::new(global_tls),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn configuration(&self) -> Option<&EndpointConfig> {
        self.configuration.as_ref()
    }

    /// Common options the endpoints will reuse. Each endpoint gets a copy.
    pub fn set_configuration(&mut self, configuration: EndpointConfig) {
        self.configuration = Some(configuration);
    }

    pub fn brokers(&self) -> Option<&str> {
        self.configuration.as_ref().and_then(|c| c.brokers.as_deref())
    }

    /// Broker list inherited by every endpoint, `host1:port1,host2:port2`.
    /// Creates an empty template when none was set.
    pub fn set_brokers(&mut self, brokers: impl Into<String>) {
        self.configuration
            .get_or_insert_with(EndpointConfig::default)
            .brokers = Some(brokers.into());
    }

    pub fn worker_pool(&self) -> Option<&WorkerPoolHandle> {
        self.worker_pool.as_ref()
    }

    /// Shared pool for continuing after the broker acknowledged an async send.
    /// The caller owns the pool and must shut it down when no longer needed.
    pub fn set_worker_pool(&mut self, worker_pool: WorkerPoolHandle) {
        self.worker_pool = Some(worker_pool);
    }

    pub fn use_global_ssl_context_parameters(&self) -> bool {
        self.use_global_ssl_context_parameters
    }

    pub fn set_use_global_ssl_context_parameters(&mut self, enabled: bool) {
        self.use_global_ssl_context_parameters = enabled;
    }

    /// Builds an endpoint for `topic` with `params` applied on top of the
    /// component defaults.
    ///
    /// Params are bound onto the endpoint's configuration first and onto the
    /// endpoint second, so an option both understand ends up with the
    /// endpoint-level value. A name neither understands fails the call. The
    /// topic always comes from `topic`, even when `params` carries one.
    pub fn create_endpoint(
        &self,
        uri: &str,
        topic: &str,
        params: &Params,
    ) -> Result<Endpoint, ConfigurationError> {
        if topic.is_empty() {
            return Err(ConfigurationError::MissingTopic);
        }
        let mut configuration = match &self.configuration {
            Some(template) => template.copy(),
            None => EndpointConfig::default(),
        };
        configuration.topic = topic.to_string();
        configuration.worker_pool = self.worker_pool.clone();

        let mut endpoint = Endpoint::new(uri, configuration);

        // brokers can be set on either component or endpoint level
        options::bind_layered(&mut endpoint, params)?;

        // the uri path names the topic, a `topic` option does not move it
        if endpoint.configuration().topic != topic {
            warn!(
                topic,
                ignored = %endpoint.configuration().topic,
                "topic option ignored in favour of uri path"
            );
            endpoint.configuration_mut().topic = topic.to_string();
        }

        if endpoint.configuration().tls_parameters.is_none() {
            let resolved = ssl::resolve(None, self.use_global_ssl_context_parameters, || {
                self.global_tls.global_tls()
            });
            if resolved.is_some() {
                info!(topic, "using global ssl context parameters");
            }
            endpoint.configuration_mut().tls_parameters = resolved;
        }

        if endpoint.configuration().brokers.is_none() {
            warn!(topic, "endpoint created without brokers");
        }
        debug!(
            uri,
            topic,
            brokers = ?endpoint.configuration().brokers,
            tls = endpoint.is_tls(),
            worker_pool = endpoint.worker_pool().is_some(),
            "endpoint created"
        );

        Ok(endpoint)
    }

    /// Parses `uri` and creates the endpoint it names. Query options are
    /// passed as text; a repeated key keeps its last value.
    pub fn resolve_endpoint(&self, uri: &str) -> Result<Endpoint, ConfigurationError> {
        let address = EndpointAddress::parse(uri)?;
        if address.scheme() != self.scheme {
            return Err(ConfigurationError::SchemeMismatch {
                expected: self.scheme.clone(),
                found: address.scheme().to_string(),
            });
        }

        let topic = address.topic().to_string();
        let params: Params = address.into_query_pairs().into_iter().collect();
        self.create_endpoint(uri, &topic, &params)
    }
}
