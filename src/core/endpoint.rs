use std::future::Future;
use tokio::task::JoinHandle;

use crate::core::config::EndpointConfig;
use crate::core::error::ConfigurationError;
use crate::core::options::{Configurable, Layered, OptionValue, Setter};
use crate::core::worker_pool::WorkerPoolHandle;

/// A fully configured address on a topic, produced by
/// [`Component::create_endpoint`](crate::core::component::Component::create_endpoint).
///
/// Owns its configuration exclusively. The worker pool is only borrowed.
#[derive(Debug)]
pub struct Endpoint {
    uri: String,
    configuration: EndpointConfig,
    // endpoint-level override of configuration.worker_pool
    worker_pool: Option<WorkerPoolHandle>,
    synchronous: bool,
    bridge_endpoint: bool,
}

impl Endpoint {
    pub(crate) fn new(uri: impl Into<String>, configuration: EndpointConfig) -> Self {
        Endpoint {
            uri: uri.into(),
            configuration,
            worker_pool: None,
            synchronous: false,
            bridge_endpoint: false,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn topic(&self) -> &str {
        &self.configuration.topic
    }

    pub fn configuration(&self) -> &EndpointConfig {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut EndpointConfig {
        &mut self.configuration
    }

    /// Pool used for continuations. An endpoint-level binding wins over the
    /// one carried by the configuration.
    pub fn worker_pool(&self) -> Option<&WorkerPoolHandle> {
        self.worker_pool
            .as_ref()
            .or(self.configuration.worker_pool.as_ref())
    }

    pub fn is_synchronous(&self) -> bool {
        self.synchronous
    }

    /// When set, a topic header on an outgoing message is ignored and the
    /// endpoint's own topic is used.
    pub fn is_bridge_endpoint(&self) -> bool {
        self.bridge_endpoint
    }

    pub fn is_tls(&self) -> bool {
        self.configuration.tls_parameters.is_some()
    }

    /// Hands post-acknowledgement work to the worker pool.
    ///
    /// Returns `None` when the endpoint is synchronous or has no pool, in
    /// which case the caller continues inline.
    pub fn spawn_continuation<F>(&self, task: F) -> Option<JoinHandle<F::Output>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if self.synchronous {
            return None;
        }
        self.worker_pool().map(|pool| pool.spawn(task))
    }
}

fn set_worker_pool(e: &mut Endpoint, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    e.worker_pool = Some(v.to_worker_pool(name)?);
    Ok(())
}

fn set_synchronous(e: &mut Endpoint, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    e.synchronous = v.to_bool(name)?;
    Ok(())
}

fn set_bridge_endpoint(e: &mut Endpoint, name: &str, v: &OptionValue) -> Result<(), ConfigurationError> {
    e.bridge_endpoint = v.to_bool(name)?;
    Ok(())
}

const ENDPOINT_OPTIONS: &[(&str, Setter<Endpoint>)] = &[
    ("workerPool", set_worker_pool),
    ("synchronous", set_synchronous),
    ("bridgeEndpoint", set_bridge_endpoint),
];

impl Configurable for Endpoint {
    fn options() -> &'static [(&'static str, Setter<Self>)] {
        ENDPOINT_OPTIONS
    }
}

impl Layered for Endpoint {
    type Inner = EndpointConfig;

    fn inner_mut(&mut self) -> &mut EndpointConfig {
        &mut self.configuration
    }
}
