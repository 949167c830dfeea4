pub mod core;
mod settings;

use std::sync::{Arc, OnceLock};

pub use crate::core::component::{Component, DEFAULT_SCHEME};
pub use crate::core::config::{EndpointConfig, OffsetReset, SecurityProtocol};
pub use crate::core::endpoint::Endpoint;
pub use crate::core::options::{OptionValue, Params};
pub use crate::core::ssl::{GlobalTlsSource, NoGlobalTls, StaticGlobalTls, TlsParameters};
pub use crate::core::worker_pool::WorkerPoolHandle;
pub use crate::core::ConfigurationError;
pub use settings::ComponentSettings;

/// Process-wide TLS context. Filled **once** at startup; read-only afterwards.
pub static GLOBAL_TLS: OnceLock<Arc<TlsParameters>> = OnceLock::new();

/// Returns `false` when a global context was already installed.
pub fn install_global_tls(tls: TlsParameters) -> bool {
    GLOBAL_TLS.set(Arc::new(tls)).is_ok()
}

/// [`GlobalTlsSource`] backed by [`GLOBAL_TLS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessGlobalTls;

impl GlobalTlsSource for ProcessGlobalTls {
    fn global_tls(&self) -> Option<Arc<TlsParameters>> {
        GLOBAL_TLS.get().cloned()
    }
}
