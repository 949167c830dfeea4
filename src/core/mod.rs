pub mod component;
pub mod config;
pub mod endpoint;
mod error;
pub mod options;
pub mod ssl;
pub mod worker_pool;

pub use error::ConfigurationError;
