pub mod address;
pub mod errors;

// Public re-exports for easy access
pub use address::EndpointAddress;
pub use errors::UriError;
