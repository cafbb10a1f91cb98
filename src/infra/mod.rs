//! Infrastructure layer implementations.

pub mod dog_api;
pub mod observability;

pub use dog_api::{DEFAULT_BASE_URL, DogApiClient, DogApiConfig};
pub use observability::{LogFormat, PrometheusHandle, init_metrics_handle, init_tracing};
