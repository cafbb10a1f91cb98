//! Adapter for the public dog API.

mod client;
mod wire;

pub use client::{DEFAULT_BASE_URL, DogApiClient, DogApiConfig, build_query};
