//! Dog Data Facade
//!
//! A small REST service that republishes a third-party dog-data API (breeds,
//! breed groups, dog facts) behind a stable, paginated and searchable contract.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │   Routes, query clamping, response envelope  │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │           DogService, shared state           │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │  Records, pagination, search, DogRepository  │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │   Dog API adapter, logging, Prometheus       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The upstream API is reached only through the [`domain::DogRepository`]
//! port, so handlers and services are tested against in-memory mocks and
//! the HTTP adapter against a mock upstream server.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dog_data_facade::api::create_router;
//! use dog_data_facade::app::AppState;
//! use dog_data_facade::infra::DogApiClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(DogApiClient::with_defaults());
//!     let state = Arc::new(AppState::new(client));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, create_router(state, "http://localhost:3000")).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
