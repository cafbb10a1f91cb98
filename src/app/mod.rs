//! Application layer containing use cases and shared state.

pub mod service;
pub mod state;

pub use service::DogService;
pub use state::AppState;
