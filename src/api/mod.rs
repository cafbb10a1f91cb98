//! The API layer, containing web handlers and routing.

pub mod handlers;
pub mod response;
pub mod router;

pub use response::{ApiResponse, PageMeta, ResponseStatus};
pub use router::create_router;
