//! Domain layer containing core types, the pagination engine, traits, and error definitions.

pub mod error;
pub mod pagination;
pub mod search;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, UpstreamError, ValidationError};
pub use pagination::{
    PaginatedResponse, PaginationParams, SearchParams, SortOrder, paginate, paginate_local,
};
pub use search::{Searchable, filter_items};
pub use traits::DogRepository;
pub use types::{Breed, EntityId, Fact, Group, LifeSpan, ResourceRef, ResourceType, WeightRange};
