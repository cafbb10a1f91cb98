//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::AppError;
use super::pagination::{PaginatedResponse, PaginationParams, SearchParams};
use super::types::{Breed, Fact, Group};

/// Output port over the upstream dog-data source.
///
/// Single-item lookups return `Ok(None)` when the resource does not exist;
/// `Err` is reserved for validation and upstream failures.
#[async_trait]
pub trait DogRepository: Send + Sync {
    /// List breeds with pagination and optional free-text search
    async fn list_breeds(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Breed>, AppError>;

    /// Get a single breed by ID
    async fn get_breed_by_id(&self, breed_id: &str) -> Result<Option<Breed>, AppError>;

    /// List dog facts with pagination and optional free-text search
    async fn list_facts(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Fact>, AppError>;

    /// List breed groups with pagination and optional free-text search
    async fn list_groups(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Group>, AppError>;

    /// Get a single group by ID
    async fn get_group_by_id(&self, group_id: &str) -> Result<Option<Group>, AppError>;

    /// Get a group together with its full breed membership
    async fn get_group_details(&self, group_id: &str) -> Result<Option<Group>, AppError>;

    /// Get a breed only if it is a member of the given group
    async fn get_breed_in_group(
        &self,
        group_id: &str,
        breed_id: &str,
    ) -> Result<Option<Breed>, AppError>;
}
