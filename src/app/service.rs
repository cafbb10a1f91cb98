//! Application service layer.
//!
//! Use cases over the [`DogRepository`] port. Listings and lookups are
//! delegated unchanged; absence stays `None` here and is turned into a
//! client-facing not-found by the HTTP layer.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::{
    AppError, Breed, DogRepository, Fact, Group, PaginatedResponse, PaginationParams,
    SearchParams,
};

/// Application service for dog data queries.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(DogApiClient::with_defaults());
/// let service = DogService::new(client);
///
/// let page = service.list_breeds(&PaginationParams::new(1, 5), None).await?;
/// ```
pub struct DogService {
    repository: Arc<dyn DogRepository>,
}

impl DogService {
    #[must_use]
    pub fn new(repository: Arc<dyn DogRepository>) -> Self {
        Self { repository }
    }

    /// Lists breeds, optionally filtered by free-text search.
    #[instrument(skip(self, search), fields(page = pagination.page, page_size = pagination.page_size))]
    pub async fn list_breeds(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Breed>, AppError> {
        let page = self
            .repository
            .list_breeds(pagination, search)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to list breeds"))?;
        debug!(total = page.total, returned = page.items.len(), "Listed breeds");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get_breed(&self, breed_id: &str) -> Result<Option<Breed>, AppError> {
        self.repository.get_breed_by_id(breed_id).await
    }

    /// Lists dog facts, optionally filtered by free-text search.
    #[instrument(skip(self, search), fields(page = pagination.page, page_size = pagination.page_size))]
    pub async fn list_facts(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Fact>, AppError> {
        let page = self
            .repository
            .list_facts(pagination, search)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to list facts"))?;
        debug!(total = page.total, returned = page.items.len(), "Listed facts");
        Ok(page)
    }

    /// Lists breed groups, optionally filtered by free-text search.
    #[instrument(skip(self, search), fields(page = pagination.page, page_size = pagination.page_size))]
    pub async fn list_groups(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Group>, AppError> {
        let page = self
            .repository
            .list_groups(pagination, search)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to list groups"))?;
        debug!(total = page.total, returned = page.items.len(), "Listed groups");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.repository.get_group_by_id(group_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_group_details(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.repository.get_group_details(group_id).await
    }

    /// Gets a breed only when the group lists it as a member.
    #[instrument(skip(self))]
    pub async fn get_breed_in_group(
        &self,
        group_id: &str,
        breed_id: &str,
    ) -> Result<Option<Breed>, AppError> {
        self.repository.get_breed_in_group(group_id, breed_id).await
    }
}
