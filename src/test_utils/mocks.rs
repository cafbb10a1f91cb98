//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate various scenarios including
//! success, failure, and edge cases.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::{
    AppError, Breed, DogRepository, Fact, Group, PaginatedResponse, PaginationParams,
    SearchParams, Searchable, UpstreamError, filter_items, paginate_local,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
    /// Simulated latency in milliseconds.
    pub latency_ms: Option<u64>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
            latency_ms: None,
        }
    }

    /// Adds simulated latency.
    #[must_use]
    pub fn with_latency(mut self, ms: u64) -> Self {
        self.latency_ms = Some(ms);
        self
    }
}

/// In-memory dog repository for testing.
///
/// Listings are windowed locally with the same search semantics as the
/// HTTP adapter's fallback path; failures surface as connection errors.
///
/// # Example
///
/// ```ignore
/// use dog_data_facade::domain::{Breed, Group};
/// use dog_data_facade::test_utils::{MockConfig, MockDogRepository};
///
/// let mock = MockDogRepository::new()
///     .with_breeds(vec![Breed::new("b1", "Akita")])
///     .with_groups(vec![Group::new("g1", "Working Group").with_breeds(["b1"])]);
///
/// let failing = MockDogRepository::with_config(MockConfig::failure("upstream down"));
/// ```
pub struct MockDogRepository {
    breeds: Mutex<Vec<Breed>>,
    groups: Mutex<Vec<Group>>,
    facts: Mutex<Vec<Fact>>,
    config: MockConfig,
    call_count: AtomicU64,
}

impl MockDogRepository {
    /// Creates an empty mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            breeds: Mutex::new(Vec::new()),
            groups: Mutex::new(Vec::new()),
            facts: Mutex::new(Vec::new()),
            config,
            call_count: AtomicU64::new(0),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    #[must_use]
    pub fn with_breeds(self, breeds: Vec<Breed>) -> Self {
        *self.breeds.lock().unwrap() = breeds;
        self
    }

    #[must_use]
    pub fn with_groups(self, groups: Vec<Group>) -> Self {
        *self.groups.lock().unwrap() = groups;
        self
    }

    #[must_use]
    pub fn with_facts(self, facts: Vec<Fact>) -> Self {
        *self.facts.lock().unwrap() = facts;
        self
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Removes every stored record.
    pub fn clear(&self) {
        self.breeds.lock().unwrap().clear();
        self.groups.lock().unwrap().clear();
        self.facts.lock().unwrap().clear();
    }

    async fn begin_call(&self) -> Result<(), AppError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if let Some(ms) = self.config.latency_ms {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock upstream error".to_string());
            return Err(AppError::Upstream(UpstreamError::Connection(msg)));
        }
        Ok(())
    }

    fn page<T: Clone + Searchable>(
        store: &Mutex<Vec<T>>,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<T>, AppError> {
        let all = store.lock().unwrap().clone();
        Ok(paginate_local(filter_items(all, search), pagination)?)
    }

    fn find_group(&self, group_id: &str) -> Option<Group> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
    }

    fn find_breed(&self, breed_id: &str) -> Option<Breed> {
        self.breeds
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == breed_id)
            .cloned()
    }
}

impl Default for MockDogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DogRepository for MockDogRepository {
    async fn list_breeds(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Breed>, AppError> {
        self.begin_call().await?;
        Self::page(&self.breeds, pagination, search)
    }

    async fn get_breed_by_id(&self, breed_id: &str) -> Result<Option<Breed>, AppError> {
        self.begin_call().await?;
        Ok(self.find_breed(breed_id))
    }

    async fn list_facts(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Fact>, AppError> {
        self.begin_call().await?;
        Self::page(&self.facts, pagination, search)
    }

    async fn list_groups(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Group>, AppError> {
        self.begin_call().await?;
        Self::page(&self.groups, pagination, search)
    }

    async fn get_group_by_id(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.begin_call().await?;
        Ok(self.find_group(group_id))
    }

    async fn get_group_details(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.begin_call().await?;
        Ok(self.find_group(group_id))
    }

    async fn get_breed_in_group(
        &self,
        group_id: &str,
        breed_id: &str,
    ) -> Result<Option<Breed>, AppError> {
        self.begin_call().await?;
        match self.find_group(group_id) {
            Some(group) if group.contains_breed(breed_id) => Ok(self.find_breed(breed_id)),
            _ => Ok(None),
        }
    }
}
