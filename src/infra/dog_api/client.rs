//! HTTP adapter for the public dog API (`https://dogapi.dog/api/v2`).
//!
//! Translates the facade's pagination and search parameters into the
//! upstream query convention, normalizes its JSON into domain records, and
//! paginates locally when the upstream response carries no total count.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    AppError, Breed, DogRepository, Fact, Group, PaginatedResponse, PaginationParams,
    SearchParams, Searchable, UpstreamError, ValidationError, filter_items, paginate,
    paginate_local,
};

use super::wire::{
    Document, ListDocument, breed_from_resource, fact_from_resource, group_from_resource,
};

pub const DEFAULT_BASE_URL: &str = "https://dogapi.dog/api/v2";

const PAGE_NUMBER_KEY: &str = "page[number]";
const PAGE_SIZE_KEY: &str = "page[size]";
const SEARCH_KEY: &str = "filter[search]";

/// Configuration for the dog API client
#[derive(Debug)]
pub struct DogApiConfig {
    pub base_url: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<SecretString>,
    /// Per-request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for DogApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl DogApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

type ResourceMapper<R, T> = fn(R, Option<String>) -> Result<T, ValidationError>;

/// Dog API client implementing the [`DogRepository`] port.
///
/// The underlying HTTP session is created on first use and shared by every
/// later call until [`DogApiClient::close`] releases it.
pub struct DogApiClient {
    config: DogApiConfig,
    session: Mutex<Option<Client>>,
}

impl DogApiClient {
    pub fn new(config: DogApiConfig) -> Self {
        info!(base_url = %config.base_url, "Created dog API client");
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DogApiConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Whether an HTTP session is currently held.
    pub fn is_open(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Releases the HTTP session and its pooled connections.
    ///
    /// A later request transparently opens a new session.
    pub fn close(&self) {
        let released = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if released.is_some() {
            info!("Closed dog API session");
        }
    }

    fn session(&self) -> Result<Client, UpstreamError> {
        let mut guard = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;
        debug!("Opened dog API session");
        *guard = Some(client.clone());
        Ok(client)
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| UpstreamError::Connection(format!("Invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| UpstreamError::Connection("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues one GET and decodes the body; no retries.
    #[instrument(skip(self, query))]
    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<T, UpstreamError> {
        let result = self.send(segments, query).await;
        record_outcome(resource, &result);
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<T, UpstreamError> {
        let client = self.session()?;
        let url = self.endpoint_url(segments)?;
        debug!(url = %url, "Calling dog API");

        let mut request = client.get(url).header(ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status != reqwest::StatusCode::NOT_FOUND {
                warn!(status = status.as_u16(), "Dog API returned an error status");
            }
            return Err(UpstreamError::from_status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Connection(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Single-resource lookup where an upstream 404 means "absent".
    async fn fetch_one<R, T>(
        &self,
        resource: &'static str,
        segments: &[&str],
        map: ResourceMapper<R, T>,
    ) -> Result<Option<T>, AppError>
    where
        R: DeserializeOwned,
    {
        match self.fetch::<Document<R>>(resource, segments, &[]).await {
            Ok(document) => {
                let (record, link) = document.into_parts();
                Ok(Some(map(record, link)?))
            }
            Err(e) if e.is_not_found() => {
                debug!(resource, "Resource not found upstream");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Listing with the upstream total when reported, local windowing otherwise.
    async fn fetch_page<R, T>(
        &self,
        resource: &'static str,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
        map: ResourceMapper<R, T>,
    ) -> Result<PaginatedResponse<T>, AppError>
    where
        R: DeserializeOwned,
        T: Searchable,
    {
        let query = build_query(pagination, search);
        let document: ListDocument<R> = self.fetch(resource, &[resource], &query).await?;
        let total = document.total();

        let items = document
            .data
            .into_iter()
            .map(|record| map(record, None))
            .collect::<Result<Vec<_>, _>>()?;

        let page = match total {
            Some(total) => paginate(items, total, pagination)?,
            None => {
                debug!(
                    resource,
                    fetched = items.len(),
                    "Upstream reported no total, paginating locally"
                );
                paginate_local(filter_items(items, search), pagination)?
            }
        };
        Ok(page)
    }
}

/// Translates facade parameters into the upstream query-string convention.
///
/// Structured filters are forwarded under their own keys, unchanged.
pub fn build_query(
    pagination: &PaginationParams,
    search: Option<&SearchParams>,
) -> Vec<(String, String)> {
    let mut query = vec![
        (PAGE_NUMBER_KEY.to_string(), pagination.page.to_string()),
        (PAGE_SIZE_KEY.to_string(), pagination.page_size.to_string()),
    ];
    if let Some(search) = search {
        if let Some(text) = search.active_query() {
            query.push((SEARCH_KEY.to_string(), text.to_string()));
        }
        query.extend(
            search
                .filters
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
    }
    query
}

fn record_outcome<T>(resource: &'static str, result: &Result<T, UpstreamError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if e.is_not_found() => "not_found",
        Err(UpstreamError::Status { .. }) => "status",
        Err(UpstreamError::Connection(_)) => "connection",
        Err(UpstreamError::Decode(_)) => "decode",
    };
    metrics::counter!("dog_api_requests_total", "resource" => resource, "outcome" => outcome)
        .increment(1);
}

#[async_trait]
impl DogRepository for DogApiClient {
    #[instrument(skip(self, search), fields(page = pagination.page, page_size = pagination.page_size))]
    async fn list_breeds(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Breed>, AppError> {
        self.fetch_page("breeds", pagination, search, breed_from_resource)
            .await
    }

    #[instrument(skip(self))]
    async fn get_breed_by_id(&self, breed_id: &str) -> Result<Option<Breed>, AppError> {
        self.fetch_one("breeds", &["breeds", breed_id], breed_from_resource)
            .await
    }

    #[instrument(skip(self, search), fields(page = pagination.page, page_size = pagination.page_size))]
    async fn list_facts(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Fact>, AppError> {
        self.fetch_page("facts", pagination, search, fact_from_resource)
            .await
    }

    #[instrument(skip(self, search), fields(page = pagination.page, page_size = pagination.page_size))]
    async fn list_groups(
        &self,
        pagination: &PaginationParams,
        search: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Group>, AppError> {
        self.fetch_page("groups", pagination, search, group_from_resource)
            .await
    }

    #[instrument(skip(self))]
    async fn get_group_by_id(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.fetch_one("groups", &["groups", group_id], group_from_resource)
            .await
    }

    #[instrument(skip(self))]
    async fn get_group_details(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.get_group_by_id(group_id).await
    }

    #[instrument(skip(self))]
    async fn get_breed_in_group(
        &self,
        group_id: &str,
        breed_id: &str,
    ) -> Result<Option<Breed>, AppError> {
        let Some(group) = self.get_group_details(group_id).await? else {
            return Ok(None);
        };

        if !group.contains_breed(breed_id) {
            debug!(group_id, breed_id, "Breed is not a member of the group");
            return Ok(None);
        }

        self.get_breed_by_id(breed_id).await
    }
}
