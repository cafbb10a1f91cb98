//! Page windowing and the generic paginated envelope.
//!
//! [`PaginatedResponse::new`] is the single place where total-page and
//! navigation arithmetic happens. [`paginate_local`] windows a fully fetched
//! list when the upstream API does not report authoritative counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Pagination parameters for list queries.
///
/// Bounds (`page >= 1`, `1 <= page_size <= 100`) are enforced by the caller
/// at the HTTP boundary; only a zero page size is rejected here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    /// Index of the first item on the requested page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.page_size as usize)
    }
}

/// Free-text query plus optional structured filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl SearchParams {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            filters: BTreeMap::new(),
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// The query text, or `None` when it is absent or blank.
    pub fn active_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PaginatedResponse<T> {
    /// Builds the envelope from one page of items and the overall total.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidField` when `params.page_size` is zero.
    pub fn new(items: Vec<T>, total: u64, params: &PaginationParams) -> Result<Self, ValidationError> {
        if params.page_size == 0 {
            return Err(ValidationError::InvalidField {
                field: "page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let total_pages = total.div_ceil(u64::from(params.page_size));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

        Ok(Self {
            items,
            total,
            page: params.page,
            page_size: params.page_size,
            total_pages,
            has_next: params.page < total_pages,
            has_previous: params.page > 1,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Wraps an already windowed page whose total comes from an authoritative source.
pub fn paginate<T>(
    items: Vec<T>,
    total: u64,
    params: &PaginationParams,
) -> Result<PaginatedResponse<T>, ValidationError> {
    PaginatedResponse::new(items, total, params)
}

/// Windows a complete in-memory list; `total` becomes the list length.
///
/// Pages past the end produce an empty item list with valid metadata.
pub fn paginate_local<T>(
    all: Vec<T>,
    params: &PaginationParams,
) -> Result<PaginatedResponse<T>, ValidationError> {
    let total = all.len() as u64;
    let items = all
        .into_iter()
        .skip(params.offset())
        .take(params.page_size as usize)
        .collect();
    PaginatedResponse::new(items, total, params)
}
