//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::domain::{AppError, Breed, Fact, Group, PaginationParams, ResourceRef, SearchParams};

use super::response::ApiResponse;

const LIST_DEFAULT_PAGE_SIZE: u32 = 5;
const LIST_FALLBACK_PAGE_SIZE: u32 = 10;
const LIST_MAX_PAGE_SIZE: u32 = 100;

/// Raw list query string: `?page=&per_page=&search=`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Clamped pagination: defaults to (1, 5); non-numeric input resets to (1, 10).
    pub fn pagination(&self) -> PaginationParams {
        let page = parse_number(self.page.as_deref(), 1);
        let per_page = parse_number(self.per_page.as_deref(), i64::from(LIST_DEFAULT_PAGE_SIZE));

        match (page, per_page) {
            (Some(page), Some(per_page)) => {
                let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
                let per_page = if per_page < 1 {
                    LIST_DEFAULT_PAGE_SIZE
                } else {
                    u32::try_from(per_page.min(i64::from(LIST_MAX_PAGE_SIZE)))
                        .unwrap_or(LIST_MAX_PAGE_SIZE)
                };
                PaginationParams::new(page, per_page)
            }
            _ => PaginationParams::new(1, LIST_FALLBACK_PAGE_SIZE),
        }
    }

    /// `None` when the search text is absent or blank.
    pub fn search(&self) -> Option<SearchParams> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(SearchParams::query)
    }
}

/// Absent means the default; present but non-numeric yields `None`.
fn parse_number(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw.map(str::trim) {
        None | Some("") => Some(default),
        Some(value) => value.parse().ok(),
    }
}

/// Group membership as served by `/group-details/{group_id}`.
#[derive(Debug, Serialize)]
pub struct GroupDetails {
    pub relationships: GroupRelationships,
}

#[derive(Debug, Serialize)]
pub struct GroupRelationships {
    pub breeds: Vec<ResourceRef>,
}

impl From<Group> for GroupDetails {
    fn from(group: Group) -> Self {
        Self {
            relationships: GroupRelationships {
                breeds: group.breeds,
            },
        }
    }
}

pub async fn list_breeds_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<Breed>>, AppError> {
    let search = query.search();
    let page = state
        .service
        .list_breeds(&query.pagination(), search.as_ref())
        .await?;
    ApiResponse::page(page, "breeds")
}

pub async fn get_breed_handler(
    State(state): State<Arc<AppState>>,
    Path(breed_id): Path<String>,
) -> Result<ApiResponse<Breed>, AppError> {
    let breed = state
        .service
        .get_breed(&breed_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Breed not found".to_string()))?;
    Ok(ApiResponse::success(breed, "Breed retrieved successfully"))
}

pub async fn list_facts_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<Fact>>, AppError> {
    let search = query.search();
    let page = state
        .service
        .list_facts(&query.pagination(), search.as_ref())
        .await?;
    ApiResponse::page(page, "facts")
}

pub async fn list_groups_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<Group>>, AppError> {
    let search = query.search();
    let page = state
        .service
        .list_groups(&query.pagination(), search.as_ref())
        .await?;
    ApiResponse::page(page, "groups")
}

pub async fn get_group_handler(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Result<ApiResponse<Group>, AppError> {
    let group = state
        .service
        .get_group(&group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
    Ok(ApiResponse::success(group, "Group retrieved successfully"))
}

pub async fn get_group_details_handler(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Result<ApiResponse<GroupDetails>, AppError> {
    let group = state
        .service
        .get_group_details(&group_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;
    Ok(ApiResponse::success(
        GroupDetails::from(group),
        "Group relationships retrieved successfully",
    ))
}

pub async fn get_breed_in_group_handler(
    State(state): State<Arc<AppState>>,
    Path((group_id, breed_id)): Path<(String, String)>,
) -> Result<ApiResponse<Breed>, AppError> {
    let breed = state
        .service
        .get_breed_in_group(&group_id, &breed_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Breed not found in the specified group".to_string()))?;
    Ok(ApiResponse::success(
        breed,
        "Breed in group retrieved successfully",
    ))
}

/// Prometheus text exposition; 404 when no recorder is installed.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics_handle {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
