//! HTTP routing configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, StatusCode},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, warn};

use crate::app::AppState;

use super::handlers::{
    get_breed_handler, get_breed_in_group_handler, get_group_details_handler, get_group_handler,
    list_breeds_handler, list_facts_handler, list_groups_handler, metrics_handler,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the CORS policy: one allowed origin, GET only.
pub fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods([Method::GET]);
    match HeaderValue::from_str(allowed_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!(origin = %allowed_origin, error = %e, "Ignoring invalid CORS origin");
            cors
        }
    }
}

/// Create the application router.
pub fn create_router(app_state: Arc<AppState>, allowed_origin: &str) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer(allowed_origin));

    let breed_routes = Router::new()
        .route("/", get(list_breeds_handler))
        .route("/{breed_id}", get(get_breed_handler));

    let group_routes = Router::new()
        .route("/", get(list_groups_handler))
        .route("/{group_id}", get(get_group_handler));

    let group_detail_routes = Router::new()
        .route("/{group_id}", get(get_group_details_handler))
        .route("/{group_id}/breed/{breed_id}", get(get_breed_in_group_handler));

    Router::new()
        .nest("/breeds", breed_routes)
        .nest("/groups", group_routes)
        .nest("/group-details", group_detail_routes)
        .route("/facts", get(list_facts_handler))
        .route("/metrics", get(metrics_handler))
        .layer(middleware)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::{Breed, Fact, Group};
    use crate::test_utils::MockDogRepository;

    const ORIGIN: &str = "http://localhost:3000";

    fn seeded_repository() -> MockDogRepository {
        MockDogRepository::new()
            .with_breeds(
                (1..=12)
                    .map(|i| Breed::new(format!("b{i}"), format!("Breed {i}")))
                    .collect(),
            )
            .with_groups(vec![
                Group::new("g1", "Herding Group").with_breeds(["b1", "b2"]),
                Group::new("g2", "Toy Group"),
            ])
            .with_facts(vec![Fact::new("f1", "Dogs dream like humans.")])
    }

    fn app(repository: MockDogRepository) -> Router {
        let state = Arc::new(AppState::new(Arc::new(repository)));
        create_router(state, ORIGIN)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_list_breeds_default_window() {
        let (status, body) = get_json(app(seeded_repository()), "/breeds").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], "Breeds retrieved successfully");
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
        assert_eq!(body["meta"]["total"], 12);
        assert_eq!(body["meta"]["page_size"], 5);
        assert_eq!(body["meta"]["total_pages"], 3);
        assert_eq!(body["meta"]["has_next"], true);
        assert_eq!(body["meta"]["has_previous"], false);
    }

    #[tokio::test]
    async fn test_list_breeds_last_page() {
        let (status, body) = get_json(app(seeded_repository()), "/breeds?page=3&per_page=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["meta"]["has_next"], false);
        assert_eq!(body["meta"]["has_previous"], true);
    }

    #[tokio::test]
    async fn test_list_breeds_search() {
        let (status, body) = get_json(app(seeded_repository()), "/breeds?search=breed%2011").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["id"], "b11");
    }

    #[tokio::test]
    async fn test_list_breeds_out_of_range_page_is_not_found() {
        let (status, body) = get_json(app(seeded_repository()), "/breeds?page=9").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "No breeds found");
    }

    #[tokio::test]
    async fn test_list_breeds_unparsable_page_resets() {
        let (status, body) = get_json(app(seeded_repository()), "/breeds?page=two").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["page"], 1);
        assert_eq!(body["meta"]["page_size"], 10);
    }

    #[tokio::test]
    async fn test_get_breed() {
        let (status, body) = get_json(app(seeded_repository()), "/breeds/b4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Breed retrieved successfully");
        assert_eq!(body["data"]["name"], "Breed 4");
        assert_eq!(body["data"]["type"], "breed");
        assert!(body.get("meta").is_none());

        let (status, body) = get_json(app(seeded_repository()), "/breeds/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Breed not found");
    }

    #[tokio::test]
    async fn test_list_facts_and_groups() {
        let (status, body) = get_json(app(seeded_repository()), "/facts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Facts retrieved successfully");
        assert_eq!(body["data"][0]["body"], "Dogs dream like humans.");

        let (status, body) = get_json(app(seeded_repository()), "/groups").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 2);
    }

    #[tokio::test]
    async fn test_empty_facts_is_not_found() {
        let (status, body) = get_json(app(MockDogRepository::new()), "/facts").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "No facts found");
    }

    #[tokio::test]
    async fn test_get_group_and_details() {
        let (status, body) = get_json(app(seeded_repository()), "/groups/g1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Herding Group");

        let (status, body) = get_json(app(seeded_repository()), "/group-details/g1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Group relationships retrieved successfully");
        assert_eq!(
            body["data"]["relationships"]["breeds"][1]["id"],
            "b2"
        );

        let (status, body) = get_json(app(seeded_repository()), "/groups/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Group not found");
    }

    #[tokio::test]
    async fn test_breed_in_group() {
        let (status, body) =
            get_json(app(seeded_repository()), "/group-details/g1/breed/b2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Breed in group retrieved successfully");
        assert_eq!(body["data"]["id"], "b2");

        let (status, body) =
            get_json(app(seeded_repository()), "/group-details/g1/breed/b9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Breed not found in the specified group");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let (status, body) =
            get_json(app(MockDogRepository::failing("connection refused")), "/breeds").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Connection Error: connection refused");
    }

    #[tokio::test]
    async fn test_metrics_without_recorder_is_not_found() {
        let (status, _) = get_json(app(seeded_repository()), "/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = get_json(app(seeded_repository()), "/cats").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let response = app(seeded_repository())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/breeds")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let response = app(seeded_repository())
            .oneshot(
                Request::builder()
                    .uri("/facts")
                    .header(header::ORIGIN, ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            ORIGIN
        );
    }

    #[test]
    fn test_cors_layer_tolerates_invalid_origin() {
        let _ = cors_layer("bad\norigin");
    }
}
