//! End-to-end request flows: router → service → HTTP adapter → mock upstream.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use dog_data_facade::api::create_router;
use dog_data_facade::app::AppState;
use dog_data_facade::infra::{DogApiClient, DogApiConfig};

fn router_for(server: &MockServer) -> Router {
    let client = Arc::new(DogApiClient::new(DogApiConfig::new(server.url("/api/v2"))));
    create_router(Arc::new(AppState::new(client)), "http://localhost:3000")
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn group_json(id: &str, name: &str, breed_ids: &[&str]) -> Value {
    let breeds: Vec<Value> = breed_ids
        .iter()
        .map(|id| json!({ "id": id, "type": "breed" }))
        .collect();
    json!({
        "id": id,
        "type": "group",
        "attributes": { "name": name },
        "relationships": { "breeds": { "data": breeds } }
    })
}

#[tokio::test]
async fn test_breeds_flow_with_clamped_page_size() {
    let server = MockServer::start_async().await;
    let breeds: Vec<Value> = (1..=3)
        .map(|i| {
            json!({
                "id": format!("b{i}"),
                "type": "breed",
                "attributes": { "name": format!("Breed {i}"), "hypoallergenic": i == 2 }
            })
        })
        .collect();

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/breeds")
                .query_param("page[number]", "1")
                .query_param("page[size]", "100");
            then.status(200).json_body(json!({ "data": breeds, "meta": { "total": 3 } }));
        })
        .await;

    let (status, body) = get_json(router_for(&server), "/breeds?page=0&per_page=1000").await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][1]["hypoallergenic"], true);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["page_size"], 100);
    assert_eq!(body["meta"]["total_pages"], 1);
}

#[tokio::test]
async fn test_search_is_forwarded_and_applied_locally() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/groups")
                .query_param("filter[search]", "herd");
            then.status(200).json_body(json!({
                "data": [
                    group_json("g1", "Herding Group", &[]),
                    group_json("g2", "Toy Group", &[])
                ]
            }));
        })
        .await;

    let (status, body) = get_json(router_for(&server), "/groups?search=herd").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["name"], "Herding Group");
}

#[tokio::test]
async fn test_group_lookup_flow() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/groups/g1");
            then.status(200)
                .json_body(json!({ "data": group_json("g1", "Herding Group", &["b1", "b2"]) }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/groups/999");
            then.status(404);
        })
        .await;

    let (status, body) = get_json(router_for(&server), "/groups/g1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["breeds"].as_array().unwrap().len(), 2);

    let (status, body) = get_json(router_for(&server), "/group-details/g1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["relationships"]["breeds"][0]["id"], "b1");

    let (status, body) = get_json(router_for(&server), "/groups/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": "error", "message": "Group not found" }));
}

#[tokio::test]
async fn test_breed_in_group_flow() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/groups/g1");
            then.status(200)
                .json_body(json!({ "data": group_json("g1", "Herding Group", &["b1"]) }));
        })
        .await;
    let breed_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/breeds/b1");
            then.status(200).json_body(json!({
                "data": {
                    "id": "b1",
                    "type": "breed",
                    "attributes": { "name": "Border Collie" }
                }
            }));
        })
        .await;

    let (status, body) = get_json(router_for(&server), "/group-details/g1/breed/b1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Border Collie");

    let (status, body) = get_json(router_for(&server), "/group-details/g1/breed/b5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Breed not found in the specified group");

    breed_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_upstream_failures_map_to_gateway_errors() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/facts");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/breeds/broken");
            then.status(200).json_body(json!({ "data": { "id": "broken" } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/breeds/mistyped");
            then.status(200).json_body(json!({
                "data": {
                    "id": "mistyped",
                    "type": "breed",
                    "attributes": { "name": "Akita", "hypoallergenic": "yes" }
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/groups/g1");
            then.status(503);
        })
        .await;

    let (status, body) = get_json(router_for(&server), "/facts").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "API Error: 500 - Internal Server Error");

    let (status, body) = get_json(router_for(&server), "/breeds/broken").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");

    let (status, body) = get_json(router_for(&server), "/breeds/mistyped").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Error decoding response:")
    );

    let (status, body) = get_json(router_for(&server), "/groups/g1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "API Error: 503 - Service Unavailable");
}
