mod support;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use catalog::infra::http::{self, ApiState};

use support::{InMemoryProducts, facade, memory_backend, product_service};

async fn router() -> (Router, Arc<InMemoryProducts>) {
    let repo = Arc::new(InMemoryProducts::new());
    repo.seed("Rust in Action", 10.0, "BOOKS").await;
    repo.seed("Programming Rust", 15.0, "BOOKS").await;
    repo.seed("Zero To Production", 20.0, "BOOKS").await;
    repo.seed("Apple", 5.0, "FOOD").await;

    let listings = facade(repo.clone(), memory_backend());
    let products = product_service(repo.clone(), listings.clone());
    let state = ApiState::new(listings, products, repo.clone());
    (http::build_router(state), repo)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be json")
    };
    (status, json)
}

#[tokio::test]
async fn list_all_reports_cache_state_in_the_envelope() {
    let (app, _) = router().await;

    let (status, first) = send(&app, Method::GET, "/products?page=0&size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["code"], 200);
    assert_eq!(first["message"], "Success");
    assert_eq!(first["cached"], false);
    assert_eq!(first["result"]["totalElements"], 4);
    assert_eq!(first["result"]["totalPages"], 2);
    assert_eq!(first["result"]["content"].as_array().map(Vec::len), Some(2));

    let (_, second) = send(&app, Method::GET, "/products?page=0&size=2", None).await;
    assert_eq!(second["message"], "Success (Cached)");
    assert_eq!(second["cached"], true);
    assert_eq!(second["result"], first["result"]);
}

#[tokio::test]
async fn sort_route_filters_and_orders() {
    let (app, _) = router().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/products/sort?category=BOOKS&field=price&direction=desc&page=0&size=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let prices: Vec<f64> = body["result"]["content"]
        .as_array()
        .expect("content array")
        .iter()
        .filter_map(|product| product["price"].as_f64())
        .collect();
    assert_eq!(prices, vec![20.0, 15.0, 10.0]);
    assert_eq!(body["result"]["last"], true);
    assert_eq!(body["cached"], false);
}

#[tokio::test]
async fn unknown_sort_field_is_a_bad_request() {
    let (app, _) = router().await;

    let (status, body) = send(&app, Method::GET, "/products/sort?field=rating", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["errors"].as_array().is_some_and(|errors| !errors.is_empty()));
}

#[tokio::test]
async fn filter_route_with_unknown_category_is_empty() {
    let (app, _) = router().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/products/filter?category=INVALID_CATEGORY",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["totalElements"], 0);
    assert_eq!(body["result"]["empty"], true);
}

#[tokio::test]
async fn oversized_page_is_rejected() {
    let (app, _) = router().await;

    let (status, body) = send(&app, Method::GET, "/products?size=500", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn search_route_matches_names() {
    let (app, _) = router().await;

    let (status, body) = send(&app, Method::GET, "/products/search?keyword=rust", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["totalElements"], 2);
}

#[tokio::test]
async fn create_then_fetch_product() {
    let (app, _) = router().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({
            "name": "Mechanical Keyboard",
            "description": "Tactile switches",
            "price": 129.99,
            "category": "ELECTRONICS"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["code"], 201);
    let id = created["result"]["id"].as_str().expect("id").to_string();

    let (status, fetched) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["result"]["name"], "Mechanical Keyboard");
    assert_eq!(fetched["result"]["category"], "ELECTRONICS");
}

#[tokio::test]
async fn create_rejects_duplicates_and_invalid_input() {
    let (app, _) = router().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({
            "name": "Apple",
            "description": "Another apple",
            "price": 1.0,
            "category": "FOOD"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate");

    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(json!({ "name": "", "description": "", "category": "TOYS" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn missing_and_malformed_ids() {
    let (app, _) = router().await;
    let missing = Uuid::new_v4();

    let (status, _) = send(&app, Method::GET, &format!("/products/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/products/{missing}"),
        Some(json!({
            "name": "Ghost",
            "description": "Not there",
            "price": 1.0,
            "category": "HOME"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/products/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_evicts_cached_listing() {
    let (app, repo) = router().await;
    let target = repo.seed("Disposable", 2.0, "HOME").await;

    send(&app, Method::GET, "/products", None).await;
    let (_, cached) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(cached["cached"], true);

    let (status, body) = send(&app, Method::DELETE, &format!("/products/{}", target.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert!(body.get("result").is_none());

    let (_, fresh) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(fresh["cached"], false);
    assert_eq!(fresh["result"]["totalElements"], 4);
}

#[tokio::test]
async fn health_reports_store_and_cache() {
    let (app, _) = router().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "UP");
    assert_eq!(body["cache"]["provider"], "memory");
    assert_eq!(body["cache"]["status"], "UP");
}
