//! Router-level tests for filtering and pagination.
//!
//! Exercises the query-and-pagination engine through the HTTP surface: the
//! clamping laws, the filter conjunction, and the envelope invariants.
//!
//! Note on consistency: the engine's count and fetch are two independent
//! reads with no transaction between them. Under concurrent writes `total`
//! and `records` may reflect slightly different states; these tests mutate
//! only between requests, so they can assert exact values.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_api::routes;
use catalog_api::state::AppState;
use catalog_api::store::memory::MemoryStore;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    Router::new().merge(routes::routes()).with_state(state)
}

async fn list(app: &Router, query: &str) -> (StatusCode, Value) {
    let uri = if query.is_empty() {
        "/products".to_string()
    } else {
        format!("/products?{query}")
    };
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn seed(app: &Router, name: &str, price: f64, category: &str) {
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": name, "price": price, "category": category }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Seed `count` products named `item-0..count` in order.
async fn seed_many(app: &Router, count: usize) {
    for i in 0..count {
        seed(app, &format!("item-{i}"), 10.0 + i as f64, "misc").await;
    }
}

fn record_ids(envelope: &Value) -> Vec<String> {
    envelope["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

fn record_names(envelope: &Value) -> Vec<String> {
    envelope["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_empty_catalog_envelope() {
    let app = app();
    let (status, body) = list(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pages"], 1);
    assert_eq!(body["records"], json!([]));
}

#[tokio::test]
async fn test_default_page_size_bounds_records() {
    let app = app();
    seed_many(&app, 15).await;

    let (status, body) = list(&app, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 15);
    assert_eq!(body["pages"], 2);
    assert_eq!(body["page"], 1);
    // Default limit is 10; records.length <= limit always holds.
    assert_eq!(body["records"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_newest_first_ordering() {
    let app = app();
    seed_many(&app, 3).await;

    let (_, body) = list(&app, "").await;
    assert_eq!(record_names(&body), ["item-2", "item-1", "item-0"]);
}

#[tokio::test]
async fn test_clamp_law_page_beyond_last() {
    let app = app();
    seed_many(&app, 5).await;

    let (_, last) = list(&app, "page=3&limit=2").await;
    assert_eq!(last["pages"], 3);
    assert_eq!(last["page"], 3);

    // pages + 5 returns the same records as the last page.
    let (status, beyond) = list(&app, "page=8&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(beyond["page"], 3);
    assert_eq!(record_ids(&beyond), record_ids(&last));

    // So does a numeric page far beyond what i64 can hold.
    let (status, huge) = list(&app, "page=99999999999999999999999&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(huge["page"], 3);
    assert_eq!(record_ids(&huge), record_ids(&last));
}

#[tokio::test]
async fn test_floor_law_non_positive_page() {
    let app = app();
    seed_many(&app, 5).await;

    let (_, first) = list(&app, "page=1&limit=2").await;
    for query in ["page=0&limit=2", "page=-3&limit=2"] {
        let (status, body) = list(&app, query).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 1);
        assert_eq!(record_ids(&body), record_ids(&first));
    }
}

#[tokio::test]
async fn test_limit_law_clamping() {
    let app = app();
    seed_many(&app, 5).await;

    // limit=1000 behaves like limit=100: everything fits on one page.
    let (_, huge) = list(&app, "limit=1000").await;
    assert_eq!(huge["pages"], 1);
    assert_eq!(huge["records"].as_array().unwrap().len(), 5);

    // limit=0 behaves like limit=1.
    let (_, tiny) = list(&app, "limit=0").await;
    assert_eq!(tiny["pages"], 5);
    assert_eq!(tiny["records"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_numeric_page_and_limit_fall_back_to_defaults() {
    let app = app();
    seed_many(&app, 12).await;

    let (status, body) = list(&app, "page=abc&limit=xyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pages"], 2);
    assert_eq!(body["records"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_filter_conjunction() {
    let app = app();
    seed(&app, "A", 100.0, "X").await;
    seed(&app, "B", 200.0, "X").await;
    seed(&app, "C", 150.0, "Y").await;

    let (status, body) = list(&app, "category=X&minPrice=150").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(record_names(&body), ["B"]);

    // The lower bound is inclusive: C sits exactly on it.
    let (_, body) = list(&app, "category=Y&minPrice=150").await;
    assert_eq!(record_names(&body), ["C"]);

    // And the upper bound too.
    let (_, body) = list(&app, "maxPrice=100").await;
    assert_eq!(record_names(&body), ["A"]);
}

#[tokio::test]
async fn test_inverted_price_range_matches_nothing() {
    let app = app();
    seed(&app, "A", 100.0, "X").await;

    // min > max is not an error; the predicate just matches no records.
    let (status, body) = list(&app, "minPrice=200&maxPrice=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["pages"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["records"], json!([]));
}

#[tokio::test]
async fn test_malformed_price_bounds_are_validation_errors() {
    let app = app();
    seed(&app, "A", 100.0, "X").await;

    let (status, body) = list(&app, "minPrice=cheap").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("minPrice"));

    let (status, body) = list(&app, "maxPrice=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("maxPrice"));
}

#[tokio::test]
async fn test_blank_category_means_no_filter() {
    let app = app();
    seed(&app, "A", 100.0, "X").await;
    seed(&app, "B", 200.0, "Y").await;

    let (status, body) = list(&app, "category=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_category_is_trimmed_before_matching() {
    let app = app();
    seed(&app, "A", 100.0, "X").await;

    let (_, body) = list(&app, "category=%20X%20").await;
    assert_eq!(body["total"], 1);
    assert_eq!(record_names(&body), ["A"]);
}
