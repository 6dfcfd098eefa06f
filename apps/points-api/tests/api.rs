//! Integration tests for the points API endpoints.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! socket is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use points_api::{build_app, ApiConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    })
}

fn gatorade_receipt() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"},
            {"shortDescription": "Gatorade", "price": "2.25"}
        ],
        "total": "9.00"
    })
}

fn create_app() -> Router {
    build_app(&ApiConfig::default())
}

fn post_json(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/receipts/process")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get_points(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/receipts/{}/points", id))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn process(app: &Router, receipt: &Value) -> String {
    let (status, body) = send(app, post_json(receipt.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_process_then_points_target() {
    let app = create_app();
    let id = process(&app, &target_receipt()).await;

    let (status, body) = send(&app, get_points(&id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"points": 28}));
}

#[tokio::test]
async fn test_process_then_points_gatorade() {
    let app = create_app();
    let id = process(&app, &gatorade_receipt()).await;

    let (status, body) = send(&app, get_points(&id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"], 109);
}

#[tokio::test]
async fn test_same_receipt_twice_gets_two_ids() {
    let app = create_app();
    let first = process(&app, &target_receipt()).await;
    let second = process(&app, &target_receipt()).await;

    assert_ne!(first, second);
    assert_eq!(send(&app, get_points(&first)).await.1["points"], 28);
    assert_eq!(send(&app, get_points(&second)).await.1["points"], 28);
}

#[tokio::test]
async fn test_points_unknown_id() {
    let app = create_app();

    let (status, body) = send(&app, get_points("7fb1377b-b223-49d9-a31a-5a02701dd310")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["error"].as_str().unwrap().starts_with("Receipt not found"));

    let (status, _) = send(&app, get_points("not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_points_needs_exact_id() {
    let app = create_app();
    let id = process(&app, &target_receipt()).await;

    let (status, body) = send(&app, get_points(&id.to_uppercase())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, get_points(&id)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_ids_do_not_cross_instances() {
    let first_app = create_app();
    let second_app = create_app();
    let id = process(&first_app, &target_receipt()).await;

    let (status, _) = send(&second_app, get_points(&id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_process_malformed_body() {
    let app = create_app();

    let (status, body) = send(&app, post_json("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_INPUT");

    let mut missing_items = target_receipt();
    missing_items.as_object_mut().unwrap().remove("items");
    let (status, body) = send(&app, post_json(missing_items.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("items"));
}

#[tokio::test]
async fn test_lenient_mode_scores_bad_total_as_zero() {
    let app = create_app();
    let mut receipt = target_receipt();
    receipt["total"] = json!("thirty-five");

    let id = process(&app, &receipt).await;
    let (_, body) = send(&app, get_points(&id)).await;

    // 28 plus the +50 and +25 a zero total earns
    assert_eq!(body["points"], 103);
}

#[tokio::test]
async fn test_lenient_mode_reads_extra_digits() {
    let app = create_app();
    let mut receipt = target_receipt();
    receipt["total"] = json!("35.350");

    let id = process(&app, &receipt).await;
    let (_, body) = send(&app, get_points(&id)).await;

    assert_eq!(body["points"], 28);
}

#[tokio::test]
async fn test_strict_mode_rejects_bad_total() {
    let config = ApiConfig {
        strict_validation: true,
        ..ApiConfig::default()
    };
    let app = build_app(&config);
    let mut receipt = target_receipt();
    receipt["total"] = json!("thirty-five");

    let (status, body) = send(&app, post_json(receipt.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("total"));

    process(&app, &target_receipt()).await;
}

#[tokio::test]
async fn test_body_limit() {
    let config = ApiConfig {
        max_body_bytes: 64,
        ..ApiConfig::default()
    };
    let app = build_app(&config);

    let (status, _) = send(&app, post_json(target_receipt().to_string())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_concurrent_requests() {
    let app = create_app();

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { process(&app, &gatorade_receipt()).await })
        })
        .collect();

    let mut ids = std::collections::HashSet::new();
    for task in tasks {
        let id = task.await.unwrap();
        assert_eq!(send(&app, get_points(&id)).await.1["points"], 109);
        ids.insert(id);
    }

    assert_eq!(ids.len(), 32);
}
