//! HTTP 接口测试

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use campus_adapter_memory::MemoryCache;
use campus_api::router;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{CountingStore, FailingCache, FailingStore, app_state};

fn app_with_store(store: Arc<CountingStore>) -> Router {
    router(app_state(store, Arc::new(MemoryCache::default())))
}

fn app() -> Router {
    app_with_store(Arc::new(CountingStore::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn create_course(app: &Router) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/courses",
            json!({
                "title": "Test Course",
                "description": "Test Description",
                "price": 99.99,
                "duration": "2h"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn course_create_then_get() {
    let store = Arc::new(CountingStore::new());
    let app = app_with_store(store.clone());

    let created = create_course(&app).await;
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let (status, fetched) = send(&app, get(&format!("/courses/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["title"], "Test Course");
    assert_eq!(fetched["description"], "Test Description");
    assert_eq!(fetched["price"], 99.99);
    assert_eq!(fetched["duration"], "2h");

    let (status, cached) = send(&app, get(&format!("/courses/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cached, created);
    assert_eq!(store.find_calls(), 1);
}

#[tokio::test]
async fn unknown_course_is_404() {
    let app = app();

    let (status, body) = send(&app, get("/courses/65f1a2b3c4d5e6f708192a3b")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, _) = send(&app, get("/courses/not-an-object-id")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_course_is_400_problem_json() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/courses", json!({"title": "Only title"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/problem+json"
    );

    let malformed = Request::builder()
        .method("POST")
        .uri("/courses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn course_stats_are_fresh() {
    let app = app();

    let (status, stats) = send(&app, get("/courses/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["documentCount"], 0);

    create_course(&app).await;
    create_course(&app).await;

    let (_, stats) = send(&app, get("/courses/stats")).await;
    assert_eq!(stats["documentCount"], 2);
    assert!(stats["totalSize"].as_u64().unwrap() > 0);
    assert!(stats["avgDocumentSize"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn course_patch_and_delete() {
    let store = Arc::new(CountingStore::new());
    let app = app_with_store(store.clone());
    let created = create_course(&app).await;
    let uri = format!("/courses/{}", created["_id"].as_str().unwrap());

    send(&app, get(&uri)).await;

    let (status, body) = send(&app, json_request("PATCH", &uri, json!({"price": 49.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modified"], 1);

    let (_, fetched) = send(&app, get(&uri)).await;
    assert_eq!(fetched["price"], 49.5);
    assert_eq!(store.find_calls(), 2);

    let (status, body) = send(&app, json_request("PATCH", &uri, json!({"price": 49.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modified"], 0);

    let (status, _) = send(&app, json_request("PATCH", &uri, json!({"_id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let delete = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_request("PATCH", &uri, json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_create_get_and_enroll() {
    let app = app();
    let course = create_course(&app).await;
    let course_id = course["_id"].as_str().unwrap();

    let (status, student) = send(
        &app,
        json_request("POST", "/students", json!({"name": "Ada", "email": "ada@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(student["enrolledCourses"], json!([]));
    let student_id = student["_id"].as_str().unwrap();

    let (status, fetched) = send(&app, get(&format!("/students/{}", student_id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, student);

    let enroll_uri = format!("/students/{}/enroll/{}", student_id, course_id);
    let (status, body) = send(&app, json_request("POST", &enroll_uri, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully enrolled in course");

    let (status, _) = send(&app, json_request("POST", &enroll_uri, json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, fetched) = send(&app, get(&format!("/students/{}", student_id))).await;
    assert_eq!(fetched["enrolledCourses"], json!([course_id]));

    let unknown_course = format!("/students/{}/enroll/65f1a2b3c4d5e6f708192a3b", student_id);
    let (status, _) = send(&app, json_request("POST", &unknown_course, json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_student_is_400() {
    let app = app();
    let (status, body) =
        send(&app, json_request("POST", "/students", json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("Name and email are required"));
}

#[tokio::test]
async fn failing_cache_is_invisible_to_clients() {
    let app = router(app_state(
        Arc::new(CountingStore::new()),
        Arc::new(FailingCache::default()),
    ));

    let created = create_course(&app).await;
    let (status, fetched) =
        send(&app, get(&format!("/courses/{}", created["_id"].as_str().unwrap()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // 缓存不是关键组件
    let (status, ready) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["healthy"], true);
}

#[tokio::test]
async fn store_failure_is_500_without_details() {
    let app = router(app_state(Arc::new(FailingStore), Arc::new(MemoryCache::default())));

    let (status, body) = send(&app, get("/courses/65f1a2b3c4d5e6f708192a3b")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body["detail"].as_str().unwrap().contains("connection reset"));

    let (status, _) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_endpoints() {
    let app = app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
