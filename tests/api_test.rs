//! HTTP contract tests
//!
//! Drive the router in-process against a MemoryStore.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN,
};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use roster::{router, AppState, MemoryStore};

fn app() -> Router {
    router(AppState::new(Arc::new(MemoryStore::new())))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn ann() -> Value {
    json!({
        "name": "Ann",
        "email": "ann@x.com",
        "phone": "111",
        "rollNumber": "R1",
        "course": "CS",
        "gpa": 3.5
    })
}

fn bob() -> Value {
    json!({
        "name": "Bob",
        "email": "bob@x.com",
        "phone": "222",
        "rollNumber": "R2",
        "course": "EE"
    })
}

fn timestamp(record: &Value, key: &str) -> DateTime<Utc> {
    record[key].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "Server is running" }));
}

#[tokio::test]
async fn test_create_duplicate_delete_get_scenario() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/students", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::POST, "/api/students", Some(ann())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("email"));

    let uri = format!("/api/students/{id}");
    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Student deleted successfully" }));

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Student not found" }));
}

#[tokio::test]
async fn test_created_record_matches_input() {
    let app = app();
    let mut input = ann();
    input["address"] = json!("1 Elm St");

    let (status, created) = send(&app, Method::POST, "/api/students", Some(input.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    for key in ["name", "email", "phone", "rollNumber", "course", "gpa", "address"] {
        assert_eq!(created[key], input[key], "field {key}");
    }
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let id = created["_id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/students/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_returns_every_record() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(ann())).await;
    send(&app, Method::POST, "/api/students", Some(bob())).await;

    let (status, body) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[tokio::test]
async fn test_duplicate_roll_number_rejected() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(ann())).await;

    let mut other = bob();
    other["rollNumber"] = json!("R1");
    let (status, body) = send(&app, Method::POST, "/api/students", Some(other)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("rollNumber"));
}

#[tokio::test]
async fn test_missing_required_fields_rejected() {
    let app = app();
    for field in ["name", "email", "phone", "rollNumber", "course"] {
        let mut input = ann();
        input.as_object_mut().unwrap().remove(field);

        let (status, body) = send(&app, Method::POST, "/api/students", Some(input)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
        assert!(body["message"].as_str().unwrap().contains(field));
    }

    let mut empty_name = ann();
    empty_name["name"] = json!("");
    let (status, _) = send(&app, Method::POST, "/api/students", Some(empty_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_gpa_range() {
    let app = app();

    let mut high = ann();
    high["gpa"] = json!(4.5);
    let (status, _) = send(&app, Method::POST, "/api/students", Some(high)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut negative = ann();
    negative["gpa"] = json!(-1);
    let (status, _) = send(&app, Method::POST, "/api/students", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut top = ann();
    top["gpa"] = json!(4.0);
    let (status, _) = send(&app, Method::POST, "/api/students", Some(top)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_form_style_gpa() {
    let app = app();

    let mut text = ann();
    text["gpa"] = json!("3.5");
    let (status, created) = send(&app, Method::POST, "/api/students", Some(text)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["gpa"], json!(3.5));

    let mut blank = bob();
    blank["gpa"] = json!("");
    let (status, created) = send(&app, Method::POST, "/api/students", Some(blank)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("gpa").is_none());
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = app();
    let uri = "/api/students/does-not-exist";

    let (status, _) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PUT, uri, Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update() {
    let app = app();
    let (_, created) = send(&app, Method::POST, "/api/students", Some(ann())).await;
    let uri = format!("/api/students/{}", created["_id"].as_str().unwrap());

    let patch = json!({ "course": "Math", "gpa": 3.9 });
    let (status, updated) = send(&app, Method::PUT, &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(updated["course"], "Math");
    assert_eq!(updated["gpa"], json!(3.9));
    for key in ["_id", "name", "email", "phone", "rollNumber", "createdAt"] {
        assert_eq!(updated[key], created[key], "field {key}");
    }
    assert!(timestamp(&updated, "updatedAt") > timestamp(&created, "updatedAt"));

    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_cannot_clear_fields() {
    let app = app();
    let mut input = ann();
    input["address"] = json!("1 Elm St");
    let (_, created) = send(&app, Method::POST, "/api/students", Some(input)).await;
    let uri = format!("/api/students/{}", created["_id"].as_str().unwrap());

    let patch = json!({ "name": "", "address": "", "gpa": 0 });
    let (status, updated) = send(&app, Method::PUT, &uri, Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ann");
    assert_eq!(updated["address"], "1 Elm St");
    assert_eq!(updated["gpa"], json!(3.5));
}

#[tokio::test]
async fn test_update_unique_fields() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(ann())).await;
    let (_, existing) = send(&app, Method::POST, "/api/students", Some(bob())).await;
    let uri = format!("/api/students/{}", existing["_id"].as_str().unwrap());

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "email": "ann@x.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "rollNumber": "R1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "email": "bob@x.com" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "gpa": 9 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/students")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());

    let mut wrong_type = ann();
    wrong_type["gpa"] = json!("abc");
    let (status, _) = send(&app, Method::POST, "/api/students", Some(wrong_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/students")
        .body(Body::from(ann().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/students")
        .header(ORIGIN, "http://localhost:3000")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers.contains_key(ACCESS_CONTROL_ALLOW_METHODS));
    assert!(headers.contains_key(ACCESS_CONTROL_ALLOW_HEADERS));
}
