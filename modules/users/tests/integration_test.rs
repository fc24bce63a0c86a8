use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use users::{
    domain::service::Service,
    infra::storage::{migrations::Migrator, sea_orm_repo::SeaOrmUsersRepository},
};

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test HTTP router backed by an in-memory database
async fn create_test_router() -> Router {
    let db = create_test_db().await;
    let repo = Arc::new(SeaOrmUsersRepository::new(db));
    users::api::rest::routes::router(Arc::new(Service::new(repo)))
}

fn post_user(name: &str, email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"name": name, "email": email}).to_string(),
        ))
        .expect("Failed to build request")
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body was not JSON")
}

#[tokio::test]
async fn test_create_user_returns_201_with_assigned_id() {
    let app = create_test_router().await;

    let response = app.oneshot(post_user("Ana", "ana@x.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["email"], "ana@x.com");
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_duplicate_email_returns_409_conflict_envelope() {
    let app = create_test_router().await;

    let response = app
        .clone()
        .oneshot(post_user("Ana", "ana@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(post_user("Bea", "ana@x.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["status"], 409);
    assert_eq!(body["error"], "Conflict");
    assert_eq!(body["message"], "email already registered");
    assert!(body["timestamp"].is_string());
    // Envelope shape is fixed: exactly four fields
    assert_eq!(body.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_blank_name_returns_400_with_verbatim_message() {
    let app = create_test_router().await;

    let response = app.oneshot(post_user("", "b@x.com")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn test_email_is_checked_before_name() {
    let app = create_test_router().await;

    let response = app.oneshot(post_user("", "  ")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "email is required");
}

#[tokio::test]
async fn test_missing_fields_behave_like_blank_ones() {
    let app = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["message"], "email is required");
}

#[tokio::test]
async fn test_created_user_is_retrievable_by_id() {
    let app = create_test_router().await;

    let response = app
        .clone()
        .oneshot(post_user("Ana", "ana@x.com"))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .uri(format!("/api/users/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["email"], "ana@x.com");
}

#[tokio::test]
async fn test_get_unknown_user_returns_404_empty_body() {
    let app = create_test_router().await;

    let request = Request::builder()
        .uri(format!("/api/users/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_non_uuid_id_returns_404_empty_body() {
    let app = create_test_router().await;

    // Ids are opaque; one the service never issued simply does not exist
    let request = Request::builder()
        .uri("/api/users/999")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/users/999")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_list_users_returns_all_created_users() {
    let app = create_test_router().await;

    for (name, email) in [("Ana", "ana@x.com"), ("Bea", "bea@x.com")] {
        let response = app.clone().oneshot(post_user(name, email)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let request = Request::builder()
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
}

#[tokio::test]
async fn test_list_users_empty_store_returns_empty_array() {
    let app = create_test_router().await;

    let request = Request::builder()
        .uri("/api/users")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_user_then_get_returns_404() {
    let app = create_test_router().await;

    let response = app
        .clone()
        .oneshot(post_user("Ana", "ana@x.com"))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let request = Request::builder()
        .uri(format!("/api/users/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_user_returns_404_empty_body() {
    let app = create_test_router().await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}
