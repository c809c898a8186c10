use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use storage::{Database, services::accounts};
use tower::ServiceExt;

const SOURCE: &str = "def a():\n    pass\n# hi\n";

async fn setup() -> Router {
    let db = Database::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    db.run_migrations().await.expect("Failed to run migrations");
    accounts::ensure_admin(db.pool(), "admin", "admin123")
        .await
        .expect("Failed to create admin");
    web::app(db)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": username, "password": "password1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, username, "password1").await
}

async fn upload(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/submissions",
        Some(token),
        Some(json!({
            "title": title,
            "description": "test upload",
            "tags": "sort,array",
            "category": "sorting",
            "source_text": SOURCE
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {}", body);
    body["submission_id"].as_i64().unwrap()
}

#[tokio::test]
async fn upload_review_and_browse() {
    let app = setup().await;
    let admin = login(&app, "admin", "admin123").await;
    let alice = register_and_login(&app, "alice").await;

    let id = upload(&app, &alice, "Bubble sort").await;

    let (_, found) = send(&app, Method::GET, "/api/submissions", None, None).await;
    assert_eq!(found, json!([]));

    let (status, reviewed) = send(
        &app,
        Method::POST,
        &format!("/api/admin/submissions/{}/review", id),
        Some(&admin),
        Some(json!({ "action": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["status"], "approved");

    let (status, found) = send(
        &app,
        Method::GET,
        "/api/submissions?query=bubble&category=sorting",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["owner_name"], "alice");
    assert_eq!(found[0]["score"].as_f64(), Some(11.0));

    let (_, log) = send(
        &app,
        Method::GET,
        &format!("/api/admin/audit-log?submission_id={}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(log.as_array().unwrap().len(), 1);
    assert_eq!(log[0]["action"], "approved");
    assert_eq!(log[0]["actor_name"], "admin");
}

#[tokio::test]
async fn upload_requires_a_session() {
    let app = setup().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/submissions",
        None,
        Some(json!({ "title": "x", "source_text": SOURCE })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/stats", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unparsable_upload_is_unprocessable() {
    let app = setup().await;
    let alice = register_and_login(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/submissions",
        Some(&alice),
        Some(json!({ "title": "broken", "source_text": "def broken(:\n" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn regular_users_cannot_use_admin_endpoints() {
    let app = setup().await;
    let alice = register_and_login(&app, "alice").await;
    let id = upload(&app, &alice, "Mine").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/admin/submissions/{}/review", id),
        Some(&alice),
        Some(json!({ "action": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/strategy",
        Some(&alice),
        Some(json!({ "func_weight": 5, "comment_weight": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/admin/pending", Some(&alice), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn strategy_update_rescores_and_is_recorded() {
    let app = setup().await;
    let admin = login(&app, "admin", "admin123").await;
    let alice = register_and_login(&app, "alice").await;
    let id = upload(&app, &alice, "Scored").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/strategy",
        Some(&admin),
        Some(json!({ "func_weight": 5, "comment_weight": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], json!({ "func_weight": 10, "comment_weight": 1 }));
    assert_eq!(body["current"], json!({ "func_weight": 5, "comment_weight": 1 }));
    assert_eq!(body["rescored_count"], 1);

    let (_, detail) = send(&app, Method::GET, &format!("/api/submissions/{}", id), None, None).await;
    assert_eq!(detail["score"].as_f64(), Some(6.0));

    let (_, history) = send(&app, Method::GET, "/api/strategy/history", None, None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["actor_name"], "admin");
    assert_eq!(history[0]["new_func_weight"], 5);
    assert_eq!(history[0]["action"], "update_scoring(func=5, comment=1)");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/strategy",
        Some(&admin),
        Some(json!({ "func_weight": -1, "comment_weight": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, current) = send(&app, Method::GET, "/api/strategy", None, None).await;
    assert_eq!(current, json!({ "func_weight": 5, "comment_weight": 1 }));
}

#[tokio::test]
async fn download_returns_source_and_counts() {
    let app = setup().await;
    let alice = register_and_login(&app, "alice").await;
    let id = upload(&app, &alice, "Fetched").await;

    let request = Request::builder()
        .uri(format!("/api/submissions/{}/download", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/x-python")
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], SOURCE.as_bytes());

    let (_, detail) = send(&app, Method::GET, &format!("/api/submissions/{}", id), None, None).await;
    assert_eq!(detail["download_count"], 1);

    let (_, stats) = send(&app, Method::GET, "/api/stats", None, None).await;
    assert_eq!(stats["total_downloads"], 1);
    assert_eq!(stats["pending_submissions"], 1);
    assert_eq!(stats["total_users"], 2);
}

#[tokio::test]
async fn delete_removes_submission_and_comments() {
    let app = setup().await;
    let admin = login(&app, "admin", "admin123").await;
    let alice = register_and_login(&app, "alice").await;
    let id = upload(&app, &alice, "Doomed").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/submissions/{}/comments", id),
        Some(&alice),
        Some(json!({ "rating": 4, "content": "nice" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/submissions/{}/comments", id),
        Some(&alice),
        Some(json!({ "rating": 9, "content": "too high" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/admin/submissions/{}", id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/submissions/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = send(&app, Method::GET, "/api/stats", None, None).await;
    assert_eq!(stats["total_comments"], 0);
    assert_eq!(stats["total_submissions"], 0);
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let app = setup().await;
    let alice = register_and_login(&app, "alice").await;

    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");
    assert_eq!(me["role"], "user");

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&alice), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup().await;

    let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/strategy"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}
