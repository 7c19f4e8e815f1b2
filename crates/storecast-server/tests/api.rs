//! End-to-end tests for the Storecast HTTP API.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use storecast_core::Store;
use storecast_core::targeting::TargetingSelection;
use storecast_server::auth;
use storecast_server::routes::{AppState, build_router};
use storecast_server::storage::StorecastDatabase;

async fn setup() -> (Router, AppState) {
    let db = StorecastDatabase::open_in_memory().await.unwrap();
    let state = AppState {
        db,
        session_ttl: 3600,
    };
    (build_router(state.clone()), state)
}

/// Standard "alice" account used by most tests.
async fn create_alice(state: &AppState) {
    let hash = auth::hash_password("password123").unwrap();
    state
        .db
        .create_user("u1", "alice@example.com", &hash)
        .await
        .unwrap();
}

/// Send a request and return (status, parsed body). Non-JSON bodies come
/// back as a plain JSON string.
async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// Log alice in over HTTP and return her bearer token.
async fn login_alice(app: &Router) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn healthz_is_public() {
    let (app, _state) = setup().await;
    let (status, body) = request(&app, "GET", "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn login_issues_session_token() {
    let (app, state) = setup().await;
    create_alice(&state).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "password123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
    assert_eq!(body["email"], "alice@example.com");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(body["expires_at"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, state) = setup().await;
    create_alice(&state).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    // Unknown email answers identically to a wrong password.
    let (status, body) = request(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn api_requires_a_valid_bearer_token() {
    let (app, _state) = setup().await;

    for uri in ["/api/stores", "/api/messages", "/api/messages/m1"] {
        let (status, _) = request(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "no token: {uri}");

        let (status, _) = request(&app, "GET", uri, Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "bad token: {uri}");
    }
}

#[tokio::test]
async fn stores_come_back_name_ordered() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    state.db.create_store("st1", "Mall", "ML002").await.unwrap();
    state
        .db
        .create_store("st2", "Airport", "AP004")
        .await
        .unwrap();

    let token = login_alice(&app).await;
    let (status, body) = request(&app, "GET", "/api/stores", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Airport", "Mall"]);
}

#[tokio::test]
async fn manual_message_round_trips() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    let token = login_alice(&app).await;

    let payload = json!({
        "title": "Holiday hours",
        "body": "Closing early on the 24th.",
        "store_selection_type": "manual",
        "stores": [
            {"name": "Store DT001", "code": "DT001", "manual": true},
            {"name": "Store ml002", "code": "ml002", "manual": true}
        ]
    });

    let (status, created) =
        request(&app, "POST", "/api/messages", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], "u1");
    assert_eq!(created["store_selection_type"], "manual");
    assert_eq!(created["stores"][1]["code"], "ml002");
    assert!(created["created_at"].as_i64().unwrap() > 0);

    let id = created["id"].as_str().unwrap();

    let (status, listed) = request(&app, "GET", "/api/messages", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], *id);

    let (status, fetched) = request(
        &app,
        "GET",
        &format!("/api/messages/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn select_message_freezes_directory_snapshot() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    state
        .db
        .create_store("st1", "Downtown", "DT001")
        .await
        .unwrap();
    state.db.create_store("st2", "Mall", "ML002").await.unwrap();
    let token = login_alice(&app).await;

    // Compose the way a client does: fetch the directory, resolve the
    // selection against it, send the frozen descriptors.
    let (_, stores_body) = request(&app, "GET", "/api/stores", Some(&token), None).await;
    let directory: Vec<Store> = serde_json::from_value(stores_body).unwrap();
    let selection = TargetingSelection::Select {
        store_ids: vec!["st2".into()],
    };

    let payload = json!({
        "title": "Mall only",
        "body": "New opening hours.",
        "store_selection_type": selection.mode(),
        "stores": selection.resolve(&directory),
    });

    let (status, created) =
        request(&app, "POST", "/api/messages", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["store_selection_type"], "select");
    assert_eq!(
        created["stores"],
        json!([{"id": "st2", "name": "Mall", "code": "ML002"}])
    );
}

#[tokio::test]
async fn message_identity_comes_from_the_session() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    let token = login_alice(&app).await;

    // A spoofed user_id in the payload is ignored.
    let payload = json!({
        "title": "Hello",
        "body": "World",
        "user_id": "someone-else",
        "store_selection_type": "all",
        "stores": []
    });

    let (status, created) =
        request(&app, "POST", "/api/messages", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], "u1");
}

#[tokio::test]
async fn empty_title_is_rejected_with_422() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    let token = login_alice(&app).await;

    let payload = json!({
        "title": "  ",
        "body": "World",
        "store_selection_type": "all",
        "stores": []
    });

    let (status, body) =
        request(&app, "POST", "/api/messages", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Title and body are required");

    let (_, listed) = request(&app, "GET", "/api/messages", Some(&token), None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_message_is_404() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    let token = login_alice(&app).await;

    let (status, _) = request(&app, "GET", "/api/messages/nope", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let (app, state) = setup().await;
    create_alice(&state).await;
    let token = login_alice(&app).await;

    let (status, _) = request(&app, "POST", "/api/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(&app, "GET", "/api/stores", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
