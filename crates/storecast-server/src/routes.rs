//! HTTP routes for the Storecast API.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use storecast_core::api::{CreateMessageRequest, LoginRequest, LoginResponse};
use storecast_core::{Message, NewMessage, Store};

use crate::auth;
use crate::error::ApiError;
use crate::extract::{CurrentUser, bearer_token};
use crate::storage::{DatabaseError, MessageRow, StorecastDatabase, unix_timestamp};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: StorecastDatabase,
    /// Lifetime of a newly issued session, in seconds.
    pub session_ttl: i64,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/stores", get(list_stores))
        .route("/api/messages", get(list_messages).post(create_message))
        .route("/api/messages/{id}", get(get_message))
        .layer(cors)
        .with_state(state)
}

/// `GET /healthz` -- liveness probe, unauthenticated.
async fn healthz() -> &'static str {
    "ok"
}

/// `POST /api/login` -- verify credentials and issue a session token.
#[instrument(skip(state, req), fields(endpoint = "login"))]
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .db
        .get_user_by_email(&req.email)
        .await
        .map_err(|_| ApiError::InvalidCredentials)?;

    let valid = auth::verify_password(&req.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {e}")))?;

    if !valid {
        warn!(email = %req.email, "Failed login attempt");
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::new_session_token();
    let expires_at = unix_timestamp() + state.session_ttl;
    let session_id = uuid::Uuid::new_v4().to_string();
    state
        .db
        .create_session(&session_id, &user.id, &auth::hash_token(&token), expires_at)
        .await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        email: user.email,
        token,
        expires_at,
    }))
}

/// `POST /api/logout` -- revoke the presented session token.
#[instrument(skip(state, headers), fields(endpoint = "logout"))]
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)?;
    let revoked = state.db.revoke_session_by_hash(&auth::hash_token(token)).await?;

    if revoked {
        info!("Session revoked");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/stores` -- the store directory, name-ordered.
#[instrument(skip(state, _user), fields(endpoint = "list_stores"))]
async fn list_stores(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Store>>, ApiError> {
    let stores = state.db.list_stores().await?;
    Ok(Json(stores.into_iter().map(Store::from).collect()))
}

/// `GET /api/messages` -- every message, newest first.
#[instrument(skip(state, _user), fields(endpoint = "list_messages"))]
async fn list_messages(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Message>>, ApiError> {
    let rows = state.db.list_messages().await?;
    let messages = rows
        .into_iter()
        .map(MessageRow::into_message)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(messages))
}

/// `GET /api/messages/{id}` -- one message.
#[instrument(skip(state, _user), fields(endpoint = "get_message"))]
async fn get_message(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let row = state.db.get_message(&id).await.map_err(|e| match e {
        DatabaseError::NotFound(_) => ApiError::NotFound(format!("Message {id}")),
        other => ApiError::Database(other),
    })?;

    Ok(Json(row.into_message()?))
}

/// `POST /api/messages` -- persist one composed message.
///
/// The creator's identity comes from the session, never from the payload.
/// Emptiness of title and body is re-checked here as a backstop; clients
/// validate before they ever reach the network.
#[instrument(skip(state, user, req), fields(endpoint = "create_message"))]
async fn create_message(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    if req.title.trim().is_empty() || req.body.trim().is_empty() {
        return Err(ApiError::Validation("Title and body are required".into()));
    }

    let message = NewMessage {
        title: req.title,
        body: req.body,
        user_id: user.user_id,
        store_selection_type: req.store_selection_type,
        stores: req.stores,
    };

    let id = uuid::Uuid::new_v4().to_string();
    let stored = state.db.insert_message(&id, &message).await?.into_message()?;

    info!(
        message_id = %stored.id,
        user_id = %stored.user_id,
        mode = %stored.store_selection_type,
        targets = stored.stores.len(),
        "Message created"
    );

    Ok((StatusCode::CREATED, Json(stored)))
}
