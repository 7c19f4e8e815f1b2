//! Wire types for the Storecast HTTP API.
//!
//! Shared by the server and every client so both sides agree on the JSON
//! shapes. [`crate::Message`] and [`crate::Store`] serialize directly as
//! response bodies and need no mirror types here.

use serde::{Deserialize, Serialize};

use crate::store::StoreDescriptor;
use crate::targeting::SelectionMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub email: String,
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    pub expires_at: i64,
}

/// Body of `POST /api/messages`. The creator's identity comes from the
/// bearer token, never from the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub title: String,
    pub body: String,
    pub store_selection_type: SelectionMode,
    pub stores: Vec<StoreDescriptor>,
}

/// Error payload used by every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
