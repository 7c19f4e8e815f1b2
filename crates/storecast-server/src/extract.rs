//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth;
use crate::error::ApiError;
use crate::routes::AppState;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header via the sessions table. Rejects with 401 when the header is
/// missing or the session is unknown, expired, or revoked.
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
}

/// Pull the raw bearer token out of the request headers.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let user = state
            .db
            .get_session_user(&auth::hash_token(token))
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self {
            user_id: user.id,
            email: user.email,
        })
    }
}
