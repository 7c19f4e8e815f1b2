//! Database queries for the Storecast server.

use storecast_core::NewMessage;

use super::db::{DatabaseError, StorecastDatabase, unix_timestamp};
use super::models::{MessageRow, SessionRow, StoreRow, UserRow};

impl StorecastDatabase {
    // =========================================================================
    // User queries
    // =========================================================================

    /// Create a new user.
    pub async fn create_user(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<UserRow, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(email)
            .bind(password_hash)
            .bind(now)
            .execute(self.pool())
            .await?;

        self.get_user(id).await
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<UserRow, DatabaseError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {id}")))
    }

    /// Get a user by email. This is the login lookup.
    pub async fn get_user_by_email(&self, email: &str) -> Result<UserRow, DatabaseError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User with email {email}")))
    }

    // =========================================================================
    // Session queries
    // =========================================================================

    /// Store a new session. Only the token hash is persisted, never the
    /// token itself.
    pub async fn create_session(
        &self,
        id: &str,
        user_id: &str,
        token_hash: &str,
        expires_at: i64,
    ) -> Result<SessionRow, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_session(id).await
    }

    /// Get a session by ID.
    pub async fn get_session(&self, id: &str) -> Result<SessionRow, DatabaseError> {
        sqlx::query_as::<_, SessionRow>("SELECT * FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Session {id}")))
    }

    /// Resolve a token hash to its user, if the session is still live
    /// (not revoked, not expired).
    pub async fn get_session_user(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserRow>, DatabaseError> {
        let now = unix_timestamp();

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.email, u.password_hash, u.created_at
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.token_hash = ? AND s.revoked = 0 AND s.expires_at > ?",
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    /// Revoke the session carrying this token hash.
    pub async fn revoke_session_by_hash(&self, token_hash: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE sessions SET revoked = 1 WHERE token_hash = ?")
            .bind(token_hash)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Store directory queries
    // =========================================================================

    /// Add a store to the directory.
    pub async fn create_store(
        &self,
        id: &str,
        name: &str,
        code: &str,
    ) -> Result<StoreRow, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query("INSERT INTO stores (id, name, code, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(code)
            .bind(now)
            .execute(self.pool())
            .await?;

        sqlx::query_as::<_, StoreRow>("SELECT * FROM stores WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Store {id}")))
    }

    /// Look up a store by its short code.
    pub async fn get_store_by_code(&self, code: &str) -> Result<Option<StoreRow>, DatabaseError> {
        let store = sqlx::query_as::<_, StoreRow>("SELECT * FROM stores WHERE code = ?")
            .bind(code)
            .fetch_optional(self.pool())
            .await?;

        Ok(store)
    }

    /// The whole directory, ordered by store name.
    pub async fn list_stores(&self) -> Result<Vec<StoreRow>, DatabaseError> {
        let stores = sqlx::query_as::<_, StoreRow>("SELECT * FROM stores ORDER BY name")
            .fetch_all(self.pool())
            .await?;

        Ok(stores)
    }

    // =========================================================================
    // Message queries
    // =========================================================================

    /// Persist one new message. The descriptor array is serialized into
    /// the `stores` column exactly as composed.
    pub async fn insert_message(
        &self,
        id: &str,
        message: &NewMessage,
    ) -> Result<MessageRow, DatabaseError> {
        let stores = serde_json::to_string(&message.stores)
            .map_err(|e| DatabaseError::Decode(format!("serialize stores: {e}")))?;
        let now = unix_timestamp();

        sqlx::query(
            "INSERT INTO messages (id, title, body, user_id, store_selection_type, stores, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&message.title)
        .bind(&message.body)
        .bind(&message.user_id)
        .bind(message.store_selection_type.as_str())
        .bind(&stores)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_message(id).await
    }

    /// Get a message by ID.
    pub async fn get_message(&self, id: &str) -> Result<MessageRow, DatabaseError> {
        sqlx::query_as::<_, MessageRow>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Message {id}")))
    }

    /// All messages, newest first.
    pub async fn list_messages(&self) -> Result<Vec<MessageRow>, DatabaseError> {
        let messages =
            sqlx::query_as::<_, MessageRow>("SELECT * FROM messages ORDER BY created_at DESC")
                .fetch_all(self.pool())
                .await?;

        Ok(messages)
    }
}
