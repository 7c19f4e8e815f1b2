//! Row models for Storecast server storage.

use serde::{Deserialize, Serialize};

use storecast_core::{Message, SelectionMode, Store, StoreDescriptor};

use super::db::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionRow {
    pub id: String,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: i64,
    pub revoked: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoreRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub created_at: i64,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

/// A message as stored: the descriptor array and the mode tag are TEXT
/// columns and get decoded on the way out.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRow {
    pub id: String,
    pub title: String,
    pub body: String,
    pub user_id: String,
    pub store_selection_type: String,
    pub stores: String,
    pub created_at: i64,
}

impl MessageRow {
    /// Decode the stored row into the wire-level message.
    pub fn into_message(self) -> Result<Message, DatabaseError> {
        let stores: Vec<StoreDescriptor> = serde_json::from_str(&self.stores)
            .map_err(|e| DatabaseError::Decode(format!("message {} stores: {e}", self.id)))?;
        let store_selection_type: SelectionMode = self
            .store_selection_type
            .parse()
            .map_err(|e| DatabaseError::Decode(format!("message {}: {e}", self.id)))?;

        Ok(Message {
            id: self.id,
            title: self.title,
            body: self.body,
            user_id: self.user_id,
            store_selection_type,
            stores,
            created_at: self.created_at,
        })
    }
}
