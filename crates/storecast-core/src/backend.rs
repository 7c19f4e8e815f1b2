//! Contract between message composition and the hosted data store.
//!
//! The composer only ever needs two things from the backend: the current
//! store directory (name-ordered) and a single-row message insert. Keeping
//! the seam this narrow lets tests drive the workflow with a counting mock
//! and keeps transport details out of the core.

use async_trait::async_trait;
use thiserror::Error;

use crate::message::{Message, NewMessage};
use crate::store::Store;

/// Backend call failure. Deliberately coarse: callers show a generic
/// failure and keep the user's input, they do not branch on the cause.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Could not reach the backend at all.
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Client-side misconfiguration (bad base URL, missing session).
    #[error("configuration error: {0}")]
    Config(String),
}

/// The two data-store operations message composition depends on.
#[async_trait]
pub trait MessageBackend: Send + Sync {
    /// Current store directory, ordered by store name.
    async fn list_stores(&self) -> Result<Vec<Store>, BackendError>;

    /// Persist one new message. The backend assigns `id` and
    /// `created_at` and returns the stored row.
    async fn insert_message(&self, message: &NewMessage) -> Result<Message, BackendError>;
}
