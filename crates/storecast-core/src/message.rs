//! Message records and the pre-submission draft.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::store::StoreDescriptor;
use crate::targeting::{SelectionMode, TargetingSelection};

/// A stored message. Immutable once created; there is no edit or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub title: String,
    pub body: String,
    pub user_id: String,
    pub store_selection_type: SelectionMode,
    /// Frozen targeting snapshot from composition time.
    pub stores: Vec<StoreDescriptor>,
    pub created_at: i64,
}

/// The single-row insert payload. `id` and `created_at` are assigned by
/// the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub title: String,
    pub body: String,
    pub user_id: String,
    pub store_selection_type: SelectionMode,
    pub stores: Vec<StoreDescriptor>,
}

/// What the user has typed so far. `targeting: None` means no mode has
/// been chosen yet.
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    pub title: String,
    pub body: String,
    pub targeting: Option<TargetingSelection>,
}

impl MessageDraft {
    /// Run every local check, in a fixed order: required fields first,
    /// then mode chosen, then the mode's own payload check. Returns the
    /// selection so callers cannot submit an unvalidated draft.
    pub fn validate(&self) -> Result<&TargetingSelection, ValidationError> {
        if self.title.trim().is_empty() || self.body.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField);
        }
        let targeting = self
            .targeting
            .as_ref()
            .ok_or(ValidationError::NoModeSelected)?;
        targeting.validate()?;
        Ok(targeting)
    }
}
