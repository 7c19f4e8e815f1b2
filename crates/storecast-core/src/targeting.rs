//! Store targeting: how a message picks which stores it is for.
//!
//! Three modes exist. `manual` carries free-typed comma-separated codes,
//! `select` carries ids picked from the directory, `all` broadcasts to the
//! whole directory. Whatever the mode, targeting normalizes to a flat list
//! of [`StoreDescriptor`]s that is frozen onto the message.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ValidationError;
use crate::store::{Store, StoreDescriptor};

/// The `store_selection_type` tag persisted on every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Manual,
    Select,
    All,
}

impl SelectionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Select => "select",
            Self::All => "all",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = UnknownSelectionMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "select" => Ok(Self::Select),
            "all" => Ok(Self::All),
            other => Err(UnknownSelectionMode(other.to_string())),
        }
    }
}

/// A `store_selection_type` value outside the three known tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown store selection type: {0}")]
pub struct UnknownSelectionMode(pub String);

/// A chosen targeting mode together with its payload.
///
/// "No mode chosen yet" is `Option<TargetingSelection>::None` on the
/// draft; it is not a variant here, so a selection in hand is always
/// submittable once its own payload check passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetingSelection {
    /// Raw comma-separated store codes, exactly as typed.
    Manual { codes: String },
    /// Directory store ids, in the order the user picked them.
    Select { store_ids: Vec<String> },
    /// Every store in the directory at composition time.
    All,
}

impl TargetingSelection {
    pub const fn mode(&self) -> SelectionMode {
        match self {
            Self::Manual { .. } => SelectionMode::Manual,
            Self::Select { .. } => SelectionMode::Select,
            Self::All => SelectionMode::All,
        }
    }

    /// Mode-specific payload check. `all` has no precondition: an empty
    /// directory is a valid (empty) broadcast.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Manual { codes } if codes.trim().is_empty() => {
                Err(ValidationError::EmptyManualInput)
            }
            Self::Select { store_ids } if store_ids.is_empty() => {
                Err(ValidationError::EmptySelection)
            }
            _ => Ok(()),
        }
    }

    /// Normalize this selection against a directory snapshot into the
    /// descriptor list that gets persisted.
    ///
    /// Selected ids that no longer resolve are dropped rather than treated
    /// as errors; the result may be shorter than the selection. Manual
    /// codes are taken as given, duplicates and unknown codes included.
    pub fn resolve(&self, directory: &[Store]) -> Vec<StoreDescriptor> {
        match self {
            Self::All => directory.iter().map(StoreDescriptor::resolved).collect(),
            Self::Select { store_ids } => store_ids
                .iter()
                .filter_map(|id| match directory.iter().find(|store| &store.id == id) {
                    Some(store) => Some(StoreDescriptor::resolved(store)),
                    None => {
                        debug!(store_id = %id, "selected store missing from directory, dropping");
                        None
                    }
                })
                .collect(),
            Self::Manual { codes } => parse_manual_codes(codes)
                .into_iter()
                .map(StoreDescriptor::manual)
                .collect(),
        }
    }

    /// Human-readable preview of the current selection, shown before
    /// submission.
    pub fn summary(&self, directory: &[Store]) -> String {
        match self {
            Self::All => "All stores".to_string(),
            Self::Manual { codes } => codes.clone(),
            Self::Select { store_ids } => store_ids
                .iter()
                .filter_map(|id| directory.iter().find(|store| &store.id == id))
                .map(|store| store.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Split raw manual input on commas, trim each piece, drop empties.
pub fn parse_manual_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
        .collect()
}
