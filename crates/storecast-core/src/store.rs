//! Store directory records and the frozen per-message store descriptors.

use serde::{Deserialize, Serialize};

/// A retail store as it exists in the directory.
///
/// The directory is maintained outside this system; nothing here ever
/// writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Short human-entered identifier, e.g. `DT001`.
    pub code: String,
    pub created_at: i64,
}

/// One targeted store as frozen onto a message at composition time.
///
/// A descriptor is a snapshot, not a reference: later edits to the store
/// directory never change what a stored message says it was sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DescriptorRow", into = "DescriptorRow")]
pub enum StoreDescriptor {
    /// Copied from a directory store that existed when the message was
    /// composed.
    Resolved {
        id: String,
        name: String,
        code: String,
    },
    /// Hand-entered code that was never checked against the directory.
    Manual { code: String, name: String },
}

impl StoreDescriptor {
    /// Snapshot a directory store.
    pub fn resolved(store: &Store) -> Self {
        Self::Resolved {
            id: store.id.clone(),
            name: store.name.clone(),
            code: store.code.clone(),
        }
    }

    /// Descriptor for a hand-entered code. The display name is synthesized
    /// from the code since there is nothing to look up.
    pub fn manual(code: impl Into<String>) -> Self {
        let code = code.into();
        let name = format!("Store {code}");
        Self::Manual { code, name }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Resolved { code, .. } | Self::Manual { code, .. } => code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Resolved { name, .. } | Self::Manual { name, .. } => name,
        }
    }

    pub const fn is_manual(&self) -> bool {
        matches!(self, Self::Manual { .. })
    }
}

/// Stored/wire form of a descriptor: `{id?, name, code, manual?}`.
///
/// `id` is present only for resolved entries and `manual: true` only for
/// manual ones. Classification on the way back in is exhaustive: any row
/// flagged manual, or lacking an id, is treated as a manual entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DescriptorRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    code: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    manual: bool,
}

impl From<DescriptorRow> for StoreDescriptor {
    fn from(row: DescriptorRow) -> Self {
        match row {
            DescriptorRow {
                manual: true,
                code,
                name,
                ..
            }
            | DescriptorRow {
                id: None,
                code,
                name,
                ..
            } => Self::Manual { code, name },
            DescriptorRow {
                id: Some(id),
                name,
                code,
                ..
            } => Self::Resolved { id, name, code },
        }
    }
}

impl From<StoreDescriptor> for DescriptorRow {
    fn from(descriptor: StoreDescriptor) -> Self {
        match descriptor {
            StoreDescriptor::Resolved { id, name, code } => Self {
                id: Some(id),
                name,
                code,
                manual: false,
            },
            StoreDescriptor::Manual { code, name } => Self {
                id: None,
                name,
                code,
                manual: true,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn downtown() -> Store {
        Store {
            id: "store-1".into(),
            name: "Downtown".into(),
            code: "DT001".into(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn resolved_serializes_without_manual_flag() {
        let json = serde_json::to_value(StoreDescriptor::resolved(&downtown())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "store-1", "name": "Downtown", "code": "DT001"})
        );
    }

    #[test]
    fn manual_serializes_without_id() {
        let json = serde_json::to_value(StoreDescriptor::manual("DT001")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Store DT001", "code": "DT001", "manual": true})
        );
    }

    #[test]
    fn manual_name_is_synthesized_from_code() {
        let descriptor = StoreDescriptor::manual("AB003");
        assert_eq!(descriptor.name(), "Store AB003");
        assert_eq!(descriptor.code(), "AB003");
        assert!(descriptor.is_manual());
    }

    #[test]
    fn row_without_id_deserializes_as_manual() {
        let descriptor: StoreDescriptor =
            serde_json::from_value(serde_json::json!({"name": "Store X9", "code": "X9"})).unwrap();
        assert_eq!(descriptor, StoreDescriptor::manual("X9"));
    }

    #[test]
    fn manual_flag_wins_over_stray_id() {
        let descriptor: StoreDescriptor = serde_json::from_value(serde_json::json!({
            "id": "store-1", "name": "Store DT001", "code": "DT001", "manual": true
        }))
        .unwrap();
        assert!(descriptor.is_manual());
    }

    #[test]
    fn descriptor_round_trips() {
        for descriptor in [
            StoreDescriptor::resolved(&downtown()),
            StoreDescriptor::manual("ml002"),
        ] {
            let json = serde_json::to_string(&descriptor).unwrap();
            let back: StoreDescriptor = serde_json::from_str(&json).unwrap();
            assert_eq!(back, descriptor);
        }
    }
}
