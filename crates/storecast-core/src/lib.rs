//! Storecast Core Library
//!
//! Shared functionality for Storecast components:
//! - Store targeting model (manual codes, picklist selection, broadcast)
//! - Message submission workflow with duplicate-submit gating
//! - Backend contract implemented by HTTP clients and test mocks
//! - Wire types for the Storecast HTTP API

pub mod api;
pub mod backend;
pub mod error;
pub mod message;
pub mod session;
pub mod store;
pub mod targeting;
pub mod tracing_init;
pub mod workflow;

pub use backend::{BackendError, MessageBackend};
pub use error::{SubmitError, ValidationError};
pub use message::{Message, MessageDraft, NewMessage};
pub use session::Session;
pub use store::{Store, StoreDescriptor};
pub use targeting::{SelectionMode, TargetingSelection, parse_manual_codes};
pub use workflow::MessageComposer;
