//! Error types for the `Storecast` core library.

use thiserror::Error;

/// A draft failed one of the local pre-submission checks.
///
/// These are user-correctable input problems. They are raised before any
/// backend call is made and are never logged as faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title or body is empty.
    #[error("Please fill in all required fields")]
    MissingRequiredField,

    /// No targeting mode was chosen.
    #[error("Please select a store option")]
    NoModeSelected,

    /// Manual mode with a blank code box.
    #[error("Please enter store codes")]
    EmptyManualInput,

    /// Select mode with an empty picklist selection.
    #[error("Please select at least one store")]
    EmptySelection,
}

/// A submission attempt failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The draft did not pass local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another submission is still in flight; nothing was sent.
    #[error("a submission is already in progress")]
    AlreadyInFlight,

    /// The backend rejected or failed the insert. The caller keeps its
    /// draft and may retry explicitly.
    #[error("failed to create message: {0}")]
    Backend(#[from] crate::backend::BackendError),
}
