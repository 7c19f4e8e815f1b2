//! Message submission workflow.
//!
//! One entry point, [`MessageComposer::submit`]: run the local checks,
//! freeze the targeting selection into descriptors, then issue exactly one
//! insert. A submission already in flight blocks further inserts until it
//! settles.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::backend::MessageBackend;
use crate::error::SubmitError;
use crate::message::{Message, MessageDraft, NewMessage};
use crate::session::Session;
use crate::store::Store;

/// Drives message creation against a [`MessageBackend`].
pub struct MessageComposer<B> {
    backend: B,
    in_flight: AtomicBool,
}

impl<B: MessageBackend> MessageComposer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Fetch the store directory for composition.
    ///
    /// A fetch failure degrades to an empty directory with a warning
    /// instead of blocking composition; manual targeting does not need the
    /// directory at all.
    pub async fn load_directory(&self) -> Vec<Store> {
        match self.backend.list_stores().await {
            Ok(stores) => stores,
            Err(err) => {
                warn!(error = %err, "could not load store directory, continuing without it");
                Vec::new()
            }
        }
    }

    /// Validate the draft and persist it as a new message.
    ///
    /// All validation runs before the backend is touched; a draft that
    /// fails it costs no network call. While one submission is in flight
    /// any further call returns [`SubmitError::AlreadyInFlight`] without
    /// inserting. On backend failure the caller keeps its draft; nothing
    /// retries automatically.
    pub async fn submit(
        &self,
        session: &Session,
        draft: &MessageDraft,
        directory: &[Store],
    ) -> Result<Message, SubmitError> {
        let targeting = draft.validate()?;
        let stores = targeting.resolve(directory);

        let _guard =
            InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::AlreadyInFlight)?;

        let message = NewMessage {
            title: draft.title.clone(),
            body: draft.body.clone(),
            user_id: session.user_id.clone(),
            store_selection_type: targeting.mode(),
            stores,
        };

        let stored = self.backend.insert_message(&message).await?;
        info!(
            message_id = %stored.id,
            mode = %stored.store_selection_type,
            targets = stored.stores.len(),
            "message created"
        );
        Ok(stored)
    }
}

/// Holds the in-flight flag for the duration of one submission. Released
/// on drop so every exit path, including errors, re-arms the composer.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
        {
            Some(Self(flag))
        } else {
            None
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
