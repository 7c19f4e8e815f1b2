//! Authenticated-user session handed to operations that need an identity.

use serde::{Deserialize, Serialize};

/// Who is acting, plus the bearer token that proves it.
///
/// Always passed explicitly; nothing in this crate keeps ambient auth
/// state. Persistence (config file, keychain, whatever) is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
}
