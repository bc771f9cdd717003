//! Caller-supplied authorization forwarded to the remote store.

use std::fmt;

/// Authorization material for one call against the remote store.
///
/// With a user token the store is queried on behalf of that user;
/// without one the remote client falls back to its app-only identity.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialContext {
    user_access_token: Option<String>,
}

impl CredentialContext {
    /// App-only access.
    pub fn app() -> Self {
        Self::default()
    }

    /// Delegated access with the caller's bearer token.
    pub fn user(token: impl Into<String>) -> Self {
        Self {
            user_access_token: Some(token.into()),
        }
    }

    /// The delegated token, if any.
    pub fn user_access_token(&self) -> Option<&str> {
        self.user_access_token.as_deref()
    }
}

impl fmt::Debug for CredentialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.user_access_token.is_some() {
            "delegated"
        } else {
            "app"
        };
        f.debug_struct("CredentialContext")
            .field("mode", &mode)
            .finish()
    }
}
