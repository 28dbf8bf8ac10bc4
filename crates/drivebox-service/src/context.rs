//! The authenticated principal acting on a request.

use serde::{Deserialize, Serialize};

/// The authenticated actor issuing a request.
///
/// Produced by the transport layer after token verification and passed
/// into every engine operation; the engine never authenticates anyone
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Identity; also the `owner` value stamped on created entities.
    pub username: String,
    /// Admins bypass ownership filtering entirely.
    pub is_admin: bool,
}

impl Principal {
    /// Create a new principal.
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// Owner filter for listing queries: None for admins (unfiltered).
    pub fn owner_filter(&self) -> Option<&str> {
        if self.is_admin {
            None
        } else {
            Some(&self.username)
        }
    }
}
