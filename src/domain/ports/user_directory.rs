/// User directory port (trait) for dependency injection.
///
/// The engine consults the directory only at session initialization to
/// validate that both participants are known and active.
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Directory record for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier
    pub id: String,

    /// Whether the account is active
    pub active: bool,

    /// Display name, when the directory provides one
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Lookup interface over the external user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Retrieves a user by identifier.
    ///
    /// # Returns
    /// - `Some(UserRecord)` if the user is known
    /// - `None` if the user is absent
    ///
    /// # Errors
    /// Returns error if the directory is unreachable.
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>>;
}
