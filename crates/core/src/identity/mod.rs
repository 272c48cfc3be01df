//! The acting user.
//!
//! Users are created and mutated by an external identity collaborator. The core
//! only reads them: `id` for ownership checks, `email` as notification address and
//! `name` for statement headers.

use serde::{Deserialize, Serialize};
use tally_shared::types::UserId;

/// User role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular account holder.
    #[default]
    User,
    /// Administrator.
    Admin,
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address used for notifications.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
}

impl User {
    /// Creates an active, unsaved user with the `User` role.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::UNSET,
            name: name.into(),
            email: email.into(),
            role: Role::User,
            active: true,
        }
    }

    /// Returns true if this user owns a record with the given owner ID.
    #[must_use]
    pub fn owns(&self, owner_id: UserId) -> bool {
        self.id == owner_id
    }
}
