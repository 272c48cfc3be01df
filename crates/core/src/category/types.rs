//! Category data types.

use serde::{Deserialize, Serialize};
use tally_shared::types::{CategoryId, UserId};

/// A named spending category, unique per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Owning user.
    pub owner_id: UserId,
}

impl Category {
    /// Creates an unsaved category.
    #[must_use]
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            id: CategoryId::UNSET,
            name: name.into(),
            owner_id,
        }
    }
}
