//! Savings goal data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{GoalId, UserId};

/// A savings goal. Achievement is derived from the live balance, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal ID.
    pub id: GoalId,
    /// Owning user.
    pub owner_id: UserId,
    /// Goal name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Target balance, always positive.
    pub target_amount: Decimal,
}

impl Goal {
    /// Returns true if the balance meets or exceeds the target.
    #[must_use]
    pub fn is_achieved(&self, balance: Decimal) -> bool {
        self.target_amount <= balance
    }
}

/// Input for creating or editing a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    /// Goal name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Target balance, must be positive.
    pub target_amount: Decimal,
}

/// Goal representation returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    /// Goal ID.
    pub id: GoalId,
    /// Owning user.
    pub owner_id: UserId,
    /// Goal name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Target balance.
    pub target_amount: Decimal,
}

impl From<&Goal> for GoalView {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            owner_id: goal.owner_id,
            name: goal.name.clone(),
            description: goal.description.clone(),
            target_amount: goal.target_amount,
        }
    }
}

/// A goal measured against the current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// The goal.
    pub goal: GoalView,
    /// Balance the goal was measured against.
    pub balance: Decimal,
    /// Whether the balance meets the target.
    pub achieved: bool,
    /// Amount still missing, zero once achieved.
    pub remaining: Decimal,
}

impl GoalProgress {
    /// Measures a goal against a balance.
    #[must_use]
    pub fn measure(goal: &Goal, balance: Decimal) -> Self {
        let achieved = goal.is_achieved(balance);
        let remaining = if achieved {
            Decimal::ZERO
        } else {
            goal.target_amount - balance
        };

        Self {
            goal: GoalView::from(goal),
            balance,
            achieved,
            remaining,
        }
    }
}
