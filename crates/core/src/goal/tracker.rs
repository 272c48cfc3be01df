//! Goal tracker.

use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::types::GoalId;
use tally_shared::{AppError, Notifier};
use tracing::{debug, info, warn};

use super::error::GoalError;
use super::types::{Goal, GoalInput, GoalProgress, GoalView};
use crate::events::{LedgerEvent, LedgerSubscriber};
use crate::identity::User;
use crate::ledger::{LedgerQueries, MAX_AMOUNT, Transaction};
use crate::store::{GoalStore, UserStore};

const ACHIEVED_SUBJECT: &str = "Goals achieved";

/// Owns savings goals and reports the ones the live balance reaches.
///
/// Nothing records that a goal was already announced: every mutation that leaves
/// the balance at or above a target reports that goal again.
pub struct GoalTracker {
    goals: Arc<dyn GoalStore>,
    users: Arc<dyn UserStore>,
    ledger: LedgerQueries,
    notifier: Arc<dyn Notifier>,
}

impl GoalTracker {
    /// Creates a tracker.
    pub fn new(
        goals: Arc<dyn GoalStore>,
        users: Arc<dyn UserStore>,
        ledger: LedgerQueries,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            goals,
            users,
            ledger,
            notifier,
        }
    }

    /// Creates a goal owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` or `NonPositiveTarget` for invalid input.
    pub fn add_goal(&self, owner: &User, input: GoalInput) -> Result<GoalView, GoalError> {
        let (name, description) = validate(&input)?;
        let saved = self.goals.save_goal(Goal {
            id: GoalId::UNSET,
            owner_id: owner.id,
            name,
            description,
            target_amount: input.target_amount,
        })?;
        info!(
            owner_id = %owner.id,
            goal_id = %saved.id,
            target = %saved.target_amount,
            "Goal created"
        );
        Ok(GoalView::from(&saved))
    }

    /// Replaces name, description and target of one of the owner's goals.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the goal is absent or not owned by `owner`.
    pub fn edit_goal(
        &self,
        id: GoalId,
        owner: &User,
        input: GoalInput,
    ) -> Result<GoalView, GoalError> {
        let goal = self.load_owned(id, owner)?;
        let (name, description) = validate(&input)?;
        let saved = self.goals.save_goal(Goal {
            name,
            description,
            target_amount: input.target_amount,
            ..goal
        })?;
        info!(owner_id = %owner.id, goal_id = %id, "Goal updated");
        Ok(GoalView::from(&saved))
    }

    /// Deletes one of the owner's goals.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the goal is absent or not owned by `owner`.
    pub fn delete_goal(&self, id: GoalId, owner: &User) -> Result<(), GoalError> {
        self.load_owned(id, owner)?;
        self.goals.delete_goal(id)?;
        info!(owner_id = %owner.id, goal_id = %id, "Goal deleted");
        Ok(())
    }

    /// Loads one of the owner's goals.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the goal is absent or not owned by `owner`.
    pub fn get_goal(&self, id: GoalId, owner: &User) -> Result<GoalView, GoalError> {
        self.load_owned(id, owner).map(|g| GoalView::from(&g))
    }

    /// Lists the owner's goals.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn get_all_by_owner(&self, owner: &User) -> Result<Vec<GoalView>, GoalError> {
        debug!(owner_id = %owner.id, "Listing goals");
        let goals = self.goals.find_goals_by_owner(owner.id)?;
        Ok(goals.iter().map(GoalView::from).collect())
    }

    /// Measures every goal of the owner against the current balance.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend fails.
    pub fn goal_progress(&self, owner: &User) -> Result<Vec<GoalProgress>, GoalError> {
        let balance = self.ledger.balance(owner.id)?;
        let goals = self.goals.find_goals_by_owner(owner.id)?;
        Ok(goals
            .iter()
            .map(|goal| GoalProgress::measure(goal, balance))
            .collect())
    }

    /// Reports every goal of the transaction owner that the current balance
    /// reaches, in one consolidated notification.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the owner record is missing, or the notifier's
    /// failure.
    pub fn check_goal(&self, transaction: &Transaction) -> Result<Vec<String>, GoalError> {
        let owner = transaction.owner_id;
        let balance = self.ledger.balance(owner)?;

        let achieved: Vec<String> = self
            .goals
            .find_goals_by_owner(owner)?
            .iter()
            .filter(|goal| goal.is_achieved(balance))
            .map(achievement_line)
            .collect();

        if achieved.is_empty() {
            debug!(owner_id = %owner, %balance, "No goal reached");
            return Ok(achieved);
        }

        let user = self
            .users
            .find_user(owner)?
            .ok_or(GoalError::UserNotFound(owner))?;
        self.notifier
            .send(&user.email, ACHIEVED_SUBJECT, &achieved.join("\n"))?;
        info!(
            owner_id = %owner,
            %balance,
            goals = achieved.len(),
            "Goal achievement notification sent"
        );

        Ok(achieved)
    }

    fn load_owned(&self, id: GoalId, owner: &User) -> Result<Goal, GoalError> {
        match self.goals.find_goal(id)? {
            Some(goal) if owner.owns(goal.owner_id) => Ok(goal),
            Some(_) => {
                warn!(owner_id = %owner.id, goal_id = %id, "Goal ownership check failed");
                Err(GoalError::NotFound(id))
            }
            None => Err(GoalError::NotFound(id)),
        }
    }
}

impl LedgerSubscriber for GoalTracker {
    fn name(&self) -> &'static str {
        "goal"
    }

    fn on_event(&self, event: &LedgerEvent) -> Result<Vec<String>, AppError> {
        Ok(self.check_goal(&event.transaction)?)
    }
}

fn achievement_line(goal: &Goal) -> String {
    format!("Goal: {} \u{2013} {}", goal.name, goal.target_amount)
}

fn validate(input: &GoalInput) -> Result<(String, String), GoalError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(GoalError::EmptyName);
    }
    if input.target_amount <= Decimal::ZERO {
        return Err(GoalError::NonPositiveTarget);
    }
    if input.target_amount > MAX_AMOUNT {
        return Err(GoalError::TargetTooLarge(input.target_amount));
    }
    Ok((name.to_string(), input.description.trim().to_string()))
}
