//! Component wiring.

use std::sync::Arc;

use tally_shared::{Notifier, ReportConfig};

use crate::budget::BudgetTracker;
use crate::category::CategoryRegistry;
use crate::events::NotificationDispatcher;
use crate::goal::GoalTracker;
use crate::ledger::{Ledger, LedgerQueries};
use crate::reports::ReportEngine;
use crate::store::{BudgetStore, CategoryStore, GoalStore, TransactionStore, UserStore};

/// Every core component, wired over one persistence backend and one notifier.
///
/// The ledger publishes to the budget tracker first and the goal tracker second.
/// The report labels are reserved as category names so that no category row can
/// merge with them.
pub struct Services {
    /// Category registry.
    pub categories: CategoryRegistry,
    /// Transaction ledger.
    pub ledger: Ledger,
    /// Budget tracker, also subscribed to the ledger.
    pub budgets: Arc<BudgetTracker>,
    /// Goal tracker, also subscribed to the ledger.
    pub goals: Arc<GoalTracker>,
    /// Statement builder.
    pub reports: ReportEngine,
}

impl Services {
    /// Wires the components.
    pub fn new<S>(store: Arc<S>, notifier: Arc<dyn Notifier>, labels: ReportConfig) -> Self
    where
        S: UserStore + CategoryStore + TransactionStore + BudgetStore + GoalStore + 'static,
    {
        let categories = CategoryRegistry::new(store.clone(), store.clone(), store.clone())
            .with_reserved_names([&labels.no_category_label, &labels.grand_total_label]);
        let queries = LedgerQueries::new(store.clone(), store.clone());

        let budgets = Arc::new(BudgetTracker::new(
            store.clone(),
            store.clone(),
            categories.clone(),
            queries.clone(),
            Arc::clone(&notifier),
        ));
        let goals = Arc::new(GoalTracker::new(
            store.clone(),
            store.clone(),
            queries.clone(),
            notifier,
        ));

        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.subscribe(budgets.clone());
        dispatcher.subscribe(goals.clone());

        let ledger = Ledger::new(categories.clone(), store, queries.clone(), dispatcher);
        let reports = ReportEngine::new(queries, labels);

        Self {
            categories,
            ledger,
            budgets,
            goals,
            reports,
        }
    }
}
