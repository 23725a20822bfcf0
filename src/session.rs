//! One user's in-memory session: the transaction store plus the settings the
//! dashboard reads (budgets, goals, active filter).

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::analytics::aggregate::{self, MonthSummary};
use crate::analytics::budget::{self, BudgetLine};
use crate::analytics::goals::{self, GoalProgress};
use crate::analytics::health::{self, HealthBreakdown};
use crate::analytics::insights::{self, Insight};
use crate::analytics::Filter;
use crate::config::Settings;
use crate::error::FinanceError;
use crate::import::{CsvExporter, CsvImporter};
use crate::models::{category, BudgetConfig, MonthKey, SavingsGoals, Transaction};
use crate::store::TransactionStore;

pub(crate) struct Session {
    pub(crate) store: TransactionStore,
    pub(crate) budgets: BudgetConfig,
    pub(crate) goals: SavingsGoals,
    pub(crate) filter: Filter,
}

impl Session {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            store: TransactionStore::new(),
            budgets: settings.budgets.clone(),
            goals: settings.goals,
            filter: Filter::default(),
        }
    }

    /// Record a manually entered transaction.
    pub(crate) fn add_transaction(
        &self,
        date: NaiveDate,
        amount: Decimal,
        category_name: &str,
        description: &str,
    ) -> Result<(), FinanceError> {
        if category_name.trim().is_empty() {
            return Err(FinanceError::InvalidTransaction(
                "category must not be empty".into(),
            ));
        }
        self.store.append(Transaction::new(
            date,
            amount,
            category::normalize(category_name),
            description,
        ))
    }

    /// Replace the session's transactions with the contents of a CSV file.
    /// A bad file leaves the session untouched.
    pub(crate) fn import_replace(&self, path: &Path) -> Result<usize> {
        let txns = CsvImporter::from_path(path)?;
        let count = txns.len();
        self.store.replace_all(txns);
        Ok(count)
    }

    /// Append the contents of a CSV file to the session, all or nothing.
    pub(crate) fn import_merge(&self, path: &Path) -> Result<usize> {
        let txns = CsvImporter::from_path(path)?;
        let count = txns.len();
        self.store.extend(txns);
        Ok(count)
    }

    pub(crate) fn export(&self, path: &Path) -> Result<usize> {
        CsvExporter::to_path(&self.store.all(), path)
    }

    pub(crate) fn set_budget(&mut self, category_name: &str, limit: Decimal) -> Result<String, FinanceError> {
        let name = category::normalize(category_name);
        if name.is_empty() {
            return Err(FinanceError::InvalidBudget("category must not be empty".into()));
        }
        self.budgets.set(&name, limit)?;
        info!(category = %name, %limit, "budget set");
        Ok(name)
    }

    pub(crate) fn view(&self, today: NaiveDate) -> DashboardView {
        DashboardView::compute(self, today)
    }
}

/// Everything the dashboard shows, computed from one store snapshot.
#[derive(Debug, Clone)]
pub(crate) struct DashboardView {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) total_count: usize,
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) net: Decimal,
    pub(crate) by_category: Vec<(String, Decimal)>,
    pub(crate) monthly: Vec<MonthSummary>,
    pub(crate) average_monthly_net: Option<Decimal>,
    pub(crate) balance: Vec<(NaiveDate, Decimal)>,
    pub(crate) health: HealthBreakdown,
    pub(crate) insights: Vec<Insight>,
    pub(crate) budgets: Vec<BudgetLine>,
    pub(crate) goals: GoalProgress,
    pub(crate) months_present: BTreeSet<MonthKey>,
    pub(crate) categories_present: Vec<String>,
}

impl DashboardView {
    pub(crate) fn compute(session: &Session, today: NaiveDate) -> Self {
        let snapshot = session.store.all();
        let txns = snapshot.as_slice();
        let filter = &session.filter;

        Self {
            transactions: filter.apply(txns).cloned().collect(),
            total_count: txns.len(),
            income: aggregate::total_income(txns, filter),
            expenses: aggregate::total_expenses(txns, filter),
            net: aggregate::net_savings(txns, filter),
            by_category: aggregate::by_category(txns, filter),
            monthly: aggregate::monthly_summary(txns, filter),
            average_monthly_net: aggregate::average_per_month(&aggregate::by_month(txns, filter)),
            balance: aggregate::cumulative_balance(txns, filter),
            // Health and budgets ignore the dashboard filter
            health: health::breakdown(txns),
            insights: insights::generate(txns, filter),
            budgets: budget::track(&session.budgets, txns, today),
            goals: goals::progress(&session.goals, txns, filter, today),
            months_present: aggregate::months_present(txns),
            categories_present: aggregate::categories_present(txns),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
