//! Budget-vs-actual for the current calendar month.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::aggregate::by_category;
use super::filter::Filter;
use super::percent;
use crate::models::{BudgetConfig, MonthKey, Transaction};

const NEAR_LIMIT_PERCENT: f64 = 80.0;
const OVER_LIMIT_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BudgetStatus {
    OverBudget,
    NearLimit,
    OnTrack,
}

impl BudgetStatus {
    pub(crate) fn classify(usage_percent: f64) -> Self {
        if usage_percent > OVER_LIMIT_PERCENT {
            Self::OverBudget
        } else if usage_percent > NEAR_LIMIT_PERCENT {
            Self::NearLimit
        } else {
            Self::OnTrack
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OverBudget => write!(f, "Over budget"),
            Self::NearLimit => write!(f, "Near limit"),
            Self::OnTrack => write!(f, "On track"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetLine {
    pub(crate) category: String,
    pub(crate) budget: Decimal,
    pub(crate) actual: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) usage_percent: f64,
    pub(crate) status: BudgetStatus,
}

/// Compare each configured limit with actual spending, in configuration order.
/// Categories with no spending report zero; a zero limit reports 0% usage.
pub(crate) fn compare(config: &BudgetConfig, actuals: &[(String, Decimal)]) -> Vec<BudgetLine> {
    config
        .budgets()
        .iter()
        .map(|budget| {
            let actual = actuals
                .iter()
                .find(|(name, _)| *name == budget.category)
                .map(|(_, amount)| *amount)
                .unwrap_or(Decimal::ZERO);
            let usage_percent = percent(actual, budget.limit_amount);
            BudgetLine {
                category: budget.category.clone(),
                budget: budget.limit_amount,
                actual,
                remaining: budget.limit_amount - actual,
                usage_percent,
                status: BudgetStatus::classify(usage_percent),
            }
        })
        .collect()
}

/// Budget status against spending in the month containing `today`.
pub(crate) fn track(config: &BudgetConfig, txns: &[Transaction], today: NaiveDate) -> Vec<BudgetLine> {
    let actuals = by_category(txns, &Filter::month(MonthKey::from_date(today)));
    compare(config, &actuals)
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod tests;
