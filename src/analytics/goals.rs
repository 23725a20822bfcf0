use chrono::NaiveDate;

use super::aggregate::net_savings;
use super::filter::Filter;
use super::percent;
use crate::models::{MonthKey, SavingsGoals, Transaction};

/// Progress towards the savings goals, in percent. Values are reported
/// unclamped and may be negative or exceed 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GoalProgress {
    pub(crate) monthly_percent: f64,
    pub(crate) annual_percent: f64,
}

/// Monthly progress uses net savings of the month containing `today`; annual
/// progress uses net savings of the caller's filtered set.
pub(crate) fn progress(
    goals: &SavingsGoals,
    txns: &[Transaction],
    filter: &Filter,
    today: NaiveDate,
) -> GoalProgress {
    let current_month = net_savings(txns, &Filter::month(MonthKey::from_date(today)));
    let selected = net_savings(txns, filter);
    GoalProgress {
        monthly_percent: percent(current_month, goals.monthly),
        annual_percent: percent(selected, goals.annual),
    }
}

/// Fraction of a progress bar to fill, clamped to `[0, 1]`.
pub(crate) fn display_fraction(progress_percent: f64) -> f64 {
    if progress_percent.is_nan() {
        return 0.0;
    }
    (progress_percent / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "goals_tests.rs"]
mod tests;
