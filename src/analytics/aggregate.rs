//! Totals, groupings and series over a filtered transaction set.
//!
//! Everything here is pure. Sums stay in `Decimal` so that
//! `total_income - total_expenses == net_savings` holds exactly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::filter::Filter;
use crate::models::{category, MonthKey, Transaction};

/// Income, expense magnitude and net for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthSummary {
    pub(crate) month: MonthKey,
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) net: Decimal,
}

pub(crate) fn total_income(txns: &[Transaction], filter: &Filter) -> Decimal {
    filter
        .apply(txns)
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Sum of expense magnitudes; never negative.
pub(crate) fn total_expenses(txns: &[Transaction], filter: &Filter) -> Decimal {
    filter
        .apply(txns)
        .filter(|t| t.is_expense())
        .map(|t| -t.amount)
        .sum()
}

pub(crate) fn net_savings(txns: &[Transaction], filter: &Filter) -> Decimal {
    total_income(txns, filter) - total_expenses(txns, filter)
}

/// Expense magnitudes per category in canonical category order. Categories
/// without expenses are left out.
pub(crate) fn by_category(txns: &[Transaction], filter: &Filter) -> Vec<(String, Decimal)> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for txn in filter.apply(txns).filter(|t| t.is_expense()) {
        *totals.entry(txn.category.as_str()).or_default() += txn.abs_amount();
    }
    let mut out: Vec<(String, Decimal)> = totals
        .into_iter()
        .map(|(name, total)| (name.to_string(), total))
        .collect();
    out.sort_by(|a, b| category::compare(&a.0, &b.0));
    out
}

/// Net amount per calendar month, chronological.
pub(crate) fn by_month(txns: &[Transaction], filter: &Filter) -> BTreeMap<MonthKey, Decimal> {
    let mut totals = BTreeMap::new();
    for txn in filter.apply(txns) {
        *totals.entry(txn.month()).or_insert(Decimal::ZERO) += txn.amount;
    }
    totals
}

/// Expense magnitude per month, only for months that had expenses.
pub(crate) fn monthly_expense_totals(
    txns: &[Transaction],
    filter: &Filter,
) -> BTreeMap<MonthKey, Decimal> {
    let mut totals = BTreeMap::new();
    for txn in filter.apply(txns).filter(|t| t.is_expense()) {
        *totals.entry(txn.month()).or_insert(Decimal::ZERO) += txn.abs_amount();
    }
    totals
}

pub(crate) fn monthly_summary(txns: &[Transaction], filter: &Filter) -> Vec<MonthSummary> {
    let mut months: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();
    for txn in filter.apply(txns) {
        let entry = months.entry(txn.month()).or_default();
        if txn.is_income() {
            entry.0 += txn.amount;
        } else {
            entry.1 += txn.abs_amount();
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthSummary {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}

/// Running balance in date order, one point per transaction. Same-day
/// transactions keep their insertion order.
pub(crate) fn cumulative_balance(
    txns: &[Transaction],
    filter: &Filter,
) -> Vec<(NaiveDate, Decimal)> {
    let mut ordered: Vec<&Transaction> = filter.apply(txns).collect();
    ordered.sort_by_key(|t| t.date);
    let mut running = Decimal::ZERO;
    ordered
        .into_iter()
        .map(|t| {
            running += t.amount;
            (t.date, running)
        })
        .collect()
}

/// Mean of the monthly values, or `None` when there are no months.
pub(crate) fn average_per_month(monthly_totals: &BTreeMap<MonthKey, Decimal>) -> Option<Decimal> {
    if monthly_totals.is_empty() {
        return None;
    }
    let sum: Decimal = monthly_totals.values().copied().sum();
    Some(sum / Decimal::from(monthly_totals.len()))
}

pub(crate) fn months_present(txns: &[Transaction]) -> BTreeSet<MonthKey> {
    txns.iter().map(Transaction::month).collect()
}

/// Distinct categories, canonical order.
pub(crate) fn categories_present(txns: &[Transaction]) -> Vec<String> {
    let mut names: Vec<String> = txns
        .iter()
        .map(|t| t.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    names.sort_by(|a, b| category::compare(a, b));
    names
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
