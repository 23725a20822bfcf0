//! Rule-based observations over a transaction set. Rules run in a fixed order
//! so the output is stable for a given input.

use rust_decimal::Decimal;

use super::aggregate::{by_category, total_expenses, total_income};
use super::filter::Filter;
use super::percent;
use crate::models::Transaction;

pub(crate) const EMPTY_PLACEHOLDER: &str = "Add some transactions to get personalized insights!";

/// A single category above this share of expenses triggers a warning.
const CONCENTRATION_PERCENT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Info,
    Warning,
    Success,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Insight {
    pub(crate) severity: Severity,
    pub(crate) message: String,
}

impl Insight {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

pub(crate) fn generate(txns: &[Transaction], filter: &Filter) -> Vec<Insight> {
    if filter.apply(txns).next().is_none() {
        return vec![Insight::new(Severity::Info, EMPTY_PLACEHOLDER)];
    }

    let mut insights = Vec::new();

    let expenses = total_expenses(txns, filter);
    // by_category is in canonical order, so the first maximum wins ties
    let top = by_category(txns, filter)
        .into_iter()
        .fold(None, |best: Option<(String, _)>, (name, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((name, amount)),
        });
    if let Some((category, amount)) = top {
        let share = percent(amount, expenses);
        insights.push(Insight::new(
            Severity::Info,
            format!("Your highest spending category is {category} ({share:.1}% of expenses)."),
        ));
        if share > CONCENTRATION_PERCENT {
            insights.push(Insight::new(
                Severity::Warning,
                format!(
                    "{category} makes up over {CONCENTRATION_PERCENT:.0}% of your spending. \
                     Consider spreading or trimming it."
                ),
            ));
        }
    }

    let income = total_income(txns, filter);
    if income > Decimal::ZERO {
        let rate = percent(income - expenses, income);
        insights.push(if rate >= 20.0 {
            Insight::new(
                Severity::Success,
                format!("Excellent! You're saving {rate:.1}% of your income."),
            )
        } else if rate >= 10.0 {
            Insight::new(
                Severity::Success,
                format!("Good job! You're saving {rate:.1}% of your income."),
            )
        } else if rate > 0.0 {
            Insight::new(
                Severity::Info,
                format!("You're saving {rate:.1}% of your income. Aim for at least 20%."),
            )
        } else {
            Insight::new(
                Severity::Warning,
                format!("You're spending more than you earn ({rate:.1}% savings rate). Cut back on expenses."),
            )
        });
    }

    insights
}

#[cfg(test)]
#[path = "insights_tests.rs"]
mod tests;
