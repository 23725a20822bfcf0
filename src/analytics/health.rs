//! Heuristic 0-100 "financial health" score.
//!
//! score = (savings_rate * 0.5 + consistency * 0.3 + diversity * 0.2) * 100
//!
//! Consistency uses the sample standard deviation (n - 1) of monthly expense
//! totals.

use rust_decimal::prelude::ToPrimitive;
use std::collections::HashSet;

use super::aggregate::{monthly_expense_totals, net_savings, total_income};
use super::filter::Filter;
use super::ratio;
use crate::models::Transaction;

const SAVINGS_WEIGHT: f64 = 0.5;
const CONSISTENCY_WEIGHT: f64 = 0.3;
const DIVERSITY_WEIGHT: f64 = 0.2;
/// Spreading expenses over this many categories earns full diversity credit.
const DIVERSITY_TARGET: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HealthBreakdown {
    pub(crate) savings_rate: f64,
    pub(crate) diversity: f64,
    pub(crate) consistency: f64,
    pub(crate) score: f64,
}

impl HealthBreakdown {
    pub(crate) fn rating(&self) -> &'static str {
        if self.score >= 80.0 {
            "Excellent"
        } else if self.score >= 60.0 {
            "Good"
        } else if self.score >= 40.0 {
            "Fair"
        } else {
            "Needs attention"
        }
    }
}

/// Score for the whole (unfiltered) transaction set; 0 when empty.
pub(crate) fn health_score(txns: &[Transaction]) -> f64 {
    breakdown(txns).score
}

pub(crate) fn breakdown(txns: &[Transaction]) -> HealthBreakdown {
    if txns.is_empty() {
        return HealthBreakdown {
            savings_rate: 0.0,
            diversity: 0.0,
            consistency: 0.0,
            score: 0.0,
        };
    }

    let all = Filter::default();
    let savings_rate = savings_rate(txns, &all);
    let diversity = expense_diversity(txns);
    let consistency = expense_consistency(txns);

    let score = (savings_rate * SAVINGS_WEIGHT
        + consistency * CONSISTENCY_WEIGHT
        + diversity * DIVERSITY_WEIGHT)
        * 100.0;

    HealthBreakdown {
        savings_rate,
        diversity,
        consistency,
        score: score.clamp(0.0, 100.0),
    }
}

/// Net savings over income, 0 without income. May be negative.
pub(crate) fn savings_rate(txns: &[Transaction], filter: &Filter) -> f64 {
    ratio(net_savings(txns, filter), total_income(txns, filter))
}

fn expense_diversity(txns: &[Transaction]) -> f64 {
    let distinct = txns
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.category.as_str())
        .collect::<HashSet<_>>()
        .len();
    (distinct as f64 / DIVERSITY_TARGET).min(1.0)
}

fn expense_consistency(txns: &[Transaction]) -> f64 {
    let monthly: Vec<f64> = monthly_expense_totals(txns, &Filter::default())
        .values()
        .map(|v| v.to_f64().unwrap_or(0.0))
        .collect();
    if monthly.len() < 2 {
        return 1.0;
    }
    let mean = monthly.iter().sum::<f64>() / monthly.len() as f64;
    if mean.abs() < f64::EPSILON {
        return 1.0;
    }
    let variance =
        monthly.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (monthly.len() - 1) as f64;
    (1.0 - variance.sqrt() / mean.abs()).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;
