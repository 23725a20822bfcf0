use rust_decimal::Decimal;

use super::check_magnitude;
use crate::error::FinanceError;

/// Monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Budget {
    pub(crate) category: String,
    pub(crate) limit_amount: Decimal,
}

impl Budget {
    pub(crate) fn new(category: impl Into<String>, limit_amount: Decimal) -> Self {
        Self {
            category: category.into(),
            limit_amount,
        }
    }
}

/// Session-owned budget limits, kept in the order they were defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BudgetConfig {
    budgets: Vec<Budget>,
}

impl BudgetConfig {
    pub(crate) fn empty() -> Self {
        Self {
            budgets: Vec::new(),
        }
    }

    pub(crate) fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub(crate) fn get(&self, category: &str) -> Option<Decimal> {
        self.budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.limit_amount)
    }

    /// Insert or update a limit. Updating keeps the category's position.
    pub(crate) fn set(&mut self, category: &str, limit: Decimal) -> Result<(), FinanceError> {
        if limit < Decimal::ZERO {
            return Err(FinanceError::InvalidBudget(format!(
                "limit for {category} must not be negative (got {limit})"
            )));
        }
        check_magnitude(limit)
            .map_err(|e| FinanceError::InvalidBudget(format!("limit for {category}: {e}")))?;
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(existing) => existing.limit_amount = limit,
            None => self.budgets.push(Budget::new(category, limit)),
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, category: &str) -> bool {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.category != category);
        self.budgets.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.budgets.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        let defaults = [
            ("Food", 10_000),
            ("Shopping", 5_000),
            ("Transport", 3_000),
            ("Bills", 8_000),
            ("Healthcare", 2_000),
            ("Entertainment", 3_000),
            ("Other", 2_000),
        ];
        Self {
            budgets: defaults
                .iter()
                .map(|(name, limit)| Budget::new(*name, Decimal::from(*limit)))
                .collect(),
        }
    }
}
