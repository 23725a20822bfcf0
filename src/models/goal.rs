use rust_decimal::Decimal;

use super::check_magnitude;
use crate::error::FinanceError;

/// Net-savings targets for the current month and the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SavingsGoals {
    pub(crate) monthly: Decimal,
    pub(crate) annual: Decimal,
}

impl SavingsGoals {
    pub(crate) fn set_monthly(&mut self, amount: Decimal) -> Result<(), FinanceError> {
        self.monthly = non_negative("monthly goal", amount)?;
        Ok(())
    }

    pub(crate) fn set_annual(&mut self, amount: Decimal) -> Result<(), FinanceError> {
        self.annual = non_negative("annual goal", amount)?;
        Ok(())
    }
}

impl Default for SavingsGoals {
    fn default() -> Self {
        Self {
            monthly: Decimal::from(5_000),
            annual: Decimal::from(60_000),
        }
    }
}

fn non_negative(what: &str, amount: Decimal) -> Result<Decimal, FinanceError> {
    if amount < Decimal::ZERO {
        return Err(FinanceError::InvalidGoal(format!(
            "{what} must not be negative (got {amount})"
        )));
    }
    check_magnitude(amount).map_err(|e| FinanceError::InvalidGoal(format!("{what}: {e}")))?;
    Ok(amount)
}
