use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::month::MonthKey;

/// Largest magnitude accepted for a single amount, limit or goal. Keeps every
/// sum over a session far below `Decimal::MAX`. One trillion.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Amounts must be non-zero and no larger than [`MAX_AMOUNT`] in magnitude.
pub(crate) fn check_amount(amount: Decimal) -> Result<(), String> {
    if amount.is_zero() {
        return Err("amount must not be zero".into());
    }
    check_magnitude(amount)
}

pub(crate) fn check_magnitude(amount: Decimal) -> Result<(), String> {
    if amount.abs() > MAX_AMOUNT {
        return Err(format!("amount {amount} exceeds the maximum of {MAX_AMOUNT}"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) category: String,
    pub(crate) description: String,
}

impl Transaction {
    pub(crate) fn new(
        date: NaiveDate,
        amount: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            category: category.into(),
            description: description.into(),
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub(crate) fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    pub(crate) fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}
