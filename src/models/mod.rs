mod budget;
pub(crate) mod category;
mod goal;
mod month;
mod transaction;

pub(crate) use budget::{Budget, BudgetConfig};
pub(crate) use goal::SavingsGoals;
pub(crate) use month::MonthKey;
pub(crate) use transaction::{check_amount, check_magnitude, Transaction, MAX_AMOUNT};

#[cfg(test)]
mod tests;
