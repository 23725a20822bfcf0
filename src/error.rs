//! Domain errors surfaced to the user. Zero denominators are not errors: ratio
//! computations return 0 instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum FinanceError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid savings goal: {0}")]
    InvalidGoal(String),
}
