use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for engine, storage, and configuration layers.
#[derive(Error, Debug)]
pub enum ExpenseError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
}

pub type Result<T> = StdResult<T, ExpenseError>;

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}
