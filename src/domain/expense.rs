//! Domain types representing individual expense records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ExpenseError, Result};

/// A single dated, categorized money record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub remarks: String,
    pub date: NaiveDateTime,
    pub emoji: String,
}

impl Expense {
    pub fn new(
        amount: f64,
        category_id: Option<Uuid>,
        remarks: impl Into<String>,
        date: NaiveDateTime,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category_id,
            remarks: remarks.into(),
            date,
            emoji: emoji.into(),
        }
    }

    /// Builds a full record from a draft, reusing an existing id.
    ///
    /// Updates replace every field wholesale.
    pub fn from_draft(id: Uuid, draft: &ExpenseDraft) -> Self {
        Self {
            id,
            amount: draft.amount,
            category_id: draft.category_id,
            remarks: draft.remarks.clone(),
            date: draft.date,
            emoji: draft.emoji.clone(),
        }
    }
}

/// Form-level input for creating or editing an expense.
///
/// The model itself tolerates a zero amount, empty remarks, and a missing
/// category; the add/edit entry point does not, so drafts are validated
/// before a record is ever constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category_id: Option<Uuid>,
    pub remarks: String,
    pub date: NaiveDateTime,
    pub emoji: String,
}

impl ExpenseDraft {
    pub fn new(
        amount: f64,
        category_id: Option<Uuid>,
        remarks: impl Into<String>,
        date: NaiveDateTime,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            category_id,
            remarks: remarks.into(),
            date,
            emoji: emoji.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount <= 0.0 {
            return Err(ExpenseError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        if self.remarks.trim().is_empty() {
            return Err(ExpenseError::Validation("remarks must not be empty".into()));
        }
        if self.category_id.is_none() {
            return Err(ExpenseError::Validation("a category must be selected".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(amount: f64, remarks: &str) -> ExpenseDraft {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        ExpenseDraft::new(amount, Some(Uuid::new_v4()), remarks, date, "🍜")
    }

    #[test]
    fn validate_rejects_zero_amount() {
        let err = draft(0.0, "Lunch").validate().expect_err("zero amount");
        assert!(matches!(err, ExpenseError::Validation(ref m) if m.contains("amount")));
    }

    #[test]
    fn validate_rejects_blank_remarks() {
        let err = draft(12.5, "   ").validate().expect_err("blank remarks");
        assert!(matches!(err, ExpenseError::Validation(ref m) if m.contains("remarks")));
    }

    #[test]
    fn validate_requires_category() {
        let mut input = draft(12.5, "Lunch");
        input.category_id = None;
        let err = input.validate().expect_err("missing category");
        assert!(matches!(err, ExpenseError::Validation(ref m) if m.contains("category")));
    }
}
