//! Monthly budget structures and the progress classification tiers.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The overall spending cap for one calendar month.
///
/// At most one budget exists per distinct `month` value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub amount: f64,
    /// First calendar day of the month this budget applies to.
    pub month: NaiveDate,
}

impl Budget {
    pub fn new(amount: f64, month: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            month,
        }
    }
}

/// A per-category cap owned by exactly one budget and one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBudget {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub category_id: Uuid,
    pub amount: f64,
}

impl CategoryBudget {
    pub fn new(budget_id: Uuid, category_id: Uuid, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            budget_id,
            category_id,
            amount,
        }
    }
}

/// Three-tier classification of budget consumption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::OverBudget => "Over Budget",
        };
        f.write_str(label)
    }
}
