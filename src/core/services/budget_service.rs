//! Monthly budget resolution, reconciliation, and progress classification.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::calendar::month_bounds;
use crate::domain::{Budget, BudgetStatus, CategoryBudget};
use crate::errors::{ExpenseError, Result};
use crate::storage::ExpenseStore;

const WARNING_THRESHOLD: f64 = 0.7;
const OVER_BUDGET_THRESHOLD: f64 = 0.9;

/// Resolve/create/update cycle over the one budget per calendar month.
pub struct BudgetService;

impl BudgetService {
    /// Budget whose month matches the month containing `now`, if any.
    pub fn resolve_current(store: &dyn ExpenseStore, now: NaiveDate) -> Result<Option<Budget>> {
        store.fetch_current_budget(now)
    }

    /// Creates or updates the current month's budget, then replaces its
    /// category lines wholesale.
    ///
    /// Every existing line of the budget is deleted before one fresh line per
    /// stored category is inserted; categories omitted from `per_category`
    /// get an explicit zero line rather than surviving or disappearing.
    pub fn ensure_and_update(
        store: &mut dyn ExpenseStore,
        now: NaiveDate,
        amount: f64,
        per_category: &HashMap<String, f64>,
    ) -> Result<Budget> {
        let month = month_bounds(now)
            .map(|(start, _)| start)
            .ok_or_else(|| ExpenseError::Validation(format!("unrepresentable month for {now}")))?;

        let budget = match store.fetch_current_budget(now)? {
            Some(mut existing) => {
                existing.amount = amount;
                store.update_budget(existing.clone())?;
                existing
            }
            None => {
                let created = Budget::new(amount, month);
                store.create_budget(created.clone())?;
                created
            }
        };

        for line in store.fetch_category_budgets(budget.id)? {
            store.delete_category_budget(line.id)?;
        }
        for category in store.fetch_categories()? {
            let line_amount = per_category.get(&category.name).copied().unwrap_or(0.0);
            store.create_category_budget(CategoryBudget::new(
                budget.id,
                category.id,
                line_amount,
            ))?;
        }
        Ok(budget)
    }

    /// Consumed fraction of the budget, clamped to `[0, 1]`.
    ///
    /// An unset or zero budget reads as fully consumed, not as "no limit".
    pub fn progress(total_spent: f64, budget_amount: f64) -> f64 {
        if budget_amount > 0.0 {
            (total_spent / budget_amount).min(1.0)
        } else {
            1.0
        }
    }

    /// Classifies a progress ratio against the fixed alert thresholds.
    pub fn status(ratio: f64) -> BudgetStatus {
        if ratio < WARNING_THRESHOLD {
            BudgetStatus::OnTrack
        } else if ratio < OVER_BUDGET_THRESHOLD {
            BudgetStatus::Warning
        } else {
            BudgetStatus::OverBudget
        }
    }
}
