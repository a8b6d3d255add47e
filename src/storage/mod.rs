//! Persistence boundary for expense, category, and budget records.

pub mod json_backend;
pub mod memory;

pub use json_backend::JsonStore;
pub use memory::{MemoryStore, StoreFaults};

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::domain::calendar::month_bounds;
use crate::domain::{Budget, Category, CategoryBudget, Expense};
use crate::errors::Result;

/// Abstraction over persistence backends holding the raw record set.
///
/// Fetch results come back in the documented orders: expenses date
/// descending, categories and category budget lines name ascending.
pub trait ExpenseStore: Send {
    fn fetch_expenses(
        &self,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
    ) -> Result<Vec<Expense>>;
    fn fetch_categories(&self) -> Result<Vec<Category>>;
    fn fetch_current_budget(&self, now: NaiveDate) -> Result<Option<Budget>>;
    fn fetch_category_budgets(&self, budget_id: Uuid) -> Result<Vec<CategoryBudget>>;

    fn create_expense(&mut self, expense: Expense) -> Result<()>;
    fn update_expense(&mut self, expense: Expense) -> Result<()>;
    fn delete_expense(&mut self, id: Uuid) -> Result<()>;
    fn clear_all_expenses(&mut self) -> Result<()>;

    fn create_category(&mut self, category: Category) -> Result<()>;
    fn clear_all_categories(&mut self) -> Result<()>;

    fn create_budget(&mut self, budget: Budget) -> Result<()>;
    fn update_budget(&mut self, budget: Budget) -> Result<()>;
    fn clear_all_budgets(&mut self) -> Result<()>;
    fn create_category_budget(&mut self, line: CategoryBudget) -> Result<()>;
    fn delete_category_budget(&mut self, id: Uuid) -> Result<()>;

    /// Commits pending mutations to the backing medium.
    fn save(&mut self) -> Result<()>;
}

pub(crate) fn expenses_in_range(
    expenses: &[Expense],
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> Vec<Expense> {
    let mut records: Vec<Expense> = expenses
        .iter()
        .filter(|expense| expense.date >= range_start && expense.date <= range_end)
        .cloned()
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

pub(crate) fn categories_sorted(categories: &[Category]) -> Vec<Category> {
    let mut records = categories.to_vec();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

pub(crate) fn budget_for_month(budgets: &[Budget], now: NaiveDate) -> Option<Budget> {
    let (month_start, _) = month_bounds(now)?;
    budgets
        .iter()
        .find(|budget| budget.month == month_start)
        .cloned()
}

pub(crate) fn lines_for_budget(
    lines: &[CategoryBudget],
    categories: &[Category],
    budget_id: Uuid,
) -> Vec<CategoryBudget> {
    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();
    let mut records: Vec<CategoryBudget> = lines
        .iter()
        .filter(|line| line.budget_id == budget_id)
        .cloned()
        .collect();
    records.sort_by(|a, b| {
        let left = names.get(&a.category_id).copied().unwrap_or_default();
        let right = names.get(&b.category_id).copied().unwrap_or_default();
        left.cmp(right)
    });
    records
}
