//! In-memory storage backend for tests and demos.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::domain::{Budget, Category, CategoryBudget, Expense};
use crate::errors::{ExpenseError, Result};

use super::{
    budget_for_month, categories_sorted, expenses_in_range, lines_for_budget, ExpenseStore,
};

/// Shared failure switches for exercising storage error paths.
///
/// Handles stay valid after the store is boxed behind the engine, so a test
/// can flip a switch mid-scenario.
#[derive(Clone, Default)]
pub struct StoreFaults {
    fetches: Arc<AtomicBool>,
    saves: Arc<AtomicBool>,
}

impl StoreFaults {
    pub fn fail_fetches(&self, fail: bool) {
        self.fetches.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.saves.store(fail, Ordering::SeqCst);
    }
}

/// Storage backend holding every record in process memory.
#[derive(Default)]
pub struct MemoryStore {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    category_budgets: Vec<CategoryBudget>,
    faults: StoreFaults,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clones the failure switches; keep a copy before boxing the store.
    pub fn faults(&self) -> StoreFaults {
        self.faults.clone()
    }

    /// Number of successful `save` commits.
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    fn fetch_guard(&self) -> Result<()> {
        if self.faults.fetches.load(Ordering::SeqCst) {
            Err(ExpenseError::Storage("backing store unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl ExpenseStore for MemoryStore {
    fn fetch_expenses(
        &self,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
    ) -> Result<Vec<Expense>> {
        self.fetch_guard()?;
        Ok(expenses_in_range(&self.expenses, range_start, range_end))
    }

    fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.fetch_guard()?;
        Ok(categories_sorted(&self.categories))
    }

    fn fetch_current_budget(&self, now: NaiveDate) -> Result<Option<Budget>> {
        self.fetch_guard()?;
        Ok(budget_for_month(&self.budgets, now))
    }

    fn fetch_category_budgets(&self, budget_id: Uuid) -> Result<Vec<CategoryBudget>> {
        self.fetch_guard()?;
        Ok(lines_for_budget(
            &self.category_budgets,
            &self.categories,
            budget_id,
        ))
    }

    fn create_expense(&mut self, expense: Expense) -> Result<()> {
        self.expenses.push(expense);
        Ok(())
    }

    fn update_expense(&mut self, expense: Expense) -> Result<()> {
        match self.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense;
                Ok(())
            }
            None => Err(ExpenseError::ExpenseNotFound(expense.id)),
        }
    }

    fn delete_expense(&mut self, id: Uuid) -> Result<()> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return Err(ExpenseError::ExpenseNotFound(id));
        }
        Ok(())
    }

    fn clear_all_expenses(&mut self) -> Result<()> {
        self.expenses.clear();
        Ok(())
    }

    fn create_category(&mut self, category: Category) -> Result<()> {
        self.categories.push(category);
        Ok(())
    }

    fn clear_all_categories(&mut self) -> Result<()> {
        self.categories.clear();
        Ok(())
    }

    fn create_budget(&mut self, budget: Budget) -> Result<()> {
        self.budgets.push(budget);
        Ok(())
    }

    fn update_budget(&mut self, budget: Budget) -> Result<()> {
        match self.budgets.iter_mut().find(|b| b.id == budget.id) {
            Some(existing) => {
                *existing = budget;
                Ok(())
            }
            None => Err(ExpenseError::Storage(format!(
                "budget {} not found",
                budget.id
            ))),
        }
    }

    fn clear_all_budgets(&mut self) -> Result<()> {
        self.budgets.clear();
        self.category_budgets.clear();
        Ok(())
    }

    fn create_category_budget(&mut self, line: CategoryBudget) -> Result<()> {
        self.category_budgets.push(line);
        Ok(())
    }

    fn delete_category_budget(&mut self, id: Uuid) -> Result<()> {
        self.category_budgets.retain(|line| line.id != id);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        if self.faults.saves.load(Ordering::SeqCst) {
            return Err(ExpenseError::Storage("simulated save failure".into()));
        }
        self.save_count += 1;
        Ok(())
    }
}
