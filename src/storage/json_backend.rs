//! JSON-file storage backend with atomic writes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::write_atomic;
use crate::domain::{Budget, Category, CategoryBudget, Expense};
use crate::errors::{ExpenseError, Result};

use super::{
    budget_for_month, categories_sorted, expenses_in_range, lines_for_budget, ExpenseStore,
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Default, Serialize, Deserialize)]
struct DataSet {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    category_budgets: Vec<CategoryBudget>,
}

/// Storage backend keeping the whole record set in one JSON document.
///
/// Mutations stay in memory until `save` commits them with a
/// write-to-tmp-then-rename.
pub struct JsonStore {
    path: PathBuf,
    data: DataSet,
}

impl JsonStore {
    /// Opens the data set at `path`, starting empty when the file is absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            DataSet::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        let ext = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
            None => TMP_SUFFIX.to_string(),
        };
        tmp.set_extension(ext);
        tmp
    }
}

impl ExpenseStore for JsonStore {
    fn fetch_expenses(
        &self,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
    ) -> Result<Vec<Expense>> {
        Ok(expenses_in_range(&self.data.expenses, range_start, range_end))
    }

    fn fetch_categories(&self) -> Result<Vec<Category>> {
        Ok(categories_sorted(&self.data.categories))
    }

    fn fetch_current_budget(&self, now: NaiveDate) -> Result<Option<Budget>> {
        Ok(budget_for_month(&self.data.budgets, now))
    }

    fn fetch_category_budgets(&self, budget_id: Uuid) -> Result<Vec<CategoryBudget>> {
        Ok(lines_for_budget(
            &self.data.category_budgets,
            &self.data.categories,
            budget_id,
        ))
    }

    fn create_expense(&mut self, expense: Expense) -> Result<()> {
        self.data.expenses.push(expense);
        Ok(())
    }

    fn update_expense(&mut self, expense: Expense) -> Result<()> {
        match self.data.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense;
                Ok(())
            }
            None => Err(ExpenseError::ExpenseNotFound(expense.id)),
        }
    }

    fn delete_expense(&mut self, id: Uuid) -> Result<()> {
        let before = self.data.expenses.len();
        self.data.expenses.retain(|e| e.id != id);
        if self.data.expenses.len() == before {
            return Err(ExpenseError::ExpenseNotFound(id));
        }
        Ok(())
    }

    fn clear_all_expenses(&mut self) -> Result<()> {
        self.data.expenses.clear();
        Ok(())
    }

    fn create_category(&mut self, category: Category) -> Result<()> {
        self.data.categories.push(category);
        Ok(())
    }

    fn clear_all_categories(&mut self) -> Result<()> {
        self.data.categories.clear();
        Ok(())
    }

    fn create_budget(&mut self, budget: Budget) -> Result<()> {
        self.data.budgets.push(budget);
        Ok(())
    }

    fn update_budget(&mut self, budget: Budget) -> Result<()> {
        match self.data.budgets.iter_mut().find(|b| b.id == budget.id) {
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
        self.data.budgets.clear();
        self.data.category_budgets.clear();
        Ok(())
    }

    fn create_category_budget(&mut self, line: CategoryBudget) -> Result<()> {
        self.data.category_budgets.push(line);
        Ok(())
    }

    fn delete_category_budget(&mut self, id: Uuid) -> Result<()> {
        self.data.category_budgets.retain(|line| line.id != id);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)?;
        let tmp = self.tmp_path();
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
