//! Facade coordinating record storage, aggregation, and change notification.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::core::services::{
    AggregationService, BudgetService, DaySpending, SampleDataService, WeekSpending,
};
use crate::domain::calendar::month_bounds;
use crate::domain::{
    Budget, BudgetStatus, Category, CategoryBudget, Expense, ExpenseDraft, DEFAULT_CATEGORIES,
};
use crate::errors::{ExpenseError, Result};
use crate::storage::ExpenseStore;

/// Change signals delivered to registered listeners after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEvent {
    Changed,
    Cleared,
}

/// Callback receiving every [`DataEvent`] emitted by the engine.
pub type Listener = Box<dyn Fn(DataEvent) + Send>;

/// Immutable aggregate bundle republished after every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// First day of the month the snapshot covers.
    pub month_start: NaiveDate,
    pub current_budget: Option<Budget>,
    pub category_budgets: Vec<CategoryBudget>,
    /// Month's records as fetched, date descending.
    pub current_month_expenses: Vec<Expense>,
    pub total_spent: f64,
    pub category_spending: HashMap<String, f64>,
    pub daily_spending: Vec<DaySpending>,
    pub weekly_spending: Vec<WeekSpending>,
}

impl Snapshot {
    fn empty(month_start: NaiveDate) -> Self {
        Self {
            month_start,
            current_budget: None,
            category_budgets: Vec::new(),
            current_month_expenses: Vec::new(),
            total_spent: 0.0,
            category_spending: HashMap::new(),
            daily_spending: Vec::new(),
            weekly_spending: Vec::new(),
        }
    }

    /// Consumed fraction of the monthly budget, clamped to `[0, 1]`.
    pub fn budget_progress(&self) -> f64 {
        let amount = self
            .current_budget
            .as_ref()
            .map(|budget| budget.amount)
            .unwrap_or(0.0);
        BudgetService::progress(self.total_spent, amount)
    }

    pub fn budget_status(&self) -> BudgetStatus {
        BudgetService::status(self.budget_progress())
    }

    /// Amount left before the cap; zero when no budget is set or overspent.
    pub fn remaining(&self) -> f64 {
        let amount = self
            .current_budget
            .as_ref()
            .map(|budget| budget.amount)
            .unwrap_or(0.0);
        (amount - self.total_spent).max(0.0)
    }

    /// Day-of-month to summed amount for the snapshot's month.
    pub fn daily_totals_grid(&self) -> HashMap<u32, f64> {
        AggregationService::daily_totals_grid(self.month_start, &self.current_month_expenses)
    }

    /// Day-of-month to record list for the snapshot's month.
    pub fn daily_expenses_grid(&self) -> HashMap<u32, Vec<Expense>> {
        AggregationService::daily_expenses_grid(self.month_start, &self.current_month_expenses)
    }
}

/// Facade that owns the storage collaborator and republishes aggregates.
///
/// Single-writer, request-at-a-time: every operation runs to completion
/// before returning, and callers re-derive aggregates with [`Self::refresh`]
/// after each mutation rather than relying on incremental updates.
pub struct ExpenseTracker {
    store: Box<dyn ExpenseStore>,
    config: EngineConfig,
    listeners: Vec<Listener>,
}

impl ExpenseTracker {
    /// Creates the engine and seeds the default category set when the store
    /// holds no categories yet.
    ///
    /// Seeding happens at bootstrap only; a run that later ends up with an
    /// empty category set does not trigger it again.
    pub fn new(store: Box<dyn ExpenseStore>, config: EngineConfig) -> Result<Self> {
        let mut engine = Self {
            store,
            config,
            listeners: Vec::new(),
        };
        engine.seed_default_categories()?;
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers a listener for data-change events.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Stored categories, name ascending; empty on fetch failure.
    pub fn categories(&self) -> Vec<Category> {
        fetch_or_empty(self.store.fetch_categories(), "categories")
    }

    /// Validates and stores a new expense record.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<Expense> {
        draft.validate()?;
        self.ensure_known_category(draft.category_id)?;
        let expense = Expense::from_draft(Uuid::new_v4(), &draft);
        self.store.create_expense(expense.clone())?;
        let saved = self.commit();
        self.emit(DataEvent::Changed);
        saved.map(|_| expense)
    }

    /// Replaces every field of an existing record from the draft.
    pub fn update_expense(&mut self, id: Uuid, draft: ExpenseDraft) -> Result<Expense> {
        draft.validate()?;
        self.ensure_known_category(draft.category_id)?;
        let expense = Expense::from_draft(id, &draft);
        self.store.update_expense(expense.clone())?;
        let saved = self.commit();
        self.emit(DataEvent::Changed);
        saved.map(|_| expense)
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Result<()> {
        self.store.delete_expense(id)?;
        let saved = self.commit();
        self.emit(DataEvent::Changed);
        saved
    }

    /// Creates or updates this month's budget and replaces its category
    /// lines wholesale.
    pub fn update_budget(
        &mut self,
        now: NaiveDate,
        amount: f64,
        per_category: &HashMap<String, f64>,
    ) -> Result<Budget> {
        let budget =
            BudgetService::ensure_and_update(self.store.as_mut(), now, amount, per_category)?;
        let saved = self.commit();
        self.emit(DataEvent::Changed);
        saved.map(|_| budget)
    }

    /// Fills the current month with pseudo-random records for every category.
    pub fn generate_sample_data(&mut self, now: NaiveDate) -> Result<usize> {
        let created = SampleDataService::generate(self.store.as_mut(), now)?;
        let saved = self.commit();
        self.emit(DataEvent::Changed);
        saved.map(|_| created)
    }

    /// Deletes every expense, budget, and category, then re-seeds the
    /// default category set.
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.store.clear_all_expenses()?;
        self.store.clear_all_budgets()?;
        self.store.clear_all_categories()?;
        for name in DEFAULT_CATEGORIES {
            self.store.create_category(Category::new(name))?;
        }
        let saved = self.commit();
        self.emit(DataEvent::Cleared);
        saved
    }

    /// Recomputes the published aggregate bundle for the month of `now`.
    ///
    /// Fetch failures degrade to empty collections: they are logged and never
    /// surfaced to the caller.
    pub fn refresh(&self, now: NaiveDateTime) -> Snapshot {
        let today = now.date();
        let Some((month_start, month_end)) = month_bounds(today) else {
            tracing::warn!("cannot normalize reference date {today}; publishing empty snapshot");
            return Snapshot::empty(today);
        };
        let range_start = month_start.and_hms_opt(0, 0, 0).unwrap();
        let range_end = month_end.and_hms_opt(23, 59, 59).unwrap();

        let expenses = fetch_or_empty(
            self.store.fetch_expenses(range_start, range_end),
            "expenses",
        );
        let categories = fetch_or_empty(self.store.fetch_categories(), "categories");
        let current_budget = match self.store.fetch_current_budget(today) {
            Ok(budget) => budget,
            Err(err) => {
                tracing::warn!("failed to fetch current budget: {err}; treating as unset");
                None
            }
        };
        let category_budgets = match &current_budget {
            Some(budget) => fetch_or_empty(
                self.store.fetch_category_budgets(budget.id),
                "category budgets",
            ),
            None => Vec::new(),
        };

        Snapshot {
            month_start,
            total_spent: AggregationService::total_amount(&expenses),
            category_spending: AggregationService::by_category(&expenses, &categories),
            daily_spending: AggregationService::by_day(&expenses, &categories),
            weekly_spending: AggregationService::by_week(
                &expenses,
                &categories,
                self.config.first_weekday,
            ),
            current_month_expenses: expenses,
            current_budget,
            category_budgets,
        }
    }

    fn seed_default_categories(&mut self) -> Result<()> {
        let existing = self.store.fetch_categories()?;
        if !existing.is_empty() {
            return Ok(());
        }
        tracing::info!("seeding {} default categories", DEFAULT_CATEGORIES.len());
        for name in DEFAULT_CATEGORIES {
            self.store.create_category(Category::new(name))?;
        }
        self.commit()
    }

    fn ensure_known_category(&self, category_id: Option<Uuid>) -> Result<()> {
        let Some(id) = category_id else {
            return Ok(());
        };
        let known = self
            .store
            .fetch_categories()?
            .iter()
            .any(|category| category.id == id);
        if known {
            Ok(())
        } else {
            Err(ExpenseError::CategoryNotFound(id))
        }
    }

    /// Commits to storage. A failure is logged and surfaced, but the mutation
    /// it follows stays applied: displayed state is allowed to run ahead of
    /// persisted state until the next successful save.
    fn commit(&mut self) -> Result<()> {
        self.store.save().map_err(|err| {
            tracing::error!("save failed: {err}");
            err
        })
    }

    fn emit(&self, event: DataEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

fn fetch_or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
    match result {
        Ok(values) => values,
        Err(err) => {
            tracing::warn!("failed to fetch {what}: {err}; falling back to empty");
            Vec::new()
        }
    }
}
