//! Grouping and totalling over flat expense record sets.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

use crate::domain::calendar::{month_bounds, week_start};
use crate::domain::{Category, Expense};

/// Label used for records whose category is missing or no longer exists.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Per-category sum inside a day or week bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// Expenses of one calendar day, grouped and summed per category.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySpending {
    pub date: NaiveDate,
    pub entries: Vec<CategoryAmount>,
}

/// Expenses of one week bucket, grouped and summed per category.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSpending {
    pub week_start: NaiveDate,
    pub entries: Vec<CategoryAmount>,
}

/// Stateless aggregation over already-fetched record sets.
pub struct AggregationService;

impl AggregationService {
    /// Sum of all record amounts; `0.0` for an empty set.
    pub fn total_amount(expenses: &[Expense]) -> f64 {
        expenses.iter().map(|expense| expense.amount).sum()
    }

    /// Sums per category name, unordered.
    ///
    /// Records without a resolvable category land under "Uncategorized".
    pub fn by_category(expenses: &[Expense], categories: &[Category]) -> HashMap<String, f64> {
        let names = category_names(categories);
        let mut sums: HashMap<String, f64> = HashMap::new();
        for expense in expenses {
            *sums
                .entry(label_for(expense.category_id, &names))
                .or_default() += expense.amount;
        }
        sums
    }

    /// Day buckets sorted ascending by date, each grouped per category.
    pub fn by_day(expenses: &[Expense], categories: &[Category]) -> Vec<DaySpending> {
        let names = category_names(categories);
        let mut days: HashMap<NaiveDate, HashMap<String, f64>> = HashMap::new();
        for expense in expenses {
            *days
                .entry(expense.date.date())
                .or_default()
                .entry(label_for(expense.category_id, &names))
                .or_default() += expense.amount;
        }
        let mut buckets: Vec<DaySpending> = days
            .into_iter()
            .map(|(date, sums)| DaySpending {
                date,
                entries: entries_from(sums),
            })
            .collect();
        buckets.sort_by_key(|bucket| bucket.date);
        buckets
    }

    /// Week buckets sorted ascending by week start, each grouped per category.
    pub fn by_week(
        expenses: &[Expense],
        categories: &[Category],
        first_weekday: Weekday,
    ) -> Vec<WeekSpending> {
        let names = category_names(categories);
        let mut weeks: HashMap<NaiveDate, HashMap<String, f64>> = HashMap::new();
        for expense in expenses {
            *weeks
                .entry(week_start(expense.date.date(), first_weekday))
                .or_default()
                .entry(label_for(expense.category_id, &names))
                .or_default() += expense.amount;
        }
        let mut buckets: Vec<WeekSpending> = weeks
            .into_iter()
            .map(|(start, sums)| WeekSpending {
                week_start: start,
                entries: entries_from(sums),
            })
            .collect();
        buckets.sort_by_key(|bucket| bucket.week_start);
        buckets
    }

    /// Day-of-month to summed amount, restricted to the month of `month`.
    ///
    /// Days without expenses stay absent; readers default the lookup to zero.
    pub fn daily_totals_grid(month: NaiveDate, expenses: &[Expense]) -> HashMap<u32, f64> {
        let Some((start, end)) = month_bounds(month) else {
            return HashMap::new();
        };
        let mut grid: HashMap<u32, f64> = HashMap::new();
        for expense in expenses {
            let day = expense.date.date();
            if day < start || day > end {
                continue;
            }
            *grid.entry(day.day()).or_default() += expense.amount;
        }
        grid
    }

    /// Day-of-month to record list, restricted to the month of `month`.
    ///
    /// Days without expenses have no entry at all, so the drill-down view can
    /// distinguish "no records" from "records summing to zero".
    pub fn daily_expenses_grid(
        month: NaiveDate,
        expenses: &[Expense],
    ) -> HashMap<u32, Vec<Expense>> {
        let Some((start, end)) = month_bounds(month) else {
            return HashMap::new();
        };
        let mut grid: HashMap<u32, Vec<Expense>> = HashMap::new();
        for expense in expenses {
            let day = expense.date.date();
            if day < start || day > end {
                continue;
            }
            grid.entry(day.day()).or_default().push(expense.clone());
        }
        grid
    }
}

fn category_names(categories: &[Category]) -> HashMap<Uuid, String> {
    categories
        .iter()
        .map(|category| (category.id, category.name.clone()))
        .collect()
}

fn label_for(category_id: Option<Uuid>, names: &HashMap<Uuid, String>) -> String {
    category_id
        .and_then(|id| names.get(&id).cloned())
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

fn entries_from(sums: HashMap<String, f64>) -> Vec<CategoryAmount> {
    let mut entries: Vec<CategoryAmount> = sums
        .into_iter()
        .map(|(category, amount)| CategoryAmount { category, amount })
        .collect();
    entries.sort_by(|a, b| a.category.cmp(&b.category));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: f64, category: Option<Uuid>, y: i32, m: u32, d: u32) -> Expense {
        let date = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Expense::new(amount, category, "test", date, "")
    }

    #[test]
    fn total_amount_of_empty_set_is_zero() {
        assert_eq!(AggregationService::total_amount(&[]), 0.0);
    }

    #[test]
    fn by_category_labels_unresolvable_records() {
        let food = Category::new("Food");
        let deleted = Uuid::new_v4();
        let expenses = vec![
            record(10.0, Some(food.id), 2025, 5, 2),
            record(4.0, Some(deleted), 2025, 5, 2),
            record(6.0, None, 2025, 5, 3),
        ];

        let sums = AggregationService::by_category(&expenses, &[food]);
        assert_eq!(sums.get("Food"), Some(&10.0));
        assert_eq!(sums.get(UNCATEGORIZED), Some(&10.0));
    }

    #[test]
    fn daily_totals_grid_omits_quiet_days() {
        let month = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let expenses = vec![record(12.0, None, 2025, 5, 7), record(3.0, None, 2025, 6, 1)];

        let grid = AggregationService::daily_totals_grid(month, &expenses);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(&7), Some(&12.0));
        // Absent days read as zero through the map API.
        assert_eq!(grid.get(&8).copied().unwrap_or(0.0), 0.0);
    }

    #[test]
    fn by_day_sorts_ascending() {
        let expenses = vec![
            record(5.0, None, 2025, 5, 20),
            record(7.0, None, 2025, 5, 3),
            record(2.0, None, 2025, 5, 3),
        ];
        let days = AggregationService::by_day(&expenses, &[]);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 5, 3).unwrap());
        assert_eq!(days[0].entries[0].amount, 9.0);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 5, 20).unwrap());
    }
}
