use chrono::{NaiveDate, NaiveDateTime, Weekday};
use expense_core::core::services::{AggregationService, UNCATEGORIZED};
use expense_core::domain::{Category, Expense};

fn sample_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn timestamp(y: i32, m: u32, d: u32) -> NaiveDateTime {
    sample_date(y, m, d).and_hms_opt(10, 30, 0).unwrap()
}

fn record(amount: f64, category: &Category, y: i32, m: u32, d: u32) -> Expense {
    Expense::new(amount, Some(category.id), "test", timestamp(y, m, d), "")
}

#[test]
fn scenario_two_categories_across_a_month() {
    let food = Category::new("Food");
    let transport = Category::new("Transport");
    let categories = vec![food.clone(), transport.clone()];
    let expenses = vec![
        record(10.0, &food, 2025, 3, 1),
        record(5.0, &transport, 2025, 3, 1),
        record(20.0, &food, 2025, 3, 3),
    ];

    assert_eq!(AggregationService::total_amount(&expenses), 35.0);

    let by_category = AggregationService::by_category(&expenses, &categories);
    assert_eq!(by_category.len(), 2);
    assert_eq!(by_category.get("Food"), Some(&30.0));
    assert_eq!(by_category.get("Transport"), Some(&5.0));

    let grid = AggregationService::daily_totals_grid(sample_date(2025, 3, 1), &expenses);
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.get(&1), Some(&15.0));
    assert_eq!(grid.get(&3), Some(&20.0));
    assert_eq!(grid.get(&2).copied().unwrap_or(0.0), 0.0);
}

#[test]
fn week_buckets_split_or_merge_by_first_weekday() {
    let food = Category::new("Food");
    let categories = vec![food.clone()];
    // 2025-03-01 is a Saturday, 2025-03-03 a Monday: with Sunday-first weeks
    // they land in different buckets.
    let march = vec![
        record(10.0, &food, 2025, 3, 1),
        record(20.0, &food, 2025, 3, 3),
    ];
    let weeks = AggregationService::by_week(&march, &categories, Weekday::Sun);
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].week_start, sample_date(2025, 2, 23));
    assert_eq!(weeks[1].week_start, sample_date(2025, 3, 2));

    // 2025-07-01 (Tuesday) and 2025-07-03 (Thursday) share the week starting
    // Sunday 2025-06-29.
    let july = vec![
        record(10.0, &food, 2025, 7, 1),
        record(20.0, &food, 2025, 7, 3),
    ];
    let weeks = AggregationService::by_week(&july, &categories, Weekday::Sun);
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].week_start, sample_date(2025, 6, 29));
    assert_eq!(weeks[0].entries[0].amount, 30.0);
}

#[test]
fn total_matches_category_sums() {
    let food = Category::new("Food");
    let bills = Category::new("Bills");
    let categories = vec![food.clone(), bills.clone()];
    let mut expenses = vec![
        record(12.75, &food, 2025, 5, 2),
        record(8.20, &bills, 2025, 5, 9),
        record(31.05, &food, 2025, 5, 17),
    ];
    // One record pointing at a deleted category still counts.
    expenses.push(Expense::new(4.5, None, "misc", timestamp(2025, 5, 21), ""));

    let total = AggregationService::total_amount(&expenses);
    let by_category = AggregationService::by_category(&expenses, &categories);
    let category_sum: f64 = by_category.values().sum();
    assert!((total - category_sum).abs() < 1e-9);
    assert!(by_category.contains_key(UNCATEGORIZED));
}

#[test]
fn grid_totals_match_overall_total_within_month() {
    let food = Category::new("Food");
    let expenses = vec![
        record(3.0, &food, 2025, 4, 1),
        record(7.0, &food, 2025, 4, 15),
        record(11.0, &food, 2025, 4, 30),
    ];
    let grid = AggregationService::daily_totals_grid(sample_date(2025, 4, 10), &expenses);
    let grid_sum: f64 = grid.values().sum();
    assert!((grid_sum - AggregationService::total_amount(&expenses)).abs() < 1e-9);
}

#[test]
fn grids_drop_records_outside_the_month() {
    let food = Category::new("Food");
    let expenses = vec![
        record(3.0, &food, 2025, 4, 30),
        record(50.0, &food, 2025, 5, 1),
    ];
    let totals = AggregationService::daily_totals_grid(sample_date(2025, 4, 1), &expenses);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals.get(&30), Some(&3.0));

    let lists = AggregationService::daily_expenses_grid(sample_date(2025, 4, 1), &expenses);
    assert_eq!(lists.len(), 1);
    assert_eq!(lists.get(&30).map(Vec::len), Some(1));
    assert!(lists.get(&1).is_none());
}

#[test]
fn by_day_groups_per_category_within_each_day() {
    let food = Category::new("Food");
    let transport = Category::new("Transport");
    let categories = vec![food.clone(), transport.clone()];
    let expenses = vec![
        record(10.0, &food, 2025, 3, 5),
        record(2.5, &food, 2025, 3, 5),
        record(4.0, &transport, 2025, 3, 5),
        record(1.0, &food, 2025, 3, 9),
    ];

    let days = AggregationService::by_day(&expenses, &categories);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, sample_date(2025, 3, 5));
    assert_eq!(days[0].entries.len(), 2);
    let food_entry = days[0]
        .entries
        .iter()
        .find(|entry| entry.category == "Food")
        .unwrap();
    assert_eq!(food_entry.amount, 12.5);
    assert_eq!(days[1].entries.len(), 1);
}
