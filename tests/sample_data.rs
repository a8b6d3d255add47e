use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Timelike};
use expense_core::core::services::SampleDataService;
use expense_core::domain::{Category, DEFAULT_CATEGORIES};
use expense_core::storage::{ExpenseStore, MemoryStore};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for name in DEFAULT_CATEGORIES {
        store.create_category(Category::new(name)).unwrap();
    }
    store
}

fn month_expenses(store: &MemoryStore, year: i32, month: u32) -> Vec<expense_core::domain::Expense> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let end = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    store.fetch_expenses(start, end).unwrap()
}

#[test]
fn generated_records_respect_the_stated_ranges() {
    // June has 30 days; repeat a few seeds to cover different day-set sizes.
    for seed in 0..5u64 {
        let mut store = seeded_store();
        let mut rng = StdRng::seed_from_u64(seed);
        let now = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let created = SampleDataService::generate_with(&mut store, now, &mut rng).unwrap();

        let records = month_expenses(&store, 2025, 6);
        assert_eq!(records.len(), created);

        // Records land on the run's shared day pool, which never exceeds 15
        // days; pool selection itself is covered by the service's unit tests.
        let distinct_days: HashSet<u32> = records.iter().map(|r| r.date.day()).collect();
        assert!(!distinct_days.is_empty());
        assert!(
            distinct_days.len() <= 15,
            "seed {seed}: {} distinct days",
            distinct_days.len()
        );

        for record in &records {
            assert!(record.date.month() == 6 && record.date.year() == 2025);
            assert!((8..=22).contains(&record.date.hour()));
            assert!(record.amount >= 5.0 && record.amount <= 150.0);
            let cents = record.amount * 100.0;
            assert!(
                (cents - cents.round()).abs() < 1e-9,
                "amount {} not rounded to cents",
                record.amount
            );
            assert!(record.category_id.is_some());
            assert!(!record.remarks.is_empty());
            assert!(!record.emoji.is_empty());
        }
    }
}

#[test]
fn each_category_gets_between_four_and_thirteen_records() {
    let mut store = seeded_store();
    let mut rng = StdRng::seed_from_u64(7);
    let now = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
    SampleDataService::generate_with(&mut store, now, &mut rng).unwrap();

    let mut per_category: HashMap<uuid::Uuid, usize> = HashMap::new();
    for record in month_expenses(&store, 2025, 6) {
        *per_category.entry(record.category_id.unwrap()).or_default() += 1;
    }
    assert_eq!(per_category.len(), DEFAULT_CATEGORIES.len());
    for (_, count) in per_category {
        assert!((4..=13).contains(&count));
    }
}

#[test]
fn unrecognized_categories_use_the_generic_vocabulary() {
    let mut store = MemoryStore::new();
    store.create_category(Category::new("Gadgets")).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let now = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
    SampleDataService::generate_with(&mut store, now, &mut rng).unwrap();

    let generic_remarks = ["Misc expense", "Small purchase", "Online order"];
    for record in month_expenses(&store, 2025, 6) {
        assert!(generic_remarks.contains(&record.remarks.as_str()));
    }
}

#[test]
fn february_day_set_stays_within_the_month() {
    let mut store = seeded_store();
    let mut rng = StdRng::seed_from_u64(3);
    let now = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
    SampleDataService::generate_with(&mut store, now, &mut rng).unwrap();

    for record in month_expenses(&store, 2024, 2) {
        assert!(record.date.day() <= 29);
        assert_eq!(record.date.month(), 2);
    }
}
