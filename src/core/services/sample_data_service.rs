//! Pseudo-random fixture records for manual testing and demos.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::calendar::days_in_month;
use crate::domain::{Category, Expense};
use crate::errors::Result;
use crate::storage::ExpenseStore;

const MIN_RECORDS_PER_CATEGORY: usize = 4;
const MAX_RECORDS_PER_CATEGORY: usize = 13;
const MIN_DISTINCT_DAYS: usize = 5;
const MAX_DISTINCT_DAYS: usize = 15;

type Vocab = &'static [(&'static str, &'static str)];

const FOOD_VOCAB: Vocab = &[
    ("🍜", "Noodle lunch"),
    ("☕", "Morning coffee"),
    ("🍱", "Bento box"),
    ("🍕", "Pizza night"),
    ("🛒", "Groceries run"),
];

const TRANSPORT_VOCAB: Vocab = &[
    ("🚇", "Metro ride"),
    ("🚌", "Bus fare"),
    ("⛽", "Fuel top-up"),
    ("🚕", "Taxi home"),
];

const SHOPPING_VOCAB: Vocab = &[
    ("🛍️", "New clothes"),
    ("👟", "Sneakers"),
    ("🎁", "Gift for a friend"),
    ("🧴", "Toiletries"),
];

const ENTERTAINMENT_VOCAB: Vocab = &[
    ("🎬", "Cinema ticket"),
    ("🎮", "Game on sale"),
    ("🎤", "Karaoke night"),
    ("🎳", "Bowling round"),
];

const BILLS_VOCAB: Vocab = &[
    ("💡", "Electricity bill"),
    ("📱", "Phone plan"),
    ("💧", "Water bill"),
    ("🌐", "Internet plan"),
];

const GENERIC_VOCAB: Vocab = &[
    ("💸", "Misc expense"),
    ("🧾", "Small purchase"),
    ("📦", "Online order"),
];

static VOCABULARY: Lazy<HashMap<&'static str, Vocab>> = Lazy::new(|| {
    HashMap::from([
        ("Food", FOOD_VOCAB),
        ("Transport", TRANSPORT_VOCAB),
        ("Shopping", SHOPPING_VOCAB),
        ("Entertainment", ENTERTAINMENT_VOCAB),
        ("Bills", BILLS_VOCAB),
    ])
});

/// Generates schema-valid pseudo-random expenses for every stored category.
pub struct SampleDataService;

impl SampleDataService {
    /// Inserts 4..=13 records per category, dated on a shared set of random
    /// days within the month containing `now`. Returns the record count.
    pub fn generate(store: &mut dyn ExpenseStore, now: NaiveDate) -> Result<usize> {
        let mut rng = rand::thread_rng();
        Self::generate_with(store, now, &mut rng)
    }

    /// Generation driven by a caller-supplied RNG, so tests can seed it.
    pub fn generate_with(
        store: &mut dyn ExpenseStore,
        now: NaiveDate,
        rng: &mut impl Rng,
    ) -> Result<usize> {
        let categories = store.fetch_categories()?;
        let days = pick_days(rng, now);
        if days.is_empty() {
            return Ok(0);
        }

        let mut created = 0;
        for category in &categories {
            let count = rng.gen_range(MIN_RECORDS_PER_CATEGORY..=MAX_RECORDS_PER_CATEGORY);
            for _ in 0..count {
                store.create_expense(random_record(rng, category, &days))?;
                created += 1;
            }
        }
        Ok(created)
    }
}

/// Chooses the run's shared day set: 5 to `min(15, month length)` distinct
/// days inside the month of `now`.
fn pick_days(rng: &mut impl Rng, now: NaiveDate) -> Vec<NaiveDate> {
    let month_len = days_in_month(now.year(), now.month());
    let cap = MAX_DISTINCT_DAYS.min(month_len as usize);
    let count = rng.gen_range(MIN_DISTINCT_DAYS..=cap);
    let mut days: Vec<u32> = (1..=month_len).collect();
    days.shuffle(rng);
    days.truncate(count);
    days.into_iter()
        .filter_map(|day| NaiveDate::from_ymd_opt(now.year(), now.month(), day))
        .collect()
}

fn random_record(rng: &mut impl Rng, category: &Category, days: &[NaiveDate]) -> Expense {
    let day = days[rng.gen_range(0..days.len())];
    let time = NaiveTime::from_hms_opt(rng.gen_range(8..=22), rng.gen_range(0..=59), 0).unwrap();
    let amount = round_cents(rng.gen_range(5.0..=150.0));
    let vocab = vocab_for(&category.name);
    let (emoji, remarks) = vocab[rng.gen_range(0..vocab.len())];
    Expense::new(amount, Some(category.id), remarks, day.and_time(time), emoji)
}

fn vocab_for(name: &str) -> Vocab {
    VOCABULARY.get(name).copied().unwrap_or(GENERIC_VOCAB)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
