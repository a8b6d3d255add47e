#![doc(test(attr(deny(warnings))))]

//! Expense Core turns flat sets of dated, categorized money records into the
//! derived views consumed by presentation layers: totals, category and
//! day/week groupings, calendar grids, and monthly budget progress.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;

pub use crate::core::engine::{DataEvent, ExpenseTracker, Snapshot};
pub use crate::core::services::{AggregationService, BudgetService, SampleDataService};
pub use crate::errors::{ExpenseError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Expense Core tracing initialized.");
    });
}
