//! Stateless services operating over records from the storage collaborator.

mod aggregation_service;
mod budget_service;
mod sample_data_service;

pub use aggregation_service::{
    AggregationService, CategoryAmount, DaySpending, WeekSpending, UNCATEGORIZED,
};
pub use budget_service::BudgetService;
pub use sample_data_service::SampleDataService;
