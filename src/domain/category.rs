//! Domain types representing spending categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seed set created when the stored category set is empty at bootstrap.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Shopping",
    "Entertainment",
    "Bills",
    "Others",
];

/// A user-defined spending bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
