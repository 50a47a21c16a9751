//! This module defines the domain data types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// A single spending event.
///
/// `category` refers to a [Category] by name. This is a soft reference:
/// the store does not enforce it, and deleting a category leaves any
/// expenses that reference its name untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the store. `None` only on expenses that have
    /// not been persisted yet.
    pub id: Option<DatabaseID>,
    /// How much was spent.
    pub amount: f64,
    /// The name of the category this expense belongs to.
    pub category: String,
    /// A free-form description, may be empty.
    pub description: String,
    /// When the money was spent.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// A label that groups expenses, e.g. 'Food' or 'Transport'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID assigned by the store.
    pub id: DatabaseID,
    /// The category name, unique across all categories.
    pub name: String,
    /// A display color. The store treats this as an opaque string.
    pub color: String,
}

/// The summed spending for one category, produced by
/// [SummaryStore::category_totals](crate::stores::SummaryStore::category_totals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The sum of all expense amounts recorded under this category.
    pub total: f64,
    /// The display color of the matching [Category].
    pub color: String,
}
