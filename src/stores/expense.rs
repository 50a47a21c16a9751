//! Defines the expense store trait.

use time::OffsetDateTime;

use crate::{DatabaseID, Error, models::Expense};

/// Creates, retrieves, updates, and deletes expenses.
///
/// Writes return a `Result` the caller must handle. Reads never fail:
/// on an underlying storage fault they log and return an empty
/// sequence, so a display can degrade to "no data" instead of crashing.
pub trait ExpenseStore {
    /// Record a new expense and return its assigned ID.
    ///
    /// None of the fields are validated: negative amounts and category
    /// names with no matching category row are stored as given.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateFormat] if `date` cannot be encoded,
    /// or [Error::SqlError] if there is an SQL error.
    fn create(
        &mut self,
        amount: f64,
        category: &str,
        description: &str,
        date: OffsetDateTime,
    ) -> Result<DatabaseID, Error>;

    /// Get all expenses, most recent date first. Empty on failure.
    fn get_all(&self) -> Vec<Expense>;

    /// Get the expenses dated within `[start, end]` inclusive, most
    /// recent date first. Empty on failure.
    fn get_date_range(&self, start: OffsetDateTime, end: OffsetDateTime) -> Vec<Expense>;

    /// Overwrite all fields of the stored row matching `expense.id`.
    /// A no-op (not an error) when no row matches.
    ///
    /// # Errors
    /// Returns [Error::MissingExpenseId] if `expense.id` is `None`,
    /// [Error::InvalidDateFormat] if the date cannot be encoded, or
    /// [Error::SqlError] if there is an SQL error.
    fn update(&mut self, expense: &Expense) -> Result<(), Error>;

    /// Delete the expense with `id`. A no-op when no row matches.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if there is an SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
