//! Defines the category store trait.

use crate::{DatabaseID, Error, models::Category};

/// Creates, retrieves, and deletes expense categories.
pub trait CategoryStore {
    /// Create a new category and return its assigned ID.
    ///
    /// `color` is an opaque display string and is not validated.
    ///
    /// # Errors
    /// Returns [Error::DuplicateCategoryName] if a category named
    /// `name` already exists, or [Error::SqlError] if there is some
    /// other SQL error.
    fn create(&mut self, name: &str, color: &str) -> Result<DatabaseID, Error>;

    /// Get all categories in storage iteration order. Empty on failure.
    fn get_all(&self) -> Vec<Category>;

    /// Delete the category with `id`. A no-op when no row matches.
    ///
    /// Expenses referencing the deleted category's name are left
    /// untouched; there is no cascade. Default categories are not
    /// protected here, that policy belongs to the caller.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if there is an SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
