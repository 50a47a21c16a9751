//! Contains the SQLite backed stores and convenience functions for
//! creating them over a shared connection.

pub mod category;
pub mod expense;
pub mod summary;

pub use category::SQLiteCategoryStore;
pub use expense::SQLiteExpenseStore;
pub use summary::SQLiteSummaryStore;

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The full set of SQLite backed stores, sharing one database
/// connection. The shared mutex serializes all access, which is the
/// only concurrency control this crate needs for its single foreground
/// caller.
#[derive(Debug, Clone)]
pub struct SQLiteStores {
    /// Expense CRUD.
    pub expenses: SQLiteExpenseStore,
    /// Category CRUD.
    pub categories: SQLiteCategoryStore,
    /// Derived spending totals.
    pub summary: SQLiteSummaryStore,
}

/// Create the stores for `connection`, first creating the schema and
/// seeding the default categories via [initialize].
///
/// # Errors
/// Returns an error if the schema could not be set up.
pub fn create_stores(connection: Connection) -> Result<SQLiteStores, Error> {
    initialize(&connection)?;

    let connection = Arc::new(Mutex::new(connection));

    Ok(SQLiteStores {
        expenses: SQLiteExpenseStore::new(connection.clone()),
        categories: SQLiteCategoryStore::new(connection.clone()),
        summary: SQLiteSummaryStore::new(connection),
    })
}

/// Open (or create) the database file at `path` and create the stores
/// for it.
///
/// # Errors
/// Returns [Error::Unavailable] if the file could not be opened, or an
/// initialization error from [create_stores].
pub fn open<P: AsRef<Path>>(path: P) -> Result<SQLiteStores, Error> {
    let connection =
        Connection::open(path).map_err(|error| Error::Unavailable(error.to_string()))?;

    create_stores(connection)
}
