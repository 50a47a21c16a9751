//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, DatabaseID},
    stores::CategoryStore,
};

/// Stores expense categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn select_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name, color FROM categories;")?
            .query_map([], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a new category and return its assigned ID.
    ///
    /// # Errors
    /// This function will return an [Error::DuplicateCategoryName] if
    /// `name` is already taken, or an [Error::SqlError] if there is
    /// some other SQL error.
    fn create(&mut self, name: &str, color: &str) -> Result<DatabaseID, Error> {
        let connection = self.connection.lock().unwrap();

        connection
            .execute(
                "INSERT INTO categories (name, color) VALUES (?1, ?2);",
                (name, color),
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 2067 =>
                {
                    Error::DuplicateCategoryName(name.to_string())
                }
                error => error.into(),
            })?;

        Ok(connection.last_insert_rowid())
    }

    /// Get all categories in storage iteration order.
    ///
    /// Never fails: an underlying storage fault is logged and an empty
    /// sequence returned.
    fn get_all(&self) -> Vec<Category> {
        match self.select_all() {
            Ok(categories) => categories,
            Err(error) => {
                tracing::warn!("could not load categories: {error}");
                Vec::new()
            }
        }
    }

    /// Delete the category with `id`, a no-op when no row matches.
    /// Expenses referencing the category's name are left untouched.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an
    /// SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        self.connection
            .lock()
            .unwrap()
            .execute("DELETE FROM categories WHERE id = ?1;", (id,))?;

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                color TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Category {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            color: row.get(offset + 2)?,
        })
    }
}
