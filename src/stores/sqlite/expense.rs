//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{self, CreateTable, MapRow},
    models::{DatabaseID, Expense},
    stores::ExpenseStore,
};

/// Stores expenses in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn select_all(&self) -> Result<Vec<Expense>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, amount, category, description, date FROM expenses
                 ORDER BY date DESC;",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
            .collect()
    }

    fn select_date_range(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Expense>, Error> {
        let start_text = db::format_date(start)?;
        let end_text = db::format_date(end)?;

        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, amount, category, description, date FROM expenses
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY date DESC;",
            )?
            .query_map((start_text, end_text), Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
            .collect()
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Record a new expense and return its assigned ID.
    ///
    /// # Errors
    /// This function will return an [Error::InvalidDateFormat] if
    /// `date` cannot be encoded as text, or an [Error::SqlError] if
    /// there is an SQL error.
    fn create(
        &mut self,
        amount: f64,
        category: &str,
        description: &str,
        date: OffsetDateTime,
    ) -> Result<DatabaseID, Error> {
        let date_text = db::format_date(date)?;

        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO expenses (amount, category, description, date)
             VALUES (?1, ?2, ?3, ?4);",
            (amount, category, description, date_text),
        )?;

        Ok(connection.last_insert_rowid())
    }

    /// Get all expenses, most recent date first.
    ///
    /// Never fails: an underlying storage fault is logged and an empty
    /// sequence returned.
    fn get_all(&self) -> Vec<Expense> {
        match self.select_all() {
            Ok(expenses) => expenses,
            Err(error) => {
                tracing::warn!("could not load expenses: {error}");
                Vec::new()
            }
        }
    }

    /// Get the expenses dated within `[start, end]` inclusive, most
    /// recent date first. Same silent-empty failure policy as
    /// [get_all](Self::get_all).
    fn get_date_range(&self, start: OffsetDateTime, end: OffsetDateTime) -> Vec<Expense> {
        match self.select_date_range(start, end) {
            Ok(expenses) => expenses,
            Err(error) => {
                tracing::warn!("could not load expenses for date range: {error}");
                Vec::new()
            }
        }
    }

    /// Overwrite all fields of the stored row matching `expense.id`.
    ///
    /// # Errors
    /// This function will return an [Error::MissingExpenseId] if the
    /// expense has not been stored yet, an [Error::InvalidDateFormat]
    /// if the date cannot be encoded, or an [Error::SqlError] if there
    /// is an SQL error.
    fn update(&mut self, expense: &Expense) -> Result<(), Error> {
        let id = expense.id.ok_or(Error::MissingExpenseId)?;
        let date_text = db::format_date(expense.date)?;

        self.connection.lock().unwrap().execute(
            "UPDATE expenses SET amount = ?1, category = ?2, description = ?3, date = ?4
             WHERE id = ?5;",
            (
                expense.amount,
                &expense.category,
                &expense.description,
                date_text,
                id,
            ),
        )?;

        Ok(())
    }

    /// Delete the expense with `id`, a no-op when no row matches.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an
    /// SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        self.connection
            .lock()
            .unwrap()
            .execute("DELETE FROM expenses WHERE id = ?1;", (id,))?;

        Ok(())
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                date TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let category = row.get(offset + 2)?;
        let description: Option<String> = row.get(offset + 3)?;

        let raw_date: String = row.get(offset + 4)?;
        let date = db::parse_date(offset + 4, &raw_date)?;

        Ok(Expense {
            id: Some(id),
            amount,
            category,
            description: description.unwrap_or_default(),
            date,
        })
    }
}
