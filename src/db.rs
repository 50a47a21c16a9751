/*! This module defines traits for interacting with the expense database,
the schema bootstrap routine, and the textual date encoding. */

use rusqlite::{
    Connection, Row, Transaction as SqlTransaction, TransactionBehavior, types::Type,
};
use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{
    Error,
    stores::sqlite::{SQLiteCategoryStore, SQLiteExpenseStore},
};

/// The categories inserted the first time a database is initialized.
///
/// Seeding is gated on the category table being empty, not on a version
/// flag, so it happens at most once per database lifetime.
pub const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Food", "#FF6384"),
    ("Transport", "#36A2EB"),
    ("Bills", "#FFCE56"),
    ("Entertainment", "#4BC0C0"),
    ("Others", "#9966FF"),
];

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table for the model if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping a `rusqlite::Row` to a concrete rust type.
pub trait MapRow {
    /// The type each row is converted into.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all
    /// the table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from the column at
    /// `offset`. Useful when tables have been joined and two types are
    /// constructed from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Set up the expense database: create the tables if they do not exist
/// and, only if the category table is currently empty, insert the
/// [DEFAULT_CATEGORIES].
///
/// Safe to call multiple times; repeat calls are no-ops with respect to
/// schema and seed effects. The whole routine runs in one exclusive
/// transaction so that either all default rows become visible or none.
/// A seed insert that fails on its own (e.g. a name collision) is
/// logged and skipped without aborting the rest.
///
/// # Errors
/// Returns an error if the schema could not be created or the
/// transaction could not be committed.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    SQLiteExpenseStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    seed_default_categories(&transaction)?;

    transaction.commit()?;

    Ok(())
}

fn seed_default_categories(connection: &Connection) -> Result<(), Error> {
    let category_count: i64 =
        connection.query_row("SELECT COUNT(id) FROM categories;", [], |row| row.get(0))?;

    if category_count > 0 {
        return Ok(());
    }

    for (name, color) in DEFAULT_CATEGORIES {
        if let Err(error) = connection.execute(
            "INSERT INTO categories (name, color) VALUES (?1, ?2);",
            (name, color),
        ) {
            tracing::warn!("could not insert default category {name}: {error}");
        }
    }

    Ok(())
}

/// Dates are stored as UTC ISO-8601 text with fixed three-digit
/// milliseconds. The fixed width keeps lexicographic comparison in SQL
/// (`ORDER BY date`, `BETWEEN`) equal to chronological comparison.
const STORED_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Encode a date-time as the text stored in the `date` column.
pub(crate) fn format_date(date: OffsetDateTime) -> Result<String, Error> {
    date.to_offset(UtcOffset::UTC)
        .format(STORED_DATE_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), date.to_string()))
}

/// Decode the text stored in the `date` column at `column_index`.
pub(crate) fn parse_date(column_index: usize, text: &str) -> Result<OffsetDateTime, rusqlite::Error> {
    PrimitiveDateTime::parse(text, STORED_DATE_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(column_index, Type::Text, Box::new(error))
        })
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::{DEFAULT_CATEGORIES, initialize};

    fn category_names(connection: &Connection) -> Vec<String> {
        connection
            .prepare("SELECT name FROM categories;")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn initialize_seeds_default_categories() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        // Categories are read back in storage iteration order, so the
        // comparison must not depend on insertion order.
        let mut want: Vec<String> = DEFAULT_CATEGORIES
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        want.sort();
        let mut got = category_names(&connection);
        got.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();
        initialize(&connection).unwrap();

        assert_eq!(category_names(&connection).len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn initialize_tolerates_a_failing_seed_insert() {
        let connection = Connection::open_in_memory().unwrap();
        // Pre-create the table with a constraint that rejects one of
        // the defaults, so exactly one seed insert fails.
        connection
            .execute(
                "CREATE TABLE categories (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE CHECK (name != 'Bills'),
                    color TEXT NOT NULL
                );",
                (),
            )
            .unwrap();

        initialize(&connection).unwrap();

        let mut got = category_names(&connection);
        got.sort();
        assert_eq!(got, vec!["Entertainment", "Food", "Others", "Transport"]);
    }

    #[test]
    fn initialize_skips_seeding_when_categories_exist() {
        let connection = Connection::open_in_memory().unwrap();
        connection
            .execute(
                "CREATE TABLE categories (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE,
                    color TEXT NOT NULL
                );",
                (),
            )
            .unwrap();
        connection
            .execute(
                "INSERT INTO categories (name, color) VALUES ('Savings', '#000000');",
                (),
            )
            .unwrap();

        initialize(&connection).unwrap();

        assert_eq!(category_names(&connection), vec!["Savings".to_string()]);
    }
}

#[cfg(test)]
mod date_format_tests {
    use time::macros::datetime;

    use super::{format_date, parse_date};

    #[test]
    fn date_round_trips_through_stored_text() {
        let date = datetime!(2024-08-07 12:30:45.5 UTC);

        let text = format_date(date).unwrap();

        assert_eq!(text, "2024-08-07T12:30:45.500Z");
        assert_eq!(parse_date(0, &text).unwrap(), date);
    }

    #[test]
    fn stored_text_is_normalized_to_utc() {
        let date = datetime!(2024-08-07 18:00:00 +06:00);

        let text = format_date(date).unwrap();

        assert_eq!(text, "2024-08-07T12:00:00.000Z");
    }

    #[test]
    fn stored_text_orders_chronologically() {
        let earlier = format_date(datetime!(2024-08-07 12:00:00.0 UTC)).unwrap();
        let later = format_date(datetime!(2024-08-07 12:00:00.5 UTC)).unwrap();

        assert!(earlier < later);
    }
}
