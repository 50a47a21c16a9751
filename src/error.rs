//! Defines the crate level error type and its conversion from SQLite errors.

/// The errors that may occur when working with the expense database.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backing database file could not be opened or initialized.
    ///
    /// Write operations surface this error to the caller. Read
    /// operations never do, they degrade to an empty result instead.
    #[error("the expense database is unavailable: {0}")]
    Unavailable(String),

    /// A category with the given name already exists.
    ///
    /// Category names are unique, so the caller should present a
    /// "category already exists" message rather than a generic failure.
    #[error("a category named \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// An expense without an ID was passed to an update operation.
    ///
    /// Only expenses that have been stored (and therefore assigned an
    /// ID) can be updated.
    #[error("cannot update an expense that has no ID")]
    MissingExpenseId,

    /// A date-time could not be encoded as ISO-8601 text for storage.
    ///
    /// Callers should pass in the original error as a string and the
    /// date-time that caused the error.
    #[error("could not format date-time \"{1}\" for storage: {0}")]
    InvalidDateFormat(String, String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", error);
        Error::SqlError(error)
    }
}
