//! The traits the application surface depends on for storing and
//! summarizing expenses, and the SQLite backend implementing them.

pub mod category;
pub mod expense;
pub mod sqlite;
pub mod summary;

pub use category::CategoryStore;
pub use expense::ExpenseStore;
pub use summary::SummaryStore;
