//! Khoroch is the core of a personal expense tracker: a SQLite backed
//! store for expenses and categories, derived spending summaries, and a
//! rule-based parser that turns a sentence like "Spent 500 BDT on
//! groceries yesterday" into a structured expense.
//!
//! The UI layer (screens, charts, currency formatting) lives elsewhere
//! and talks to this crate through the store traits in [stores] and the
//! pure [parser::parse_expense] function.

#![warn(missing_docs)]

mod error;
mod models;

pub mod db;
pub mod parser;
pub mod stores;

pub use error::Error;
pub use models::{Category, CategoryTotal, DatabaseID, Expense};
pub use parser::{ParsedExpense, parse_expense, parse_expense_at};
pub use stores::{
    CategoryStore, ExpenseStore, SummaryStore,
    sqlite::{SQLiteStores, create_stores, open},
};
