//! Implements the derived spending views over a SQLite database.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, models::CategoryTotal, stores::SummaryStore};

/// Computes spending totals from a SQLite database.
///
/// Every call recomputes from the current table contents; nothing is
/// cached.
#[derive(Debug, Clone)]
pub struct SQLiteSummaryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSummaryStore {
    /// Create a new summary store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn select_total(&self) -> Result<f64, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT SUM(amount) FROM expenses;", [], |row| {
                row.get::<_, Option<f64>>(0)
            })
            .map(|total| total.unwrap_or(0.0))
            .map_err(Error::SqlError)
    }

    fn select_category_totals(&self) -> Result<Vec<CategoryTotal>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT e.category, SUM(e.amount) AS total, c.color
                 FROM expenses e
                 INNER JOIN categories c ON e.category = c.name
                 GROUP BY e.category, c.color
                 ORDER BY total DESC;",
            )?
            .query_map([], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                    color: row.get(2)?,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(Error::SqlError))
            .collect()
    }
}

impl SummaryStore for SQLiteSummaryStore {
    /// The sum of all expense amounts.
    ///
    /// Never fails: `0.0` is returned when there are no expenses or
    /// when the underlying query fails (logged).
    fn total(&self) -> f64 {
        match self.select_total() {
            Ok(total) => total,
            Err(error) => {
                tracing::warn!("could not compute total expenses: {error}");
                0.0
            }
        }
    }

    /// Per-category spending joined against the category table for the
    /// display color, ordered by total descending. Expenses whose
    /// category name matches no category row are excluded.
    ///
    /// Never fails: an underlying storage fault is logged and an empty
    /// sequence returned.
    fn category_totals(&self) -> Vec<CategoryTotal> {
        match self.select_category_totals() {
            Ok(totals) => totals,
            Err(error) => {
                tracing::warn!("could not compute category totals: {error}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod sqlite_summary_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        models::CategoryTotal,
        stores::{
            CategoryStore, ExpenseStore, SummaryStore,
            sqlite::{SQLiteStores, create_stores},
        },
    };

    use super::SQLiteSummaryStore;

    fn get_test_stores() -> SQLiteStores {
        create_stores(Connection::open_in_memory().unwrap()).unwrap()
    }

    const DATE: time::OffsetDateTime = datetime!(2024-08-07 12:00:00 UTC);

    #[test]
    fn total_is_zero_with_no_expenses() {
        let stores = get_test_stores();

        assert_eq!(stores.summary.total(), 0.0);
    }

    #[test]
    fn total_sums_all_amounts() {
        let mut stores = get_test_stores();
        stores.expenses.create(50.00, "Food", "Lunch", DATE).unwrap();
        stores
            .expenses
            .create(30.00, "Transport", "Bus fare", DATE)
            .unwrap();

        assert_eq!(stores.summary.total(), 80.00);
    }

    #[test]
    fn category_totals_group_and_order_by_total() {
        let mut stores = get_test_stores();
        stores.expenses.create(50.00, "Food", "Lunch", DATE).unwrap();
        stores.expenses.create(50.00, "Food", "Dinner", DATE).unwrap();
        stores
            .expenses
            .create(30.00, "Transport", "Bus fare", DATE)
            .unwrap();

        let totals = stores.summary.category_totals();

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Food".to_string(),
                    total: 100.00,
                    color: "#FF6384".to_string(),
                },
                CategoryTotal {
                    category: "Transport".to_string(),
                    total: 30.00,
                    color: "#36A2EB".to_string(),
                },
            ]
        );
    }

    #[test]
    fn expenses_without_a_category_row_are_excluded() {
        let mut stores = get_test_stores();
        stores
            .expenses
            .create(42.00, "Ghost", "dangling reference", DATE)
            .unwrap();

        assert_eq!(stores.summary.category_totals(), vec![]);
        // The expense itself is still stored and counted.
        assert_eq!(stores.summary.total(), 42.00);
    }

    #[test]
    fn deleting_a_category_hides_its_totals_but_keeps_its_expenses() {
        let mut stores = get_test_stores();
        stores.expenses.create(50.00, "Food", "Lunch", DATE).unwrap();

        let food_id = stores
            .categories
            .get_all()
            .into_iter()
            .find(|category| category.name == "Food")
            .unwrap()
            .id;
        stores.categories.delete(food_id).unwrap();

        assert_eq!(stores.summary.category_totals(), vec![]);
        assert_eq!(stores.expenses.get_all().len(), 1);
        assert_eq!(stores.summary.total(), 50.00);
    }

    #[test]
    fn totals_return_defaults_when_the_database_is_broken() {
        let store = SQLiteSummaryStore::new(Arc::new(Mutex::new(
            Connection::open_in_memory().unwrap(),
        )));

        assert_eq!(store.total(), 0.0);
        assert_eq!(store.category_totals(), vec![]);
    }
}
