//! Defines the summary store trait for derived spending views.

use crate::models::CategoryTotal;

/// Read-only totals recomputed from the current store contents on every
/// call. Nothing is cached or maintained incrementally, which keeps the
/// views impossible to go stale at the cost of an O(n) scan per call.
pub trait SummaryStore {
    /// The sum of all expense amounts. `0.0` when there are no expenses
    /// or on failure.
    fn total(&self) -> f64;

    /// Per-category spending, ordered by total descending.
    ///
    /// An inner join: only categories with at least one matching
    /// expense and an existing category row appear. Expenses whose
    /// category name matches no category row are silently excluded.
    /// Empty on failure.
    fn category_totals(&self) -> Vec<CategoryTotal>;
}
