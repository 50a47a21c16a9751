//! A rule-based parser that extracts a structured expense from one line
//! of free text, e.g. "Spent 500 BDT on groceries yesterday".
//!
//! The parser is deterministic and never fails: every step falls back
//! to a default (`amount = 0`, category `"Others"`, description
//! `"Uncategorized expense"`, no date) instead of returning an error.
//! It performs no I/O and does not touch the expense store.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// The category assigned when no keyword matches.
pub const FALLBACK_CATEGORY: &str = "Others";

/// The description used when nothing is left after stripping the verb,
/// amount, and date keyword from the input.
pub const FALLBACK_DESCRIPTION: &str = "Uncategorized expense";

/// Keywords mapped to category names, checked in order; the first
/// category with any keyword occurring as a substring of the cleaned
/// input wins. Matching is substring based on purpose, so "bus" also
/// matches inside a longer word.
const CATEGORY_KEYWORDS: [(&str, &[&str]); 4] = [
    (
        "Food",
        &[
            "groceries",
            "restaurant",
            "food",
            "meal",
            "dinner",
            "lunch",
            "breakfast",
            "coffee",
            "tea",
        ],
    ),
    (
        "Transport",
        &[
            "taxi", "bus", "train", "fuel", "gas", "parking", "uber", "ola", "car", "bike",
        ],
    ),
    (
        "Bills",
        &[
            "electricity",
            "water",
            "internet",
            "phone",
            "rent",
            "mortgage",
            "insurance",
        ],
    ),
    (
        "Entertainment",
        &[
            "movie",
            "concert",
            "game",
            "subscription",
            "netflix",
            "spotify",
            "book",
        ],
    ),
];

/// Matches an amount with an optional leading verb and optional
/// currency markers, e.g. "spent 500 BDT" or "rs. 99". The number may
/// appear bare with no marker at all, so incidental numbers (a
/// quantity, a time) can be picked up as the amount.
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\b(?:spent|paid|cost)\s+)?(?:₹|rs\.?|bdt)?\s*(\d+(?:\.\d+)?)\s*(?:bdt|taka|tk)?")
        .unwrap()
});

static VERB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:spent|paid|cost)\s+").unwrap());

static AMOUNT_STRIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:₹|rs\.?|bdt)?\s*\d+(?:\.\d+)?\s*(?:bdt|taka|tk)?").unwrap()
});

static DATE_KEYWORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(today|yesterday|tomorrow)\s*").unwrap());

/// A structured expense candidate extracted from free text.
///
/// This is only a suggestion for the caller to confirm and store; no
/// field has been validated against the expense database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedExpense {
    /// The first number-like token found in the input, `0.0` if none.
    pub amount: f64,
    /// The input with the verb phrase, amount, and date keyword
    /// stripped out, or [FALLBACK_DESCRIPTION] if nothing remains.
    pub description: String,
    /// The first category whose keyword list matches the input, or
    /// [FALLBACK_CATEGORY].
    pub category: String,
    /// The date implied by a `today`/`now`, `yesterday`, or `tomorrow`
    /// keyword. `None` when the input names no date; the caller
    /// supplies its own default (typically "now").
    #[serde(with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

/// Parse a free-form sentence into an expense candidate, resolving
/// relative date keywords against the current UTC time.
pub fn parse_expense(input: &str) -> ParsedExpense {
    parse_expense_at(input, OffsetDateTime::now_utc())
}

/// Parse a free-form sentence into an expense candidate, resolving
/// relative date keywords against `reference`.
///
/// Same input and reference always yield the same output.
pub fn parse_expense_at(input: &str, reference: OffsetDateTime) -> ParsedExpense {
    let amount = AMOUNT_PATTERN
        .captures(input)
        .and_then(|captures| captures.get(1))
        .and_then(|number| number.as_str().parse().ok())
        .unwrap_or(0.0);

    // Date keywords are matched case-sensitively against the raw
    // input, first keyword in this order wins.
    let date = if input.contains("today") || input.contains("now") {
        Some(reference)
    } else if input.contains("yesterday") {
        Some(reference - Duration::days(1))
    } else if input.contains("tomorrow") {
        Some(reference + Duration::days(1))
    } else {
        None
    };

    let category = classify(input);

    let description = VERB_PATTERN.replace(input, "");
    let description = AMOUNT_STRIP_PATTERN.replace(&description, "");
    let description = DATE_KEYWORD_PATTERN.replace(&description, "");
    let description = description.trim();
    let description = if description.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        description.to_string()
    };

    ParsedExpense {
        amount,
        description,
        category,
        date,
    }
}

/// Pick a category by keyword. The input is lowercased and stripped of
/// everything that is not a word character or whitespace before the
/// substring tests.
fn classify(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| cleaned.contains(keyword)) {
            return category.to_string();
        }
    }

    FALLBACK_CATEGORY.to_string()
}
