//! Search filtering over project rows

use crate::core::project::ProjectRow;

/// Column the search box filters on.
pub const SEARCH_FIELD: &str = "project";

/// A filter handed to the table: keep rows whose `field` column matches `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub field: String,
    pub value: String,
}

/// Case-insensitive substring match of `term` against a name or ticker.
pub fn matches_name_or_ticker(name: &str, ticker: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_ascii_lowercase();
    name.to_ascii_lowercase().contains(&term) || ticker.to_ascii_lowercase().contains(&term)
}

/// Whether `row` matches the search box input. An empty term matches everything.
pub fn matches_search(row: &ProjectRow, term: &str) -> bool {
    matches_name_or_ticker(&row.name, &row.ticker, term)
}

pub fn build_filter_set(term: &str) -> Vec<FilterRule> {
    if term.is_empty() {
        return Vec::new();
    }
    vec![FilterRule {
        field: SEARCH_FIELD.to_string(),
        value: term.to_string(),
    }]
}

/// Holds the current search box contents.
///
/// Every update stores the lowercased input as-is; there is no debounce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(input: &str) -> Self {
        let mut term = Self::default();
        term.set(input);
        term
    }

    pub fn set(&mut self, input: &str) {
        self.0 = input.to_lowercase();
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
