//! # Search Filter
//!
//! Narrows a sequence of records to those whose searchable text contains the
//! query, ignoring case. The input order is preserved, so results keep the
//! store's default ordering.
//!
//! A missing, empty or whitespace-only query matches everything. Surrounding
//! whitespace is ignored when matching; the query is echoed back exactly as
//! the caller supplied it so it can be redisplayed in a search box.

use serde::Serialize;

/// Something that can be matched against a free-text query.
pub trait Searchable {
    /// Text fields the query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<T> {
    pub items: Vec<T>,
    pub query_echo: String,
}

/// Returns the lowercase needle for a query, or `None` when the query matches everything.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

pub fn search<T: Searchable>(items: Vec<T>, query: Option<&str>) -> SearchResult<T> {
    let query_echo = query.unwrap_or_default().to_string();

    let items = match normalize_query(query) {
        Some(needle) => items
            .into_iter()
            .filter(|item| item.matches(&needle))
            .collect(),
        None => items,
    };

    SearchResult { items, query_echo }
}
