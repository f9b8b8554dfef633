//! # Listing Handler
//!
//! Composes the search filter and the paginator into the result bundle every
//! list view renders:
//!
//! ```text
//! records (store order) -> search(query) -> paginate(page) -> Listing
//! ```

use crate::paginate::{PageWindow, Paginator};
use crate::search::{search, Searchable};
use serde::Serialize;

/// Caller input for one listing request. Both parameters are raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRequest {
    pub query: Option<String>,
    pub page: Option<String>,
}

impl ListingRequest {
    pub fn new(query: Option<String>, page: Option<String>) -> Self {
        Self { query, page }
    }

    pub fn page(page: impl Into<String>) -> Self {
        Self {
            query: None,
            page: Some(page.into()),
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            page: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub query_echo: String,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_window: PageWindow,
    pub total_items: usize,
}

impl<T> Listing<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Listing<U> {
        Listing {
            items: self.items.into_iter().map(f).collect(),
            query_echo: self.query_echo,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_window: self.page_window,
            total_items: self.total_items,
        }
    }
}

pub fn build<T: Searchable>(
    records: Vec<T>,
    request: &ListingRequest,
    paginator: &Paginator,
) -> Listing<T> {
    let found = search(records, request.query.as_deref());
    let page = paginator.paginate(found.items, request.page.as_deref());

    Listing {
        items: page.items,
        query_echo: found.query_echo,
        total_pages: page.total_pages,
        current_page: page.number,
        page_window: page.window,
        total_items: page.total_items,
    }
}
