//! # Paginator
//!
//! Splits an ordered sequence into fixed-size, 1-indexed pages and computes the
//! window of page numbers shown as navigation links.
//!
//! Pagination never fails: a missing or malformed page request resolves to the
//! first page and a request past the end resolves to the last page. An empty
//! sequence still has one (empty) page.
//!
//! The window spans from 4 pages before the current page up to 4 pages after
//! it (an exclusive bound of current + 5), clipped to the available pages:
//!
//! ```text
//! current = 7, total = 20  ->  3 4 5 6 [7] 8 9 10 11
//! current = 2, total = 20  ->  1 [2] 3 4 5 6
//! current = 4, total = 4   ->  1 2 3 [4]
//! ```

use serde::ser::{Serialize, Serializer};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 3;
pub const WINDOW_LOOKBACK: usize = 4;
pub const WINDOW_LOOKAHEAD: usize = 5;

/// Contiguous ascending run of page numbers, serialized as a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    range: Range<usize>,
}

impl PageWindow {
    pub fn around(current: usize, total_pages: usize) -> Self {
        let start = current.saturating_sub(WINDOW_LOOKBACK).max(1);
        let end = (current + WINDOW_LOOKAHEAD).min(total_pages + 1);
        Self { range: start..end }
    }

    pub fn pages(&self) -> Vec<usize> {
        self.range.clone().collect()
    }

    pub fn iter(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn first(&self) -> Option<usize> {
        self.range.clone().next()
    }

    pub fn last(&self) -> Option<usize> {
        self.range.clone().next_back()
    }

    pub fn contains(&self, page: usize) -> bool {
        self.range.contains(&page)
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl Serialize for PageWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// One page of a paginated sequence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub window: PageWindow,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Parses a raw page parameter. Anything but a positive integer means page 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Number of pages needed for `count` items; at least one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Resolves the requested page against `count` items, clamping to the last page.
    pub fn resolve(&self, count: usize, raw_page: Option<&str>) -> usize {
        parse_page(raw_page).min(total_pages(count, self.page_size))
    }

    pub fn paginate<T>(&self, items: Vec<T>, raw_page: Option<&str>) -> Page<T> {
        let total_items = items.len();
        let total_pages = total_pages(total_items, self.page_size);
        let number = self.resolve(total_items, raw_page);

        let items = items
            .into_iter()
            .skip((number - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        Page {
            items,
            number,
            total_pages,
            total_items,
            window: PageWindow::around(number, total_pages),
        }
    }
}
