//! Fixed-size pagination over an in-memory collection
//!
//! Page numbers are 1-based. Out-of-range requests clamp to the nearest
//! valid page, and an empty collection still has one (empty) page.

use serde::Serialize;

/// Number of external records shown per page
pub const EXTERNAL_PAGE_SIZE: usize = 10;

/// Splits a collection into pages of `per_page` items
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    per_page: usize,
}

impl<T: Clone> Paginator<T> {
    /// Create a paginator. A `per_page` of zero is treated as one.
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }

    /// Total number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Total number of pages, never less than one
    pub fn num_pages(&self) -> usize {
        self.count().div_ceil(self.per_page).max(1)
    }

    /// Clamp a requested page number into `1..=num_pages`
    pub fn clamp(&self, number: i64) -> usize {
        let last = self.num_pages();
        if number < 1 {
            1
        } else if number as u64 > last as u64 {
            last
        } else {
            number as usize
        }
    }

    /// Get a page, clamping out-of-range numbers
    pub fn page(&self, number: i64) -> Page<T> {
        let number = self.clamp(number);
        let start = (number - 1) * self.per_page;
        let end = (start + self.per_page).min(self.count());
        let items = if start < end {
            self.items[start..end].to_vec()
        } else {
            Vec::new()
        };

        Page {
            number,
            num_pages: self.num_pages(),
            count: self.count(),
            start_index: if items.is_empty() { 0 } else { start + 1 },
            end_index: end,
            has_previous: number > 1,
            has_next: number < self.num_pages(),
            items,
        }
    }

    /// Get a page from a raw query value. Missing or non-integer input
    /// selects the first page; integers of any size are clamped.
    pub fn page_from_param(&self, raw: Option<&str>) -> Page<T> {
        let number = raw.and_then(parse_page_number).unwrap_or(1);
        self.page(number)
    }
}

/// Parse an optionally signed decimal integer, saturating at the `i64`
/// bounds instead of failing on overflow.
fn parse_page_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match (digits.parse::<i64>(), negative) {
        (Ok(n), false) => Some(n),
        (Ok(n), true) => Some(-n),
        (Err(_), false) => Some(i64::MAX),
        (Err(_), true) => Some(i64::MIN),
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    /// 1-based index of the first item on this page, 0 when empty
    pub start_index: usize,
    /// 1-based index of the last item on this page, 0 when empty
    pub end_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn next_page_number(&self) -> Option<usize> {
        self.has_next.then_some(self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<usize> {
        self.has_previous.then_some(self.number - 1)
    }
}
