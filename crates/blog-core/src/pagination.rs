//! Page-number pagination.
//!
//! Pages are 1-based. An empty result still has one (empty) page, so the
//! first page of an empty listing is valid while every other page is not.

use crate::error::DomainError;

/// Number of posts per listing page.
pub const PAGE_SIZE: u64 = 10;

/// A requested page, parsed from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(i64),
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::Number(1)
    }
}

impl PageRequest {
    /// Parse a raw page token. Absent means the first page; `last` means the
    /// final page; anything else must be an integer.
    pub fn parse(token: Option<&str>) -> Result<Self, DomainError> {
        let Some(token) = token else {
            return Ok(Self::default());
        };

        let token = token.trim();
        if token == "last" {
            return Ok(Self::Last);
        }

        token.parse::<i64>().map(Self::Number).map_err(|_| {
            DomainError::PageNotFound(format!("'{token}' is not a page number"))
        })
    }
}

/// The resolved position of one page within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page (1-based).
    pub number: u64,
    /// Total number of pages, at least 1.
    pub num_pages: u64,
    /// Total number of items across all pages.
    pub count: u64,
    pub page_size: u64,
}

impl PageWindow {
    /// Resolve `request` against a result set of `count` items.
    pub fn resolve(request: PageRequest, count: u64, page_size: u64) -> Result<Self, DomainError> {
        let page_size = page_size.max(1);
        let num_pages = count.div_ceil(page_size).max(1);

        let number = match request {
            PageRequest::Last => num_pages,
            PageRequest::Number(n) if n < 1 => {
                return Err(DomainError::PageNotFound(format!(
                    "page {n} is less than 1"
                )));
            }
            PageRequest::Number(n) => n as u64,
        };

        if number > num_pages {
            return Err(DomainError::PageNotFound(format!(
                "page {number} is past the last page ({num_pages})"
            )));
        }

        Ok(Self {
            number,
            num_pages,
            count,
            page_size,
        })
    }

    /// Number of items to skip.
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.page_size
    }

    /// Number of items on this page.
    pub fn len(&self) -> u64 {
        self.count
            .saturating_sub(self.offset())
            .min(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 when empty.
    pub fn start_index(&self) -> u64 {
        if self.is_empty() { 0 } else { self.offset() + 1 }
    }

    /// 1-based index of the last item on this page, 0 when empty.
    pub fn end_index(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.offset() + self.len()
        }
    }
}

/// One page of results plus its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            window: self.window,
        }
    }
}

/// Slice an in-memory, already ordered result set.
pub fn paginate<T>(items: Vec<T>, request: PageRequest, page_size: u64) -> Result<Page<T>, DomainError> {
    let window = PageWindow::resolve(request, items.len() as u64, page_size)?;
    let items = items
        .into_iter()
        .skip(window.offset() as usize)
        .take(window.page_size as usize)
        .collect();

    Ok(Page { items, window })
}
