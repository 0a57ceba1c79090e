//! Page-number pagination for post listings.

use serde::Serialize;

use crate::error::DomainError;

/// Posts per page on every listing.
pub const PAGINATE_BY: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u64),
    Last,
}

/// A requested page, before the total item count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: PageNumber,
    pub size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

impl PageRequest {
    pub fn first() -> Self {
        Self {
            number: PageNumber::Number(1),
            size: PAGINATE_BY,
        }
    }

    pub fn number(number: u64) -> Self {
        Self {
            number: PageNumber::Number(number),
            size: PAGINATE_BY,
        }
    }

    /// Parse the `page` query parameter: absent, a positive integer or `last`.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        let number = match raw.map(str::trim) {
            None | Some("") => PageNumber::Number(1),
            Some("last") => PageNumber::Last,
            Some(value) => match value.parse::<u64>() {
                Ok(n) if n >= 1 => PageNumber::Number(n),
                _ => return Err(DomainError::not_found("page", value)),
            },
        };

        Ok(Self {
            number,
            size: PAGINATE_BY,
        })
    }

    /// Pin the request to a concrete page once the item count is known.
    ///
    /// There is always at least one page; asking past the last one is a
    /// not-found error.
    pub fn resolve(&self, total_items: u64) -> Result<PageWindow, DomainError> {
        let size = self.size.max(1);
        let total_pages = total_items.div_ceil(size).max(1);
        let number = match self.number {
            PageNumber::Number(n) => n,
            PageNumber::Last => total_pages,
        };

        if number == 0 || number > total_pages {
            return Err(DomainError::not_found("page", number));
        }

        Ok(PageWindow {
            number,
            size,
            total_items,
            total_pages,
        })
    }
}

/// A resolved page position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageWindow {
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.size
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
