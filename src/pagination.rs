//! Page arithmetic shared by the list views.

use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total: u64,
    per_page: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: u64,
    pub num_pages: u64,
    pub per_page: u64,
    pub previous: Option<u64>,
    pub next: Option<u64>,
}

impl Paginator {
    /// A `per_page` of zero is treated as one.
    pub fn new(total: i64, per_page: u64) -> Self {
        Paginator {
            total: total.max(0) as u64,
            per_page: per_page.max(1),
        }
    }

    /// Always at least one, so that an empty list still has a first page.
    pub fn num_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn page(&self, number: Option<u64>) -> Result<Page> {
        let number = number.unwrap_or(1);
        let num_pages = self.num_pages();
        if number == 0 || number > num_pages {
            return Err(Error::NotFound);
        }

        Ok(Page {
            number,
            num_pages,
            per_page: self.per_page,
            previous: (number > 1).then(|| number - 1),
            next: (number < num_pages).then(|| number + 1),
        })
    }
}

impl Page {
    pub fn offset(&self) -> i64 {
        ((self.number - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}
