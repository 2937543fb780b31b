//! Page-number pagination
//!
//! Splits an ordered result set of `total` rows into pages of `per_page`
//! rows and resolves a client-supplied page number to a page that exists.
//! Resolution fails open: junk input yields the first page and any number
//! outside the valid range yields the last page.
//!
//! ```
//! use userhub_shared::pagination::Paginator;
//!
//! let paginator = Paginator::new(25, 10);
//! assert_eq!(paginator.num_pages(), 3);
//!
//! let page = paginator.get_page(Some("7"));
//! assert_eq!(page.number, 3);
//! assert_eq!(page.offset(), 20);
//! assert_eq!(page.limit(), 10);
//! ```

use std::num::IntErrorKind;

/// Page returned when the client does not ask for one
pub const FIRST_PAGE: u64 = 1;

/// Page arithmetic over a known row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total: u64,
    per_page: u64,
}

/// A resolved, always-valid page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number
    pub number: u64,

    /// Rows per page
    pub per_page: u64,
}

impl Paginator {
    /// Creates a paginator; a `per_page` of zero is treated as one
    pub fn new(total: u64, per_page: u64) -> Self {
        Self {
            total,
            per_page: per_page.max(1),
        }
    }

    /// Number of pages; an empty result set still has one (empty) page
    pub fn num_pages(&self) -> u64 {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }

    /// Resolves a raw page parameter to an existing page
    ///
    /// - missing or non-integer → first page
    /// - below 1 or past the end, overflow included → last page
    pub fn get_page(&self, raw: Option<&str>) -> Page {
        let last = self.num_pages();
        let number = match raw.map(|value| value.trim().parse::<i64>()) {
            None => FIRST_PAGE,
            Some(Ok(n)) => u64::try_from(n)
                .ok()
                .filter(|&n| (FIRST_PAGE..=last).contains(&n))
                .unwrap_or(last),
            Some(Err(e)) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => last,
                _ => FIRST_PAGE,
            },
        };

        Page {
            number,
            per_page: self.per_page,
        }
    }
}

impl Page {
    /// Rows to skip before this page, ready to bind as SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        let skipped = (self.number - 1).saturating_mul(self.per_page);
        i64::try_from(skipped).unwrap_or(i64::MAX)
    }

    /// Page size, ready to bind as SQL `LIMIT`
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages_rounds_up() {
        assert_eq!(Paginator::new(10, 10).num_pages(), 1);
        assert_eq!(Paginator::new(11, 10).num_pages(), 2);
        assert_eq!(Paginator::new(1, 10).num_pages(), 1);
    }

    #[test]
    fn test_empty_result_has_one_page() {
        let paginator = Paginator::new(0, 10);
        assert_eq!(paginator.num_pages(), 1);

        let page = paginator.get_page(Some("3"));
        assert_eq!(page.number, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_missing_page_defaults_to_first() {
        let page = Paginator::new(50, 10).get_page(None);
        assert_eq!(page.number, FIRST_PAGE);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_non_integer_page_defaults_to_first() {
        let paginator = Paginator::new(50, 10);
        assert_eq!(paginator.get_page(Some("abc")).number, 1);
        assert_eq!(paginator.get_page(Some("2.5")).number, 1);
        assert_eq!(paginator.get_page(Some("")).number, 1);
    }

    #[test]
    fn test_out_of_range_pages_yield_last() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.get_page(Some("0")).number, 3);
        assert_eq!(paginator.get_page(Some("-4")).number, 3);
        assert_eq!(paginator.get_page(Some("4")).number, 3);
        assert_eq!(paginator.get_page(Some("1")).number, 1);
    }

    #[test]
    fn test_overflowing_page_yields_last() {
        let paginator = Paginator::new(25, 10);
        assert_eq!(paginator.get_page(Some("99999999999999999999")).number, 3);
        assert_eq!(paginator.get_page(Some("-99999999999999999999")).number, 3);
        assert_eq!(paginator.get_page(Some("9999999999999999999999x")).number, 1);
    }

    #[test]
    fn test_valid_page_offsets() {
        let paginator = Paginator::new(25, 10);

        let second = paginator.get_page(Some(" 2 "));
        assert_eq!(second.number, 2);
        assert_eq!(second.offset(), 10);
        assert_eq!(second.limit(), 10);

        let last = paginator.get_page(Some("3"));
        assert_eq!(last.offset(), 20);
    }

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let paginator = Paginator::new(3, 0);
        assert_eq!(paginator.num_pages(), 3);
        assert_eq!(paginator.get_page(Some("2")).offset(), 1);
    }
}
