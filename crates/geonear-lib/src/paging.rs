//! Page/limit pagination over an in-memory, already ordered result list.

use std::num::{IntErrorKind, NonZeroU64};

use crate::error::ValidationError;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: NonZeroU64,
    limit: NonZeroU64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: NonZeroU64::MIN,
            limit: NonZeroU64::new(DEFAULT_LIMIT).unwrap_or(NonZeroU64::MIN),
        }
    }
}

impl Pagination {
    /// Build a pagination request; both values must be at least 1.
    pub fn new(page: u64, limit: u64) -> Result<Self, ValidationError> {
        let page = NonZeroU64::new(page).ok_or(ValidationError::InvalidPagination)?;
        let limit = NonZeroU64::new(limit).ok_or(ValidationError::InvalidPagination)?;
        Ok(Self { page, limit })
    }

    /// Parse optional query-string values, applying defaults for absent ones.
    ///
    /// A supplied value must be a positive integer; blank strings, zero,
    /// negatives and decimals are rejected. Integers too large for `u64`
    /// saturate to `u64::MAX` and simply address an empty page.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ValidationError> {
        let page = parse_positive(page, DEFAULT_PAGE)?;
        let limit = parse_positive(limit, DEFAULT_LIMIT)?;
        Self::new(page, limit)
    }

    /// 1-based page number.
    pub fn page(&self) -> u64 {
        self.page.get()
    }

    /// Maximum number of items per page.
    pub fn limit(&self) -> u64 {
        self.limit.get()
    }

    /// Half-open `[start, end)` index range for this page.
    ///
    /// Saturates rather than overflowing for absurdly large pages.
    pub fn bounds(&self) -> (usize, usize) {
        let page = usize::try_from(self.page.get()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit.get()).unwrap_or(usize::MAX);
        let start = (page - 1).saturating_mul(limit);
        let end = page.saturating_mul(limit);
        (start, end)
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> Result<u64, ValidationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value = match raw.trim().parse::<u64>() {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => return Err(ValidationError::InvalidPagination),
    };

    if value == 0 {
        return Err(ValidationError::InvalidPagination);
    }
    Ok(value)
}

/// One page cut out of a full result list, with paging metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    /// Requested page number.
    pub page: u64,
    /// Number of pages at the requested limit (`ceil(total / limit)`).
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total: usize,
    /// Items on this page; empty when the page is out of range.
    pub items: Vec<T>,
}

/// Slice `items` according to `pagination`.
///
/// An out-of-range page produces an empty slice, not an error.
pub fn paginate<T>(items: Vec<T>, pagination: Pagination) -> PageSlice<T> {
    let total = items.len();
    let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
    let total_pages = total.div_ceil(limit);
    let (start, end) = pagination.bounds();

    let items = if start >= total {
        Vec::new()
    } else {
        items
            .into_iter()
            .skip(start)
            .take(end.min(total) - start)
            .collect()
    };

    PageSlice {
        page: pagination.page(),
        total_pages,
        total,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        let p = Pagination::parse(None, None).unwrap();
        assert_eq!(p.page(), DEFAULT_PAGE);
        assert_eq!(p.limit(), DEFAULT_LIMIT);
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn rejects_non_positive_or_malformed_values() {
        for raw in ["0", "-1", "abc", "", "1.5", " "] {
            assert_eq!(
                Pagination::parse(Some(raw), None),
                Err(ValidationError::InvalidPagination),
                "page {raw:?} should be rejected"
            );
            assert_eq!(
                Pagination::parse(None, Some(raw)),
                Err(ValidationError::InvalidPagination),
                "limit {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn huge_values_saturate_instead_of_failing() {
        let p = Pagination::parse(Some("5000000000"), Some("99999999999999999999999")).unwrap();
        assert_eq!(p.page(), 5_000_000_000);
        assert_eq!(p.limit(), u64::MAX);

        let page = paginate((0..3).collect::<Vec<_>>(), p);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 5_000_000_000);
    }

    #[test]
    fn huge_limit_returns_everything_on_first_page() {
        let p = Pagination::parse(None, Some("5000000000")).unwrap();
        let page = paginate((0..3).collect::<Vec<_>>(), p);
        assert_eq!(page.items, vec![0, 1, 2]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn bounds_follow_page_and_limit() {
        assert_eq!(Pagination::new(1, 10).unwrap().bounds(), (0, 10));
        assert_eq!(Pagination::new(3, 4).unwrap().bounds(), (8, 12));
    }

    #[test]
    fn bounds_saturate_for_huge_pages() {
        let (start, end) = Pagination::new(u64::MAX, u64::MAX).unwrap().bounds();
        assert!(start <= end);
    }

    #[test]
    fn paginate_slices_partial_last_page() {
        let page = paginate((0..7).collect(), Pagination::new(2, 5).unwrap());
        assert_eq!(page.items, vec![5, 6]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let page = paginate((0..3).collect::<Vec<_>>(), Pagination::new(5, 10).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn paginate_empty_input_has_zero_pages() {
        let page = paginate(Vec::<u8>::new(), Pagination::default());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
