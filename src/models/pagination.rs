use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PER_PAGE: i64 = 10;

// Query parameters for list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// LIMIT/OFFSET window for a list query.
///
/// A `limit` of zero or less means the whole table fits on a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Pages below 1 are read as page 1.
    pub fn new(page: i64, per_page: i64) -> Self {
        let offset = if per_page > 0 {
            (page.max(1) - 1).saturating_mul(per_page)
        } else {
            0
        };

        Self {
            limit: per_page,
            offset,
        }
    }

    /// LIMIT to bind in SQLite, where a negative value removes the bound.
    pub fn sql_limit(&self) -> i64 {
        if self.limit > 0 { self.limit } else { -1 }
    }

    pub fn current_page(&self) -> i64 {
        if self.limit > 0 {
            self.offset / self.limit + 1
        } else {
            1
        }
    }

    pub fn total_pages(&self, total_records: i64) -> i64 {
        if self.limit > 0 {
            total_records.saturating_add(self.limit - 1) / self.limit
        } else {
            1
        }
    }

    pub fn page_info(&self, total_records: i64) -> PageInfo {
        PageInfo {
            current_page: self.current_page(),
            total_records,
            total_pages: self.total_pages(total_records),
        }
    }
}

impl From<ListQuery> for Pagination {
    fn from(query: ListQuery) -> Self {
        Self::new(query.page, query.per_page)
    }
}

/// Pagination block of list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: i64,
    pub total_records: i64,
    pub total_pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_ten() {
        let p = Pagination::from(ListQuery::default());
        assert_eq!(p, Pagination { limit: 10, offset: 0 });
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(2, 10).offset, 10);
        assert_eq!(Pagination::new(3, 25).offset, 50);
    }

    #[test]
    fn twenty_five_records_span_three_pages() {
        let first = Pagination::new(1, 10);
        assert_eq!(
            first.page_info(25),
            PageInfo {
                current_page: 1,
                total_records: 25,
                total_pages: 3
            }
        );

        let last = Pagination::new(3, 10);
        assert_eq!(last.offset, 20);
        assert_eq!(last.current_page(), 3);
    }

    #[test]
    fn page_below_one_reads_first_page() {
        assert_eq!(Pagination::new(0, 10).offset, 0);
        assert_eq!(Pagination::new(-4, 10).current_page(), 1);
    }

    #[test]
    fn non_positive_per_page_is_one_unbounded_page() {
        let p = Pagination::new(5, 0);
        assert_eq!(p.offset, 0);
        assert_eq!(p.sql_limit(), -1);
        assert_eq!(p.page_info(42).total_pages, 1);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn empty_table_has_no_pages() {
        assert_eq!(Pagination::new(1, 10).total_pages(0), 0);
    }

    #[test]
    fn huge_per_page_does_not_overflow() {
        let p = Pagination::new(i64::MAX, i64::MAX);
        assert_eq!(p.offset, i64::MAX);
        assert_eq!(p.total_pages(3), 1);
    }

    #[test]
    fn query_fills_missing_params() {
        let query: ListQuery = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.per_page, 10);
    }
}
