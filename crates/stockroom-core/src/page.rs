//! Pagination request and response types.

use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

/// Maximum page size accepted by `list`.
pub const MAX_PAGE_SIZE: u64 = 200;

/// A page request: 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of rows per page.
    #[serde(default = "default_size")]
    pub size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

impl PageRequest {
    /// Validates the request bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] when `page < 1` or `size` is outside
    /// `1..=MAX_PAGE_SIZE`.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.page < 1 {
            errors.add("page", "must be >= 1");
        }
        if self.size < 1 {
            errors.add("size", "must be >= 1");
        } else if self.size > MAX_PAGE_SIZE {
            errors.add("size", format!("must be at most {MAX_PAGE_SIZE}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Row offset for a `LIMIT ? OFFSET ?` query.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Row limit for a `LIMIT ? OFFSET ?` query.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size
    }
}

/// A page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// The rows on this page.
    pub content: Vec<T>,
    /// Total number of matching rows across all pages.
    pub total_elements: u64,
    /// Total number of pages (`ceil(total_elements / size)`).
    pub total_pages: u64,
    /// The 1-based page number that was requested.
    pub page: u64,
    /// The page size that was requested.
    pub size: u64,
}

impl<T> PageResponse<T> {
    /// Assembles a page response, computing `total_pages` from the total
    /// row count and page size.
    #[must_use]
    pub fn of(content: Vec<T>, total_elements: u64, page: u64, size: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            content,
            total_elements,
            total_pages,
            page,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 10);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageRequest { page: 3, size: 20 };
        assert_eq!(request.offset(), 40);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_page_zero_rejected() {
        let request = PageRequest { page: 0, size: 10 };
        let errors = request.validate().unwrap_err();
        assert!(errors.fields.contains_key("page"));
    }

    #[test]
    fn test_size_bounds() {
        let zero = PageRequest { page: 1, size: 0 };
        assert!(zero.validate().is_err());

        let oversized = PageRequest {
            page: 1,
            size: MAX_PAGE_SIZE + 1,
        };
        assert!(oversized.validate().is_err());

        let max = PageRequest {
            page: 1,
            size: MAX_PAGE_SIZE,
        };
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PageResponse::of(vec![1, 2, 3], 7, 1, 3);
        assert_eq!(page.total_pages, 3);

        let exact = PageResponse::of(vec![1, 2, 3], 6, 1, 3);
        assert_eq!(exact.total_pages, 2);

        let empty: PageResponse<i32> = PageResponse::of(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_response_json_is_camel_case() {
        let page = PageResponse::of(vec![1], 1, 1, 10);
        let json = serde_json::to_value(&page).expect("serializes");
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["content"][0], 1);
    }

    #[test]
    fn test_request_deserializes_from_query_shape() {
        let request: PageRequest = serde_json::from_str(r#"{"page": 2, "size": 50}"#).unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 50);
    }
}
