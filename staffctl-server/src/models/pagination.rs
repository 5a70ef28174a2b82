//! Pagination types
//!
//! Page and limit arrive as query-string text and are coerced here.

use super::ValidationError;

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Default items per page
const DEFAULT_PER_PAGE: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination, clamping into the valid range.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Parse pagination from raw query values.
    ///
    /// Absent or empty values fall back to page 1 and the default page size.
    /// Non-numeric, non-positive and oversized (> 100) limits are rejected.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ValidationError> {
        let page = parse_positive("page", page)?.unwrap_or(1);
        let per_page = parse_positive("limit", limit)?.unwrap_or(DEFAULT_PER_PAGE);
        if per_page > MAX_PER_PAGE {
            return Err(ValidationError::TooLarge {
                field: "limit",
                max: i64::from(MAX_PER_PAGE),
            });
        }
        Ok(Self::new(page, per_page))
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn parse_positive(field: &'static str, raw: Option<&str>) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let value: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be an integer",
    })?;

    if value < 1 {
        return Err(ValidationError::OutOfRange { field, min: 1 });
    }

    Ok(Some(u32::try_from(value).unwrap_or(u32::MAX)))
}
