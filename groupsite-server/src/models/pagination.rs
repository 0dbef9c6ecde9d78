//! react-admin style list parameters
//!
//! Clients send `_sort`, `_order`, `_start` and `_end` and expect a
//! `Content-Range: <resource> <start>-<end>/<total>` header back.

use std::fmt;

use serde::Deserialize;

use super::ValidationError;

/// Default window start
const DEFAULT_START: u64 = 0;

/// Default window end (exclusive)
const DEFAULT_END: u64 = 5;

/// Column used when `_sort` is absent or not allowed
pub const DEFAULT_SORT: &str = "id";

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive parse; anything other than `desc` is ascending.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Half-open row window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

impl Window {
    /// Create a window, rejecting `end < start`.
    pub fn new(start: u64, end: u64) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::OutOfRange {
                field: "_end",
                reason: "must not be less than _start",
            });
        }
        Ok(Self { start, end })
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        self.start
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> u64 {
        self.end - self.start
    }
}

/// A resolved, paginated list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Column identifier, always taken from an allow-list
    pub sort: &'static str,
    pub order: SortOrder,
    pub window: Window,
}

/// List request, either one page or the whole table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListRequest {
    Paginated(PageRequest),
    Full,
}

/// Raw query parameters as sent by react-admin
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_sort")]
    pub sort: Option<String>,
    #[serde(rename = "_order")]
    pub order: Option<String>,
    #[serde(rename = "_start")]
    pub start: Option<String>,
    #[serde(rename = "_end")]
    pub end: Option<String>,
}

impl ListParams {
    /// Whether the caller asked for a window explicitly.
    pub fn has_window(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Always paginate, filling in defaults.
    pub fn into_page(
        self,
        sortable: &'static [&'static str],
    ) -> Result<PageRequest, ValidationError> {
        let start = parse_bound("_start", self.start.as_deref(), DEFAULT_START)?;
        let end = parse_bound("_end", self.end.as_deref(), DEFAULT_END)?;

        Ok(PageRequest {
            sort: resolve_sort(self.sort.as_deref(), sortable),
            order: self.order.as_deref().map(SortOrder::parse).unwrap_or_default(),
            window: Window::new(start, end)?,
        })
    }

    /// Paginate only when `_start` or `_end` was supplied.
    pub fn into_request(
        self,
        sortable: &'static [&'static str],
    ) -> Result<ListRequest, ValidationError> {
        if self.has_window() {
            self.into_page(sortable).map(ListRequest::Paginated)
        } else {
            Ok(ListRequest::Full)
        }
    }
}

fn parse_bound(
    field: &'static str,
    raw: Option<&str>,
    default: u64,
) -> Result<u64, ValidationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    let value: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field,
        value: raw.to_owned(),
    })?;
    u64::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        reason: "must not be negative",
    })
}

/// Map a requested sort key onto an allowed column.
///
/// Unknown keys fall back to [`DEFAULT_SORT`]; the raw key never reaches SQL.
pub fn resolve_sort(requested: Option<&str>, sortable: &'static [&'static str]) -> &'static str {
    let Some(requested) = requested else {
        return DEFAULT_SORT;
    };
    match sortable.iter().find(|column| **column == requested) {
        Some(column) => *column,
        None => {
            tracing::warn!(sort = %requested, "unknown sort key, using '{}'", DEFAULT_SORT);
            DEFAULT_SORT
        }
    }
}

/// Value of the `Content-Range` response header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    pub resource: &'static str,
    pub window: Window,
    pub total: i64,
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}/{}",
            self.resource, self.window.start, self.window.end, self.total
        )
    }
}
