//! Query parameter validation.
//!
//! # Data Flow
//! ```text
//! raw query string value
//!     → validate.rs (numeric pattern + range checks)
//!     → types.rs (BoundingBox, SearchArea, PageSize, FormatSpec)
//!     → upstream request builder
//! ```
//!
//! # Design Decisions
//! - Every check is a pure function over `&str`
//! - Failures are values (`ParamError`) naming the field and the reason
//! - Parsed types keep the caller's raw text, which is what gets forwarded upstream

pub mod types;
pub mod validate;

pub use types::{BoundingBox, FormatKind, FormatSpec, PageSize, SearchArea};
pub use validate::{
    is_valid_latitude, is_valid_longitude, is_valid_page_size, is_valid_radius, parse_latitude,
    parse_longitude, parse_radius,
};

use std::fmt;

/// Query parameters understood by the proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Bbox,
    Format,
    Longitude,
    Latitude,
    Radius,
    PageSize,
}

impl Field {
    /// Name of the field in the inbound query string.
    pub fn query_name(self) -> &'static str {
        match self {
            Field::Bbox => "bbox",
            Field::Format => "format",
            Field::Longitude => "locationLongitude",
            Field::Latitude => "locationLatitude",
            Field::Radius => "locationRadius",
            Field::PageSize => "pageSize",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_name())
    }
}

/// Why a value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Does not match the expected textual shape.
    Malformed,
    /// Parsed, but outside the accepted range.
    OutOfRange,
    /// Has a fractional part where a whole number is required.
    NotIntegral,
    /// A format string must name exactly one of `json` / `xml`.
    FormatTokenCount(usize),
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Malformed => f.write_str("malformed value"),
            Reason::OutOfRange => f.write_str("value out of range"),
            Reason::NotIntegral => f.write_str("value is not a whole number"),
            Reason::FormatTokenCount(n) => {
                write!(f, "expected exactly one of json/xml, found {}", n)
            }
        }
    }
}

/// A rejected query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ParamError {
    pub field: Field,
    pub reason: Reason,
}

impl ParamError {
    pub fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }
}
