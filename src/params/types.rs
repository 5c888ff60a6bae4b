//! Validated request values.
//!
//! Each type is built by a `parse` constructor and can only exist in a valid
//! state. The caller's original text is retained where it is forwarded upstream.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::validate::{latitude_value, longitude_value, parse_number, parse_page_size, parse_radius, MAX_PAGE_SIZE};
use super::{Field, ParamError, Reason};

// ASCII word boundaries: a non-ASCII letter next to the token does not join it.
static FORMAT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(?:json|xml)(?-u:\b)").expect("format pattern is valid")
});

/// Rectangle given as `lat1,lon1,lat2,lon2`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
    raw: String,
}

impl BoundingBox {
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        let tokens: Vec<&str> = raw.split(',').collect();
        if tokens.len() != 4 {
            return Err(ParamError::new(Field::Bbox, Reason::Malformed));
        }

        // Shape of every token first, so "abc,1,2,3" reports as malformed
        // even when a later token is also out of range.
        for token in &tokens {
            parse_number(Field::Bbox, token)?;
        }

        Ok(Self {
            lat1: latitude_value(Field::Bbox, tokens[0])?,
            lon1: longitude_value(Field::Bbox, tokens[1])?,
            lat2: latitude_value(Field::Bbox, tokens[2])?,
            lon2: longitude_value(Field::Bbox, tokens[3])?,
            raw: raw.to_string(),
        })
    }

    /// The bbox exactly as the caller sent it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Circle around a point for NOTAM lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArea {
    pub longitude: f64,
    pub latitude: f64,
    pub radius: u32,
    longitude_raw: String,
    latitude_raw: String,
}

impl SearchArea {
    /// Validate longitude, latitude and radius in that order.
    pub fn parse(longitude: &str, latitude: &str, radius: &str) -> Result<Self, ParamError> {
        let lon = longitude_value(Field::Longitude, longitude)?;
        let lat = latitude_value(Field::Latitude, latitude)?;
        let radius = parse_radius(radius)?;

        Ok(Self {
            longitude: lon,
            latitude: lat,
            // Whole number in (0, 500), so the cast is exact.
            radius: radius as u32,
            longitude_raw: longitude.to_string(),
            latitude_raw: latitude.to_string(),
        })
    }

    pub fn longitude_str(&self) -> &str {
        &self.longitude_raw
    }

    pub fn latitude_str(&self) -> &str {
        &self.latitude_raw
    }
}

/// Number of NOTAMs per upstream page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        parse_page_size(raw).map(Self)
    }

    /// Absent parameter falls back to the maximum page.
    pub fn from_query(raw: Option<&str>) -> Result<Self, ParamError> {
        raw.map_or(Ok(Self::default()), Self::parse)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(MAX_PAGE_SIZE)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Json,
    Xml,
}

/// Requested response format. Forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    kind: FormatKind,
    raw: String,
}

impl FormatSpec {
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        let matches: Vec<&str> = FORMAT_TOKEN.find_iter(raw).map(|m| m.as_str()).collect();

        let kind = match matches.as_slice() {
            ["json"] => FormatKind::Json,
            ["xml"] => FormatKind::Xml,
            other => {
                return Err(ParamError::new(
                    Field::Format,
                    Reason::FormatTokenCount(other.len()),
                ))
            }
        };

        Ok(Self {
            kind,
            raw: raw.to_string(),
        })
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}
