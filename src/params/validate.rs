//! Scalar validators for coordinates, radius and page size.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;

use super::{Field, ParamError, Reason};

/// Optional sign, digits, optional fractional part.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d+(\.\d+)?$").expect("numeric pattern is valid")
});

const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// Exclusive upper bound for a search radius.
pub const MAX_RADIUS: f64 = 500.0;

/// Inclusive upper bound for a NOTAM page.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Parse `raw` as a plain decimal number, attributing failures to `field`.
pub(crate) fn parse_number(field: Field, raw: &str) -> Result<f64, ParamError> {
    if !NUMBER.is_match(raw) {
        return Err(ParamError::new(field, Reason::Malformed));
    }
    raw.parse::<f64>()
        .map_err(|_| ParamError::new(field, Reason::Malformed))
}

fn in_range(field: Field, value: f64, range: &RangeInclusive<f64>) -> Result<f64, ParamError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::new(field, Reason::OutOfRange))
    }
}

pub(crate) fn latitude_value(field: Field, raw: &str) -> Result<f64, ParamError> {
    in_range(field, parse_number(field, raw)?, &LATITUDE)
}

pub(crate) fn longitude_value(field: Field, raw: &str) -> Result<f64, ParamError> {
    in_range(field, parse_number(field, raw)?, &LONGITUDE)
}

/// Latitude in decimal degrees, within [-90, 90].
pub fn parse_latitude(raw: &str) -> Result<f64, ParamError> {
    latitude_value(Field::Latitude, raw)
}

/// Longitude in decimal degrees, within [-180, 180].
pub fn parse_longitude(raw: &str) -> Result<f64, ParamError> {
    longitude_value(Field::Longitude, raw)
}

/// Search radius: a whole number strictly between 0 and 500.
pub fn parse_radius(raw: &str) -> Result<f64, ParamError> {
    let value = parse_number(Field::Radius, raw)?;
    if value <= 0.0 || value >= MAX_RADIUS {
        return Err(ParamError::new(Field::Radius, Reason::OutOfRange));
    }
    if value.trunc() != value {
        return Err(ParamError::new(Field::Radius, Reason::NotIntegral));
    }
    Ok(value)
}

/// Page size: a whole number in (0, 1000].
pub(crate) fn parse_page_size(raw: &str) -> Result<u32, ParamError> {
    let value = parse_number(Field::PageSize, raw)?;
    if value <= 0.0 || value > f64::from(MAX_PAGE_SIZE) {
        return Err(ParamError::new(Field::PageSize, Reason::OutOfRange));
    }
    if value.trunc() != value {
        return Err(ParamError::new(Field::PageSize, Reason::NotIntegral));
    }
    Ok(value as u32)
}

pub fn is_valid_latitude(raw: &str) -> bool {
    parse_latitude(raw).is_ok()
}

pub fn is_valid_longitude(raw: &str) -> bool {
    parse_longitude(raw).is_ok()
}

pub fn is_valid_radius(raw: &str) -> bool {
    parse_radius(raw).is_ok()
}

pub fn is_valid_page_size(raw: &str) -> bool {
    parse_page_size(raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_pattern() {
        for ok in ["0", "12", "-12", "+12", "12.5", "-0.25"] {
            assert!(parse_number(Field::Latitude, ok).is_ok(), "{ok}");
        }
        for bad in ["", "abc", "1e5", ".5", "5.", "1,5", " 5", "--1", "NaN", "inf"] {
            assert_eq!(
                parse_number(Field::Latitude, bad),
                Err(ParamError::new(Field::Latitude, Reason::Malformed)),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_latitude_range() {
        for ok in ["-90", "-89.999", "0", "45.5", "90", "90.0"] {
            assert!(is_valid_latitude(ok), "{ok}");
        }
        for bad in ["-90.0001", "90.5", "91", "-180", "1000"] {
            assert_eq!(
                parse_latitude(bad),
                Err(ParamError::new(Field::Latitude, Reason::OutOfRange)),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_longitude_range() {
        for ok in ["-180", "-179.5", "0", "120.25", "180"] {
            assert!(is_valid_longitude(ok), "{ok}");
        }
        for bad in ["-180.01", "180.5", "200", "-360"] {
            assert_eq!(
                parse_longitude(bad),
                Err(ParamError::new(Field::Longitude, Reason::OutOfRange)),
                "{bad}"
            );
        }
        assert!(!is_valid_longitude("east"));
    }

    #[test]
    fn test_radius() {
        assert_eq!(parse_radius("120"), Ok(120.0));
        assert!(is_valid_radius("1"));
        assert!(is_valid_radius("499"));
        assert!(is_valid_radius("120.0"));

        assert_eq!(parse_radius("500").unwrap_err().reason, Reason::OutOfRange);
        assert_eq!(parse_radius("0").unwrap_err().reason, Reason::OutOfRange);
        assert_eq!(parse_radius("-5").unwrap_err().reason, Reason::OutOfRange);
        assert_eq!(parse_radius("12.5").unwrap_err().reason, Reason::NotIntegral);
        assert_eq!(parse_radius("ten").unwrap_err().reason, Reason::Malformed);
    }

    #[test]
    fn test_radius_is_not_checked_as_latitude() {
        // Values above 90 are fine for a radius.
        assert!(is_valid_radius("250"));
        assert!(!is_valid_latitude("250"));
    }

    #[test]
    fn test_page_size() {
        assert_eq!(parse_page_size("1"), Ok(1));
        assert_eq!(parse_page_size("1000"), Ok(1000));
        assert!(!is_valid_page_size("0"));
        assert!(!is_valid_page_size("1001"));
        assert!(!is_valid_page_size("10.5"));
        assert!(!is_valid_page_size("-10"));
        assert!(!is_valid_page_size("all"));
    }
}
