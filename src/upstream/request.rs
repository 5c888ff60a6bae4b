//! Upstream URL composition.

use std::fmt;

use url::Url;

use crate::params::{BoundingBox, FormatSpec, PageSize, SearchArea};

/// Weather products served from the same data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherProduct {
    /// Routine reports.
    Metar,
    /// Terminal forecasts.
    Taf,
}

impl WeatherProduct {
    /// Path segment under the weather base URL.
    pub fn path(self) -> &'static str {
        match self {
            WeatherProduct::Metar => "metar",
            WeatherProduct::Taf => "taf",
        }
    }
}

impl fmt::Display for WeatherProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// `{base}/{product}?bbox=..&format=..`
pub fn weather_url(
    base: &str,
    product: WeatherProduct,
    bbox: &BoundingBox,
    format: &FormatSpec,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), product.path()))?;
    url.query_pairs_mut()
        .append_pair("bbox", bbox.as_str())
        .append_pair("format", format.as_str());
    Ok(url)
}

/// `{notam_url}?locationLongitude=..&locationLatitude=..&locationRadius=..&pageSize=..`
pub fn notam_url(
    base: &str,
    area: &SearchArea,
    page_size: PageSize,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("locationLongitude", area.longitude_str())
        .append_pair("locationLatitude", area.latitude_str())
        .append_pair("locationRadius", &area.radius.to_string())
        .append_pair("pageSize", &page_size.to_string());
    Ok(url)
}
