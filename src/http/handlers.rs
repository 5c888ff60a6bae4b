//! Proxy endpoints.
//!
//! Every handler follows the same path: validate all parameters, make one
//! upstream call, relay. A parameter error returns before the client is touched.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use url::form_urlencoded;

use crate::error::ProxyError;
use crate::http::request::request_id;
use crate::http::response::relay;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::params::{BoundingBox, Field, FormatSpec, PageSize, SearchArea};
use crate::upstream::{Service, WeatherProduct};

/// Query accepted by the METAR and TAF endpoints.
#[derive(Debug, Default)]
pub struct WeatherQuery {
    pub bbox: Option<String>,
    pub format: Option<String>,
}

impl WeatherQuery {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let mut pairs = query_pairs(raw);
        Self {
            bbox: pairs.remove(Field::Bbox.query_name()),
            format: pairs.remove(Field::Format.query_name()),
        }
    }
}

/// Query accepted by the NOTAM endpoint.
#[derive(Debug, Default)]
pub struct NotamQuery {
    pub location_longitude: Option<String>,
    pub location_latitude: Option<String>,
    pub location_radius: Option<String>,
    pub page_size: Option<String>,
}

impl NotamQuery {
    pub fn from_raw(raw: Option<&str>) -> Self {
        let mut pairs = query_pairs(raw);
        Self {
            location_longitude: pairs.remove(Field::Longitude.query_name()),
            location_latitude: pairs.remove(Field::Latitude.query_name()),
            location_radius: pairs.remove(Field::Radius.query_name()),
            page_size: pairs.remove(Field::PageSize.query_name()),
        }
    }
}

/// Decode a query string. A repeated key keeps its last value, and decoding
/// never fails, so every request reaches the handler's own validation.
fn query_pairs(raw: Option<&str>) -> HashMap<String, String> {
    raw.map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn metar(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let start = Instant::now();
    let query = WeatherQuery::from_raw(raw.as_deref());
    let result = proxy_weather(&state, WeatherProduct::Metar, query).await;
    finish("metar", request_id(&headers), start, result)
}

pub async fn taf(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let start = Instant::now();
    let query = WeatherQuery::from_raw(raw.as_deref());
    let result = proxy_weather(&state, WeatherProduct::Taf, query).await;
    finish("taf", request_id(&headers), start, result)
}

pub async fn notam(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Response {
    let start = Instant::now();
    let query = NotamQuery::from_raw(raw.as_deref());
    let result = proxy_notam(&state, query).await;
    finish("notam", request_id(&headers), start, result)
}

pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

async fn proxy_weather(
    state: &AppState,
    product: WeatherProduct,
    query: WeatherQuery,
) -> Result<Response, ProxyError> {
    // bbox is checked completely before format is looked at.
    let bbox = BoundingBox::parse(required(&query.bbox, Field::Bbox)?)?;
    let format = FormatSpec::parse(required(&query.format, Field::Format)?)?;

    let upstream = state
        .client
        .fetch_weather(product, &bbox, &format)
        .await
        .map_err(|e| ProxyError::upstream(Service::Weather, e))?;

    Ok(relay(upstream))
}

async fn proxy_notam(state: &AppState, query: NotamQuery) -> Result<Response, ProxyError> {
    // Presence of all three first, then validity.
    let longitude = required(&query.location_longitude, Field::Longitude)?;
    let latitude = required(&query.location_latitude, Field::Latitude)?;
    let radius = required(&query.location_radius, Field::Radius)?;

    let area = SearchArea::parse(longitude, latitude, radius)?;
    let page_size = PageSize::from_query(query.page_size.as_deref())?;

    let upstream = state
        .client
        .fetch_notams(&area, page_size)
        .await
        .map_err(|e| ProxyError::upstream(Service::Notam, e))?;

    Ok(relay(upstream))
}

fn required(value: &Option<String>, field: Field) -> Result<&str, ProxyError> {
    value.as_deref().ok_or(ProxyError::Missing(field))
}

/// Log the outcome, record metrics and produce the response.
fn finish(
    endpoint: &'static str,
    request_id: &str,
    start: Instant,
    result: Result<Response, ProxyError>,
) -> Response {
    let response = match result {
        Ok(response) => {
            tracing::debug!(request_id = %request_id, endpoint, "Relayed upstream response");
            response
        }
        Err(err) => {
            match &err {
                ProxyError::Unavailable { service, source } => {
                    tracing::warn!(
                        request_id = %request_id,
                        endpoint,
                        service = %service,
                        error = %source,
                        "Upstream unavailable"
                    );
                    metrics::record_upstream_failure(*service, source.reason());
                }
                ProxyError::NoResults(service) => {
                    tracing::info!(request_id = %request_id, endpoint, service = %service, "No results in area");
                }
                ProxyError::Missing(_) | ProxyError::Invalid(_) => {
                    tracing::debug!(request_id = %request_id, endpoint, error = %err, "Rejected request");
                }
            }
            err.into_response()
        }
    };

    metrics::record_request(endpoint, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let query = WeatherQuery::from_raw(Some("bbox=abc&format=xml&bbox=1%2C2%2C3%2C4"));
        assert_eq!(query.bbox.as_deref(), Some("1,2,3,4"));
        assert_eq!(query.format.as_deref(), Some("xml"));
    }

    #[test]
    fn test_notam_query_names() {
        let query = NotamQuery::from_raw(Some(
            "locationLongitude=-118&locationLatitude=34&locationRadius=20&pageSize=5&extra=1",
        ));
        assert_eq!(query.location_longitude.as_deref(), Some("-118"));
        assert_eq!(query.location_latitude.as_deref(), Some("34"));
        assert_eq!(query.location_radius.as_deref(), Some("20"));
        assert_eq!(query.page_size.as_deref(), Some("5"));

        let empty = NotamQuery::from_raw(None);
        assert!(empty.location_longitude.is_none());
        assert!(empty.page_size.is_none());
    }
}
