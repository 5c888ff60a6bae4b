//! HTTP client for the upstream providers.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use url::Url;

use crate::config::{NotamCredentials, TimeoutConfig, UpstreamConfig};
use crate::params::{BoundingBox, FormatSpec, PageSize, SearchArea};
use crate::upstream::request::{notam_url, weather_url, WeatherProduct};
use crate::upstream::{Service, UpstreamError};

const CLIENT_ID: HeaderName = HeaderName::from_static("client_id");
const CLIENT_SECRET: HeaderName = HeaderName::from_static("client_secret");

/// Raw upstream payload plus the content type the provider declared.
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// Shared client for all outbound calls.
///
/// Cheap to clone; the underlying connection pool is reference counted.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    weather_base_url: String,
    notam_url: String,
    notam_headers: HeaderMap,
    max_body_bytes: usize,
}

impl UpstreamClient {
    /// Build the client. Credentials are turned into headers once, here.
    pub fn new(
        upstream: &UpstreamConfig,
        credentials: &NotamCredentials,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(upstream.user_agent.as_str())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs));
        if !upstream.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        let mut client_id = HeaderValue::from_str(&credentials.client_id)?;
        client_id.set_sensitive(true);
        let mut client_secret = HeaderValue::from_str(&credentials.client_secret)?;
        client_secret.set_sensitive(true);

        let mut notam_headers = HeaderMap::new();
        notam_headers.insert(CLIENT_ID, client_id);
        notam_headers.insert(CLIENT_SECRET, client_secret);

        Ok(Self {
            http,
            weather_base_url: upstream.weather_base_url.clone(),
            notam_url: upstream.notam_url.clone(),
            notam_headers,
            max_body_bytes: upstream.max_body_bytes,
        })
    }

    /// Fetch METAR or TAF data for a bounding box.
    pub async fn fetch_weather(
        &self,
        product: WeatherProduct,
        bbox: &BoundingBox,
        format: &FormatSpec,
    ) -> Result<UpstreamBody, UpstreamError> {
        let url = weather_url(&self.weather_base_url, product, bbox, format)?;
        self.get(Service::Weather, url, HeaderMap::new()).await
    }

    /// Fetch NOTAMs around a point, authenticating with the configured credentials.
    pub async fn fetch_notams(
        &self,
        area: &SearchArea,
        page_size: PageSize,
    ) -> Result<UpstreamBody, UpstreamError> {
        let url = notam_url(&self.notam_url, area, page_size)?;
        self.get(Service::Notam, url, self.notam_headers.clone()).await
    }

    async fn get(
        &self,
        service: Service,
        url: Url,
        headers: HeaderMap,
    ) -> Result<UpstreamBody, UpstreamError> {
        let start = Instant::now();
        tracing::debug!(service = %service, url = %url, "Forwarding request upstream");

        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = read_capped(response, self.max_body_bytes).await?;

        tracing::debug!(
            service = %service,
            status = %status,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        if body.is_empty() {
            return Err(UpstreamError::EmptyBody);
        }

        if let Some(marker) = service.zero_result_marker() {
            if contains(&body, marker.as_bytes()) {
                return Err(UpstreamError::NoResults);
            }
        }

        Ok(UpstreamBody { content_type, body })
    }
}

/// Read the whole body, giving up as soon as it grows past `limit`.
async fn read_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Bytes, UpstreamError> {
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(UpstreamError::BodyTooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(classify)? {
        if body.len() + chunk.len() > limit {
            return Err(UpstreamError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(body))
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(err)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
