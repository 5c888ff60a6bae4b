//! Outbound calls to the aviation data providers.
//!
//! # Data Flow
//! ```text
//! validated params
//!     → request.rs (compose upstream URL)
//!     → client.rs (single GET, bounded timeout, optional credential headers)
//!     → UpstreamBody | UpstreamError
//! ```
//!
//! # Design Decisions
//! - One shared `reqwest::Client`, built at startup with credentials injected
//! - Exactly one attempt per inbound request; no retries, no caching
//! - Upstream body is buffered because the zero-result check needs all of it;
//!   the buffer is capped by `upstream.max_body_bytes`

pub mod client;
pub mod request;

pub use client::{UpstreamBody, UpstreamClient};
pub use request::{notam_url, weather_url, WeatherProduct};

use std::fmt;

use reqwest::StatusCode;

/// Which provider a call goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// aviationweather.gov data API (METAR, TAF).
    Weather,
    /// FAA NOTAM API.
    Notam,
}

impl Service {
    /// Literal marker the provider puts in a body that matched nothing.
    pub fn zero_result_marker(self) -> Option<&'static str> {
        match self {
            Service::Weather => None,
            Service::Notam => Some("\"totalCount\":0"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Weather => "weather",
            Service::Notam => "notam",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures while talking to an upstream provider.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid credential header value")]
    Credential(#[from] reqwest::header::InvalidHeaderValue),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream returned an empty body")]
    EmptyBody,

    #[error("upstream body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("upstream reported zero results")]
    NoResults,
}

impl UpstreamError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            UpstreamError::Client(_) => "client",
            UpstreamError::Url(_) => "url",
            UpstreamError::Credential(_) => "credential",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::EmptyBody => "empty_body",
            UpstreamError::BodyTooLarge { .. } => "body_too_large",
            UpstreamError::NoResults => "no_results",
        }
    }
}
