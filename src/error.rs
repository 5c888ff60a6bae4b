//! Request-terminating errors and their HTTP representation.
//!
//! Response bodies keep the short plain-text messages existing clients match on.

use axum::http::StatusCode;

use crate::params::{Field, ParamError};
use crate::upstream::{Service, UpstreamError};

/// Error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingParameter,
    InvalidParameter,
    UpstreamUnavailable,
    UpstreamTimeout,
    NoResults,
}

/// Anything that ends a proxied request without relaying an upstream body.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("missing parameter `{0}`")]
    Missing(Field),

    #[error("invalid parameter {0}")]
    Invalid(#[from] ParamError),

    #[error("{service} upstream unavailable: {source}")]
    Unavailable {
        service: Service,
        #[source]
        source: UpstreamError,
    },

    #[error("{0} upstream reported no results")]
    NoResults(Service),
}

impl ProxyError {
    /// Attribute an upstream failure to the service it came from.
    pub fn upstream(service: Service, err: UpstreamError) -> Self {
        match err {
            UpstreamError::NoResults => ProxyError::NoResults(service),
            source => ProxyError::Unavailable { service, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProxyError::Missing(_) => ErrorKind::MissingParameter,
            ProxyError::Invalid(_) => ErrorKind::InvalidParameter,
            ProxyError::Unavailable {
                source: UpstreamError::Timeout,
                ..
            } => ErrorKind::UpstreamTimeout,
            ProxyError::Unavailable { .. } => ErrorKind::UpstreamUnavailable,
            ProxyError::NoResults(_) => ErrorKind::NoResults,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MissingParameter | ErrorKind::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            ErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::NoResults => StatusCode::NOT_FOUND,
        }
    }

    /// Body text sent to the caller.
    pub fn message(&self) -> &'static str {
        match self {
            ProxyError::Missing(field) => missing_message(*field),
            ProxyError::Invalid(err) => invalid_message(err.field),
            ProxyError::Unavailable {
                service: Service::Weather,
                ..
            } => "Query incorrect or service not available",
            ProxyError::Unavailable {
                service: Service::Notam,
                ..
            } => "ERROR: Failure Contacting Server",
            ProxyError::NoResults(Service::Weather) => "No weather reports found in specified area",
            ProxyError::NoResults(Service::Notam) => "No NOTAMs found in specified area",
        }
    }
}

fn missing_message(field: Field) -> &'static str {
    match field {
        Field::Bbox => "Error: bbox definition missing!",
        Field::Format => "Error: format definition missing!",
        Field::Longitude => "No longitude specified",
        Field::Latitude => "No latitude specified",
        Field::Radius => "No search radius specified",
        Field::PageSize => "No page size specified",
    }
}

fn invalid_message(field: Field) -> &'static str {
    match field {
        Field::Bbox => "Invalid bounding box string!",
        Field::Format => "Invalid format string!",
        Field::Longitude => "Invalid longitude string!",
        Field::Latitude => "Invalid latitude string!",
        Field::Radius => "Invalid radius string!",
        Field::PageSize => "Invalid page size string!",
    }
}
