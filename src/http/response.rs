//! Response relay.
//!
//! # Responsibilities
//! - Relay the upstream body unchanged, with the upstream's content type
//! - Map `ProxyError` to a status code and a plain-text message
//!
//! # Design Decisions
//! - No transformation of upstream payloads
//! - Error bodies are the short legacy messages, never upstream content

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::error::ProxyError;
use crate::upstream::UpstreamBody;

/// Turn a successful upstream payload into the client response.
pub fn relay(upstream: UpstreamBody) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    if let Some(content_type) = upstream.content_type {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }
    response
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Bytes};
    use axum::http::{HeaderValue, StatusCode};

    use crate::params::Field;

    #[tokio::test]
    async fn test_relay_keeps_body_and_content_type() {
        let upstream = UpstreamBody {
            content_type: Some(HeaderValue::from_static("application/xml")),
            body: Bytes::from_static(b"<response/>"),
        };

        let response = relay(upstream);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/xml");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<response/>");
    }

    #[tokio::test]
    async fn test_relay_without_content_type() {
        let upstream = UpstreamBody {
            content_type: None,
            body: Bytes::from_static(b"KLAX 181853Z"),
        };
        let response = relay(upstream);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_error_response_is_plain_text() {
        let response = ProxyError::Missing(Field::Format).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Error: format definition missing!");
    }
}
