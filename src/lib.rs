//! Aviation data proxy.
//!
//! Thin validating proxy in front of the aviationweather.gov data API (METAR,
//! TAF) and the FAA NOTAM API.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ http::handlers ──▶ params (validate)
//!                                              │
//!                                              ▼
//!                                      upstream::request (compose URL)
//!                                              │
//!                                              ▼
//!                                      upstream::client ─────────────▶ Provider
//!                                              │
//!     Client Response                          ▼
//!     ◀────────────── http::response (relay body or plain-text error)
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod params;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::{ErrorKind, ProxyError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
