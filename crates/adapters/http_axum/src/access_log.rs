//! Access log: one line per completed request.
//!
//! Lines are emitted as `tracing` events on [`ACCESS_TARGET`] in the common
//! log format:
//!
//! ```text
//! 10.0.0.7 - - [19/Oct/2026 14:03:11] "GET /api/sys/bmc HTTP/1.1" 200 211
//! ```
//!
//! Where the lines end up is decided by the subscriber the binary installs.

use std::fmt;
use std::net::SocketAddr;

use axum::body::HttpBody;
use axum::extract::{ConnectInfo, Request};
use axum::http::header::CONTENT_LENGTH;
use axum::http::{Method, StatusCode, Uri, Version};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Local};

/// `tracing` target of access-log events.
pub const ACCESS_TARGET: &str = "wedge_rest::access";

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y %H:%M:%S";

/// One completed exchange.
#[derive(Debug)]
pub struct AccessLine {
    pub remote: Option<SocketAddr>,
    pub timestamp: DateTime<Local>,
    pub method: Method,
    pub uri: Uri,
    pub version: Version,
    pub status: StatusCode,
    pub length: u64,
}

impl fmt::Display for AccessLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remote {
            Some(addr) => write!(f, "{}", addr.ip())?,
            None => f.write_str("-")?,
        }
        write!(
            f,
            " - - [{}] \"{} {} {:?}\" {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.method,
            self.uri,
            self.version,
            self.status.as_u16(),
            self.length,
        )
    }
}

/// Middleware recording every request that passes through the router,
/// whatever its outcome.
pub async fn record(request: Request, next: Next) -> Response {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let method = request.method().clone();
    let uri = request.uri().clone();
    let version = request.version();

    let response = next.run(request).await;

    let line = AccessLine {
        remote,
        timestamp: Local::now(),
        method,
        uri,
        version,
        status: response.status(),
        length: body_length(&response),
    };
    tracing::info!(target: ACCESS_TARGET, "{line}");
    response
}

/// Declared `Content-Length`, else the exact body size when known, else 0.
fn body_length(response: &Response) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .or_else(|| response.body().size_hint().exact())
        .unwrap_or(0)
}
