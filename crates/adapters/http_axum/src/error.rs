//! HTTP error response mapping.

use std::any::Any;

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wedge_domain::error::WedgeError;

/// JSON error body returned by every failing request.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps failures at the router boundary to a status code and JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// A service or capability provider failed.
    Domain(WedgeError),
    /// The request body could not be read off the connection.
    Unreadable(BytesRejection),
}

impl From<WedgeError> for ApiError {
    fn from(err: WedgeError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Domain(WedgeError::Request(err)) => {
                tracing::warn!(error = %err, "rejected request");
                json_error(StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(WedgeError::NotPresent(err)) => {
                tracing::error!(error = %err, "hardware not present");
                json_error(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            Self::Domain(WedgeError::Hardware(err)) => {
                match std::error::Error::source(&err) {
                    Some(source) => {
                        tracing::error!(error = %err, source = %source, "hardware error");
                    }
                    None => tracing::error!(error = %err, "hardware error"),
                }
                json_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Unreadable(rejection) => {
                tracing::warn!(error = %rejection, "unreadable request body");
                json_error(rejection.status(), rejection.body_text())
            }
        }
    }
}

/// Fallback for any (method, path) pair without a handler.
pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// Turns a panicking handler into a `500` JSON response and logs it.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "handler panicked");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}
