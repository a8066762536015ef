//! Response serializer: turns a capability [`Reply`] into an HTTP response.

use axum::Json;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use wedge_domain::reply::Reply;

/// `200 OK` carrying a capability reply.
pub struct ReplyResponse(pub Reply);

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self(reply)
    }
}

impl IntoResponse for ReplyResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Reply::Json(value) => Json(value).into_response(),
            Reply::Raw { content_type, body } => {
                // An unusable content type still gets its bytes through.
                let content_type = HeaderValue::from_str(&content_type).unwrap_or(
                    HeaderValue::from_static("application/octet-stream"),
                );
                (StatusCode::OK, [(CONTENT_TYPE, content_type)], body).into_response()
            }
        }
    }
}
