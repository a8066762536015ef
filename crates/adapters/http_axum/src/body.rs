//! JSON command extractor.
//!
//! Clients of the management API do not reliably send
//! `Content-Type: application/json`, so the body is parsed as JSON whatever
//! its declared type. axum's own `Json` extractor would refuse it.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use wedge_domain::error::{RequestError, WedgeError};

use crate::error::ApiError;

/// A request body parsed as a generic JSON value.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(ApiError::Unreadable)?;
        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|err| WedgeError::from(RequestError::MalformedJson(err)).into())
    }
}
