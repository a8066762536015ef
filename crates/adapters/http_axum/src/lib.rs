//! # wedge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Route the fixed `/api` hierarchy, one capability call per
//!   (method, path) pair
//! - Parse POST bodies as JSON commands, whatever their `Content-Type`
//! - Serialize [`Reply`](wedge_domain::reply::Reply) values as JSON, passing
//!   raw payloads through untouched
//! - Map [`WedgeError`](wedge_domain::error::WedgeError) onto status codes;
//!   every response body is JSON, errors and panics included
//! - Emit one access-log line per completed request
//!
//! ## Dependency rule
//! Depends on `wedge-app` (for port traits and services) and `wedge-domain`
//! (for replies and errors). Never leaks axum types into the domain.

pub mod access_log;
pub mod api;
pub mod body;
pub mod error;
pub mod reply;
pub mod router;
pub mod state;
