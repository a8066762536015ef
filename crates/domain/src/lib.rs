//! # wedge-domain
//!
//! Pure domain model for the wedge management REST API.
//!
//! ## Responsibilities
//! - Name the hardware **capabilities** the API exposes (FRU, BMC, server, …)
//! - Define **resource nodes**, the `Information` / `Actions` / `Resources`
//!   descriptors every endpoint answers with
//! - Define the **reply** payload handed back by capability providers
//! - Define the error taxonomy shared by every layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod capability;
pub mod error;
pub mod reply;
pub mod resource;
