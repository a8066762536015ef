//! Application services: one use-case per API endpoint.

pub mod system_service;
