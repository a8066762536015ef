//! # wedge-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **capability-provider ports** hardware adapters implement:
//!   - inventory readers: FRU, BMC, sensors, GPIOs, modbus registers,
//!     slot id, peer fabric-card presence
//!   - controls: server power, PSU firmware update jobs, USB-to-I2C reset
//! - Bundle them into a single [`ports::Platform`] so drivers stay generic
//!   over one type parameter
//! - Hold the static resource hierarchy ([`catalog::Catalog`])
//! - Expose one use-case per endpoint through [`services::system_service::SystemService`]
//!
//! ## Dependency rule
//! Depends on `wedge-domain` only. Never imports adapter crates.

pub mod catalog;
pub mod ports;
pub mod services;
