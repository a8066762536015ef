//! Control ports: hardware actions.
//!
//! Commands arrive as the JSON object the client posted and are handed to
//! the provider unmodified. Interpreting them is the provider's business.

use std::future::Future;

use serde_json::Value;
use wedge_domain::error::WedgeError;
use wedge_domain::reply::Reply;

/// Reports and changes the power state of the managed server.
pub trait ServerControl {
    /// Current power status.
    fn server_status(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;

    /// Run a power action such as `{"action": "power-reset"}`.
    fn server_action(
        &self,
        command: Value,
    ) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Manages PSU firmware update jobs.
pub trait PsuUpdater {
    /// Jobs submitted so far, with their progress.
    fn list_jobs(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;

    /// Submit a new update job described by `spec`; returns the job handle.
    fn begin_job(&self, spec: Value) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Resets the USB-to-I2C bridge.
pub trait Usb2I2cReset {
    fn reset_usb2i2c(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}
