//! System service: use-cases behind every `/api` endpoint.

use serde_json::Value;
use wedge_domain::error::{RequestError, WedgeError};
use wedge_domain::reply::Reply;

use crate::catalog::{Catalog, Descriptor};
use crate::ports::Platform;

/// Application service answering every endpoint of the API.
///
/// Descriptor endpoints are served from the [`Catalog`]; everything else is
/// delegated to exactly one call on the [`Platform`].
pub struct SystemService<P> {
    catalog: Catalog,
    platform: P,
}

impl<P: Platform> SystemService<P> {
    /// Create a new service over `platform`.
    pub fn new(catalog: Catalog, platform: P) -> Self {
        Self { catalog, platform }
    }

    /// The underlying platform.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Static descriptor for one of the inner nodes.
    #[must_use]
    pub fn describe(&self, node: Descriptor) -> Reply {
        self.catalog.node(node).clone().into()
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn fruid(&self) -> Result<Reply, WedgeError> {
        self.platform.read_fruid().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn bmc(&self) -> Result<Reply, WedgeError> {
        self.platform.read_bmc().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn server_status(&self) -> Result<Reply, WedgeError> {
        self.platform.server_status().await
    }

    /// Run a server power action.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NotAnObject`] without calling the provider when
    /// `command` is not a JSON object, otherwise propagates the provider error.
    #[tracing::instrument(skip(self, command))]
    pub async fn server_action(&self, command: Value) -> Result<Reply, WedgeError> {
        ensure_object(&command)?;
        self.platform.server_action(command).await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn sensors(&self) -> Result<Reply, WedgeError> {
        self.platform.read_sensors().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn gpios(&self) -> Result<Reply, WedgeError> {
        self.platform.read_gpios().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn fc_present(&self) -> Result<Reply, WedgeError> {
        self.platform.read_fc_present().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn modbus_registers(&self) -> Result<Reply, WedgeError> {
        self.platform.read_modbus_registers().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn psu_jobs(&self) -> Result<Reply, WedgeError> {
        self.platform.list_jobs().await
    }

    /// Submit a PSU firmware update job.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NotAnObject`] without calling the provider when
    /// `spec` is not a JSON object, otherwise propagates the provider error.
    #[tracing::instrument(skip(self, spec))]
    pub async fn begin_psu_job(&self, spec: Value) -> Result<Reply, WedgeError> {
        ensure_object(&spec)?;
        self.platform.begin_job(spec).await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn slot_id(&self) -> Result<Reply, WedgeError> {
        self.platform.read_slot_id().await
    }

    /// # Errors
    ///
    /// Propagates the provider error.
    #[tracing::instrument(skip(self))]
    pub async fn usb2i2c_reset(&self) -> Result<Reply, WedgeError> {
        self.platform.reset_usb2i2c().await
    }
}

fn ensure_object(body: &Value) -> Result<(), RequestError> {
    if body.is_object() {
        Ok(())
    } else {
        Err(RequestError::NotAnObject)
    }
}
