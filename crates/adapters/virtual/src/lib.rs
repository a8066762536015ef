//! # wedge-adapter-virtual
//!
//! Virtual/demo platform that simulates a wedge board for testing and
//! demonstration purposes.
//!
//! ## Provided capabilities
//!
//! | Endpoint | Behaviour |
//! |----------|-----------|
//! | `mb/fruid` | Fixed FRU fields |
//! | `bmc` | Uptime since construction, fixed version strings |
//! | `server` | Power state, responds to `power-on` / `power-off` / `power-reset` / `graceful-shutdown` |
//! | `sensors`, `gpios`, `modbus_registers` | Fixed readings |
//! | `fc_present`, `slotid` | Taken from [`VirtualConfig`] |
//! | `psu_update` | In-memory job table |
//! | `usb2i2c_reset` | Counts resets |
//!
//! Every read answers in the same `Information` / `Actions` / `Resources`
//! shape as the static descriptors.
//!
//! ## Dependency rule
//!
//! Depends on `wedge-app` (port traits) and `wedge-domain` only.

mod config;
mod inventory;
mod power;
mod psu;

pub use config::VirtualConfig;
pub use power::PowerState;

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use serde_json::{Value, json};
use wedge_app::ports::{
    BmcReader, FruReader, GpioReader, ModbusReader, PeerPresence, PsuUpdater, SensorReader,
    ServerControl, SlotIdReader, Usb2I2cReset,
};
use wedge_domain::capability::Capability;
use wedge_domain::error::{HardwareError, WedgeError};
use wedge_domain::reply::Reply;
use wedge_domain::resource::{ResourceNode, ResourceNodeBuilder};

use power::VirtualServer;
use psu::PsuJobs;

/// Simulated wedge board implementing every capability port.
pub struct VirtualPlatform {
    config: VirtualConfig,
    booted_at: Instant,
    server: VirtualServer,
    psu_jobs: PsuJobs,
    usb2i2c_resets: AtomicU32,
}

impl Default for VirtualPlatform {
    fn default() -> Self {
        Self::new(VirtualConfig::default())
    }
}

impl VirtualPlatform {
    #[must_use]
    pub fn new(config: VirtualConfig) -> Self {
        Self {
            config,
            booted_at: Instant::now(),
            server: VirtualServer::default(),
            psu_jobs: PsuJobs::default(),
            usb2i2c_resets: AtomicU32::new(0),
        }
    }

    /// Current power state of the simulated server.
    #[must_use]
    pub fn power_state(&self) -> PowerState {
        self.server.status()
    }

    /// Number of server power resets performed.
    #[must_use]
    pub fn power_resets(&self) -> u32 {
        self.server.resets()
    }

    /// Number of USB-to-I2C resets performed.
    #[must_use]
    pub fn usb2i2c_resets(&self) -> u32 {
        self.usb2i2c_resets.load(Ordering::Relaxed)
    }
}

fn finish(capability: Capability, builder: ResourceNodeBuilder) -> Result<Reply, WedgeError> {
    builder
        .build()
        .map(Reply::from)
        .map_err(|err| HardwareError::with_source(capability, "invalid descriptor", err).into())
}

fn info_map(capability: Capability, value: Value) -> Result<Reply, WedgeError> {
    let Value::Object(information) = value else {
        return Err(HardwareError::new(capability, "reading is not an object").into());
    };
    Ok(ResourceNode {
        information,
        actions: Vec::new(),
        resources: Vec::new(),
    }
    .into())
}

impl FruReader for VirtualPlatform {
    async fn read_fruid(&self) -> Result<Reply, WedgeError> {
        let builder = inventory::FRUID
            .iter()
            .fold(ResourceNode::builder(), |builder, (key, value)| {
                builder.info(*key, *value)
            });
        finish(Capability::Fruid, builder)
    }
}

impl BmcReader for VirtualPlatform {
    async fn read_bmc(&self) -> Result<Reply, WedgeError> {
        let uptime = self.booted_at.elapsed().as_secs();
        let builder = ResourceNode::builder()
            .description("Wedge BMC")
            .info("Uptime", format_uptime(uptime))
            .info("Uptime Seconds", uptime)
            .info("OpenBMC Version", "wedge-v0.1-virtual")
            .info("Kernel Version", "Linux 4.1.51 armv5tejl")
            .info("Memory Usage", "61.2 MB / 243.6 MB");
        finish(Capability::Bmc, builder)
    }
}

fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    format!("{days} day(s) {hours:02}:{minutes:02}")
}

impl ServerControl for VirtualPlatform {
    async fn server_status(&self) -> Result<Reply, WedgeError> {
        let builder = power::ACTIONS.iter().fold(
            ResourceNode::builder().info("status", self.server.status().as_str()),
            |builder, action| builder.action(*action),
        );
        finish(Capability::Server, builder)
    }

    async fn server_action(&self, command: Value) -> Result<Reply, WedgeError> {
        let (outcome, state) = self.server.apply(&command)?;
        tracing::info!(
            command = %command,
            outcome = outcome.as_str(),
            state = state.as_str(),
            resets = self.server.resets(),
            "virtual server power action"
        );
        Ok(json!({ "result": outcome.as_str(), "status": state.as_str() }).into())
    }
}

impl SensorReader for VirtualPlatform {
    async fn read_sensors(&self) -> Result<Reply, WedgeError> {
        info_map(Capability::Sensors, inventory::sensors())
    }
}

impl GpioReader for VirtualPlatform {
    async fn read_gpios(&self) -> Result<Reply, WedgeError> {
        info_map(Capability::Gpios, inventory::gpios())
    }
}

impl PeerPresence for VirtualPlatform {
    async fn read_fc_present(&self) -> Result<Reply, WedgeError> {
        let builder = ResourceNode::builder()
            .description("Peer fabric card presence")
            .info("fc_present", self.config.fc_present);
        finish(Capability::FcPresent, builder)
    }
}

impl ModbusReader for VirtualPlatform {
    async fn read_modbus_registers(&self) -> Result<Reply, WedgeError> {
        info_map(Capability::ModbusRegisters, inventory::modbus_registers())
    }
}

impl PsuUpdater for VirtualPlatform {
    async fn list_jobs(&self) -> Result<Reply, WedgeError> {
        let jobs = serde_json::to_value(self.psu_jobs.list()).map_err(|err| {
            HardwareError::with_source(Capability::PsuUpdate, "cannot encode job list", err)
        })?;
        finish(
            Capability::PsuUpdate,
            ResourceNode::builder().info("jobs", jobs),
        )
    }

    async fn begin_job(&self, spec: Value) -> Result<Reply, WedgeError> {
        let job = self.psu_jobs.submit(spec)?;
        tracing::info!(job_id = %job.job_id, file = %job.file, "virtual PSU update queued");
        Ok(json!({ "job_id": job.job_id, "status": job.status }).into())
    }
}

impl SlotIdReader for VirtualPlatform {
    async fn read_slot_id(&self) -> Result<Reply, WedgeError> {
        finish(
            Capability::SlotId,
            ResourceNode::builder().info("slotid", self.config.slot_id),
        )
    }
}

impl Usb2I2cReset for VirtualPlatform {
    async fn reset_usb2i2c(&self) -> Result<Reply, WedgeError> {
        let count = self.usb2i2c_resets.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(count, "virtual USB-to-I2C bridge reset");
        Ok(json!({ "result": "success" }).into())
    }
}
