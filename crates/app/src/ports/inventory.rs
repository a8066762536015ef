//! Inventory ports: read-only hardware queries.
//!
//! Every reader returns a [`Reply`] the router serializes without looking
//! inside. Implementations may block on bus or BMC latency; bounding that
//! latency is their job, not the caller's.

use std::future::Future;

use wedge_domain::error::WedgeError;
use wedge_domain::reply::Reply;

/// Reads the board FRU (field-replaceable unit) identification data.
pub trait FruReader {
    fn read_fruid(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Reads BMC information (uptime, versions, resources).
pub trait BmcReader {
    fn read_bmc(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Reads every sensor the platform exposes.
pub trait SensorReader {
    fn read_sensors(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Reads the state of the platform GPIOs.
pub trait GpioReader {
    fn read_gpios(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Reads the registers of modbus-attached devices (PSUs, fans).
pub trait ModbusReader {
    fn read_modbus_registers(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Reads the chassis slot this board is plugged into.
pub trait SlotIdReader {
    fn read_slot_id(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}

/// Reports whether the peer fabric card is present.
pub trait PeerPresence {
    fn read_fc_present(&self) -> impl Future<Output = Result<Reply, WedgeError>> + Send;
}
