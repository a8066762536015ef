//! Platform: every capability port bundled behind one type parameter.

use super::control::{PsuUpdater, ServerControl, Usb2I2cReset};
use super::inventory::{
    BmcReader, FruReader, GpioReader, ModbusReader, PeerPresence, SensorReader, SlotIdReader,
};

/// A board that provides every capability the API exposes.
///
/// Implemented automatically for any type implementing all port traits, so
/// adapters only implement the individual ports.
pub trait Platform:
    FruReader
    + BmcReader
    + ServerControl
    + SensorReader
    + GpioReader
    + PeerPresence
    + ModbusReader
    + PsuUpdater
    + SlotIdReader
    + Usb2I2cReset
    + Send
    + Sync
    + 'static
{
}

impl<T> Platform for T where
    T: FruReader
        + BmcReader
        + ServerControl
        + SensorReader
        + GpioReader
        + PeerPresence
        + ModbusReader
        + PsuUpdater
        + SlotIdReader
        + Usb2I2cReset
        + Send
        + Sync
        + 'static
{
}
