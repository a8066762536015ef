//! Port definitions: traits that capability providers implement.
//!
//! Ports are the boundaries between the application core and the hardware.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod control;
pub mod inventory;
pub mod platform;

pub use control::{PsuUpdater, ServerControl, Usb2I2cReset};
pub use inventory::{
    BmcReader, FruReader, GpioReader, ModbusReader, PeerPresence, SensorReader, SlotIdReader,
};
pub use platform::Platform;
