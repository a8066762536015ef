//! Hardware capabilities exposed by the API.

use std::fmt;

/// One hardware-facing capability provider behind the API.
///
/// Used to attribute provider failures and tracing spans to the piece of
/// hardware that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Fruid,
    Bmc,
    Server,
    Sensors,
    Gpios,
    FcPresent,
    ModbusRegisters,
    PsuUpdate,
    SlotId,
    Usb2I2cReset,
}

impl Capability {
    /// The resource name used in URLs (`/api/sys/<name>`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fruid => "fruid",
            Self::Bmc => "bmc",
            Self::Server => "server",
            Self::Sensors => "sensors",
            Self::Gpios => "gpios",
            Self::FcPresent => "fc_present",
            Self::ModbusRegisters => "modbus_registers",
            Self::PsuUpdate => "psu_update",
            Self::SlotId => "slotid",
            Self::Usb2I2cReset => "usb2i2c_reset",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
