//! Fixed inventory readings of the simulated board.

use serde_json::{Value, json};

/// FRU EEPROM contents, as `weutil` would print them.
pub const FRUID: [(&str, &str); 12] = [
    ("Version", "1"),
    ("Product Name", "WEDGE"),
    ("Product Part Number", "20-001331"),
    ("System Assembly Part Number", "ASY-00235-01"),
    ("Product Version", "2"),
    ("Product Serial Number", "AB0000000001"),
    ("System Manufacturer", "VIRTUAL"),
    ("System Manufacturing Date", "01-01-2024"),
    ("PCB Manufacturer", "VIRTUAL"),
    ("Local MAC", "02:00:00:00:00:01"),
    ("Extended MAC Base", "02:00:00:00:00:02"),
    ("Location on Fabric", "LEFT"),
];

/// Sensor chips and their readings.
pub fn sensors() -> Value {
    json!({
        "tmp75-i2c-3-48": {
            "Adapter": "ast_i2c.3",
            "Outlet Middle Temp": "+27.5 C",
        },
        "tmp75-i2c-3-49": {
            "Adapter": "ast_i2c.3",
            "Inlet Middle Temp": "+23.0 C",
        },
        "fb_panther_plus-i2c-4-40": {
            "Adapter": "ast_i2c.4",
            "CPU Temp": "+41.0 C",
            "DIMM0 Temp": "+33.0 C",
        },
        "fancpld-i2c-8-33": {
            "Adapter": "ast_i2c.8",
            "Fan 1 front": "7500 RPM",
            "Fan 1 rear": "5100 RPM",
        },
    })
}

/// GPIO lines with direction and level.
pub fn gpios() -> Value {
    json!({
        "BMC_READY_N": { "direction": "out", "value": 0 },
        "PANTHER_I2C_ALERT_N": { "direction": "in", "value": 1 },
        "MSERV_POWERUP": { "direction": "out", "value": 1 },
        "USB_MUX_SEL": { "direction": "out", "value": 0 },
    })
}

/// Registers of the modbus-attached power supplies.
pub fn modbus_registers() -> Value {
    json!({
        "psu1": {
            "addr": "0xa4",
            "registers": { "0x00": "0x0001", "0x03": "0x2f10", "0x04": "0x0c80" },
        },
        "psu2": {
            "addr": "0xa5",
            "registers": { "0x00": "0x0001", "0x03": "0x2f08", "0x04": "0x0c7a" },
        },
    })
}
