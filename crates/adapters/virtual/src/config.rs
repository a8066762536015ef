//! Virtual platform configuration.

use serde::Deserialize;

/// Knobs of the simulated board.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Chassis slot reported by `/api/sys/slotid`.
    pub slot_id: u8,
    /// Whether the peer fabric card is reported as present.
    pub fc_present: bool,
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            slot_id: 1,
            fc_present: true,
        }
    }
}
