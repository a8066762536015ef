//! JSON REST API handler modules.
//!
//! | Path | GET | POST |
//! |------|-----|------|
//! | `/api`, `/api/sys`, `/api/sys/mb` | static descriptor | - |
//! | `/api/sys/mb/fruid`, `bmc`, `sensors`, `gpios`, `fc_present`, `modbus_registers`, `slotid` | provider read | - |
//! | `/api/sys/server` | power status | power action |
//! | `/api/sys/psu_update` | job list | submit job |
//! | `/api/sys/usb2i2c_reset` | reset the bridge | - |

#[allow(clippy::missing_errors_doc)]
pub mod control;
pub mod descriptors;
#[allow(clippy::missing_errors_doc)]
pub mod inventory;

use axum::Router;
use axum::routing::get;

use wedge_app::ports::Platform;

use crate::state::AppState;

/// Build the `/api` routes.
///
/// Paths are registered in full rather than nested so that `/api` itself
/// is an exact match.
pub fn routes<P: Platform>() -> Router<AppState<P>> {
    Router::new()
        // Descriptors
        .route("/api", get(descriptors::root::<P>))
        .route("/api/sys", get(descriptors::sys::<P>))
        .route("/api/sys/mb", get(descriptors::mb::<P>))
        // Inventory
        .route("/api/sys/mb/fruid", get(inventory::fruid::<P>))
        .route("/api/sys/bmc", get(inventory::bmc::<P>))
        .route("/api/sys/sensors", get(inventory::sensors::<P>))
        .route("/api/sys/gpios", get(inventory::gpios::<P>))
        .route("/api/sys/fc_present", get(inventory::fc_present::<P>))
        .route(
            "/api/sys/modbus_registers",
            get(inventory::modbus_registers::<P>),
        )
        .route("/api/sys/slotid", get(inventory::slot_id::<P>))
        // Controls
        .route(
            "/api/sys/server",
            get(control::server_status::<P>).post(control::server_action::<P>),
        )
        .route(
            "/api/sys/psu_update",
            get(control::psu_jobs::<P>).post(control::begin_psu_job::<P>),
        )
        .route("/api/sys/usb2i2c_reset", get(control::usb2i2c_reset::<P>))
}
