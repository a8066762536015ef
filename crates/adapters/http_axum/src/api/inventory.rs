//! JSON REST handlers for read-only hardware inventory.

use axum::extract::State;

use wedge_app::ports::Platform;

use crate::error::ApiError;
use crate::reply::ReplyResponse;
use crate::state::AppState;

/// `GET /api/sys/mb/fruid`
pub async fn fruid<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.fruid().await?.into())
}

/// `GET /api/sys/bmc`
pub async fn bmc<P: Platform>(State(state): State<AppState<P>>) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.bmc().await?.into())
}

/// `GET /api/sys/sensors`
pub async fn sensors<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.sensors().await?.into())
}

/// `GET /api/sys/gpios`
pub async fn gpios<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.gpios().await?.into())
}

/// `GET /api/sys/fc_present`
pub async fn fc_present<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.fc_present().await?.into())
}

/// `GET /api/sys/modbus_registers`
pub async fn modbus_registers<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.modbus_registers().await?.into())
}

/// `GET /api/sys/slotid`
pub async fn slot_id<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.slot_id().await?.into())
}
