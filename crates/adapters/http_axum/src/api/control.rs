//! JSON REST handlers for hardware actions.

use axum::extract::State;

use wedge_app::ports::Platform;

use crate::body::JsonBody;
use crate::error::ApiError;
use crate::reply::ReplyResponse;
use crate::state::AppState;

/// `GET /api/sys/server`
pub async fn server_status<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.server_status().await?.into())
}

/// `POST /api/sys/server`
pub async fn server_action<P: Platform>(
    State(state): State<AppState<P>>,
    JsonBody(command): JsonBody,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.server_action(command).await?.into())
}

/// `GET /api/sys/psu_update`
pub async fn psu_jobs<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.psu_jobs().await?.into())
}

/// `POST /api/sys/psu_update`
pub async fn begin_psu_job<P: Platform>(
    State(state): State<AppState<P>>,
    JsonBody(spec): JsonBody,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.begin_psu_job(spec).await?.into())
}

/// `GET /api/sys/usb2i2c_reset`
pub async fn usb2i2c_reset<P: Platform>(
    State(state): State<AppState<P>>,
) -> Result<ReplyResponse, ApiError> {
    Ok(state.system.usb2i2c_reset().await?.into())
}
