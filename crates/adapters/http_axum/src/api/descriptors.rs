//! Handlers for the static descriptor nodes.

use axum::extract::State;

use wedge_app::catalog::Descriptor;
use wedge_app::ports::Platform;

use crate::reply::ReplyResponse;
use crate::state::AppState;

/// `GET /api`
pub async fn root<P: Platform>(State(state): State<AppState<P>>) -> ReplyResponse {
    state.system.describe(Descriptor::Root).into()
}

/// `GET /api/sys`
pub async fn sys<P: Platform>(State(state): State<AppState<P>>) -> ReplyResponse {
    state.system.describe(Descriptor::Sys).into()
}

/// `GET /api/sys/mb`
pub async fn mb<P: Platform>(State(state): State<AppState<P>>) -> ReplyResponse {
    state.system.describe(Descriptor::Mb).into()
}
