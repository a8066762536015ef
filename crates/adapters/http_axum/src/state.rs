//! Shared application state for axum handlers.

use std::sync::Arc;

use wedge_app::ports::Platform;
use wedge_app::services::system_service::SystemService;

/// Application state shared across all axum handlers.
///
/// Generic over the platform to avoid dynamic dispatch. `Clone` is
/// implemented manually so the platform itself does not need to be `Clone`.
pub struct AppState<P> {
    /// Use-cases behind every endpoint.
    pub system: Arc<SystemService<P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            system: Arc::clone(&self.system),
        }
    }
}

impl<P: Platform> AppState<P> {
    /// Create a new application state from the system service.
    pub fn new(system: SystemService<P>) -> Self {
        Self {
            system: Arc::new(system),
        }
    }

    /// Create a new application state from a pre-wrapped service.
    ///
    /// Use this when the service is shared with something other than the
    /// router, such as a test inspecting the platform afterwards.
    pub fn from_arc(system: Arc<SystemService<P>>) -> Self {
        Self { system }
    }
}
