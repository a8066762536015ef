//! Simulated microserver power control.

use std::sync::Mutex;

use serde_json::Value;
use wedge_domain::error::RequestError;

/// Power actions accepted by the server endpoint.
pub const ACTIONS: [&str; 4] = ["power-on", "power-off", "power-reset", "graceful-shutdown"];

/// Power state of the simulated microserver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

/// Outcome of a power action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    AlreadyInState,
}

impl Outcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "success",
            Self::AlreadyInState => "already in requested state",
        }
    }
}

/// Power switch of the simulated microserver.
pub struct VirtualServer {
    state: Mutex<PowerState>,
    resets: Mutex<u32>,
}

impl Default for VirtualServer {
    fn default() -> Self {
        Self {
            state: Mutex::new(PowerState::On),
            resets: Mutex::new(0),
        }
    }
}

impl VirtualServer {
    #[must_use]
    pub fn status(&self) -> PowerState {
        *self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Number of power resets performed so far.
    #[must_use]
    pub fn resets(&self) -> u32 {
        *self.resets.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Apply the `action` field of `command`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingField`] when `action` is absent or not a
    /// string, and [`RequestError::UnsupportedAction`] for unknown actions.
    pub fn apply(&self, command: &Value) -> Result<(Outcome, PowerState), RequestError> {
        let action = command
            .get("action")
            .and_then(Value::as_str)
            .ok_or(RequestError::MissingField("action"))?;

        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let outcome = match (action, *state) {
            ("power-on", PowerState::On)
            | ("power-off" | "graceful-shutdown", PowerState::Off) => Outcome::AlreadyInState,
            ("power-on", PowerState::Off) => {
                *state = PowerState::On;
                Outcome::Done
            }
            ("power-off" | "graceful-shutdown", PowerState::On) => {
                *state = PowerState::Off;
                Outcome::Done
            }
            ("power-reset", _) => {
                *state = PowerState::On;
                *self
                    .resets
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
                Outcome::Done
            }
            (other, _) => return Err(RequestError::UnsupportedAction(other.to_string())),
        };
        Ok((outcome, *state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_start_powered_on() {
        assert_eq!(VirtualServer::default().status(), PowerState::On);
    }

    #[test]
    fn should_power_off_then_on() {
        let server = VirtualServer::default();
        let (outcome, state) = server.apply(&json!({"action": "power-off"})).unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert_eq!(state, PowerState::Off);

        let (_, state) = server.apply(&json!({"action": "power-on"})).unwrap();
        assert_eq!(state, PowerState::On);
    }

    #[test]
    fn should_report_already_on() {
        let server = VirtualServer::default();
        let (outcome, _) = server.apply(&json!({"action": "power-on"})).unwrap();
        assert_eq!(outcome, Outcome::AlreadyInState);
    }

    #[test]
    fn should_count_resets() {
        let server = VirtualServer::default();
        server.apply(&json!({"action": "power-off"})).unwrap();
        let (_, state) = server.apply(&json!({"action": "power-reset"})).unwrap();
        assert_eq!(state, PowerState::On);
        assert_eq!(server.resets(), 1);
    }

    #[test]
    fn should_reject_unknown_action() {
        let result = VirtualServer::default().apply(&json!({"action": "reboot"}));
        assert!(matches!(result, Err(RequestError::UnsupportedAction(a)) if a == "reboot"));
    }

    #[test]
    fn should_reject_missing_action() {
        let result = VirtualServer::default().apply(&json!({"command": "power-on"}));
        assert!(matches!(result, Err(RequestError::MissingField("action"))));
    }
}
