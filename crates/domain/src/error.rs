//! Common error types used across the workspace.
//!
//! Each failure class has its own typed error and converts into
//! [`WedgeError`] via `#[from]`. The HTTP adapter maps the variants onto
//! status codes; no other layer knows about HTTP.

use crate::capability::Capability;

/// Top-level error returned by services and capability providers.
#[derive(Debug, thiserror::Error)]
pub enum WedgeError {
    /// The client sent something the provider cannot act on.
    #[error("invalid request")]
    Request(#[from] RequestError),

    /// The hardware behind a capability is not fitted.
    #[error("hardware not present")]
    NotPresent(#[from] NotPresentError),

    /// The hardware call itself failed.
    #[error("hardware access failed")]
    Hardware(#[from] HardwareError),
}

/// Problems with a request body or the command it carries.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The body could not be parsed as JSON.
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// The body parsed, but is not a JSON object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// A required field is absent or has the wrong type.
    #[error("missing or invalid field `{0}`")]
    MissingField(&'static str),

    /// The command names an action the provider does not support.
    #[error("unsupported action `{0}`")]
    UnsupportedAction(String),
}

/// Raised when a provider reports that its hardware is absent.
#[derive(Debug, thiserror::Error)]
#[error("{capability} hardware not present")]
pub struct NotPresentError {
    pub capability: Capability,
}

/// A failed hardware call, with the provider-supplied detail.
#[derive(Debug, thiserror::Error)]
#[error("{capability}: {detail}")]
pub struct HardwareError {
    pub capability: Capability,
    pub detail: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HardwareError {
    /// A failure described only by a message.
    pub fn new(capability: Capability, detail: impl Into<String>) -> Self {
        Self {
            capability,
            detail: detail.into(),
            source: None,
        }
    }

    /// A failure caused by an underlying error (I/O, bus, subprocess).
    pub fn with_source(
        capability: Capability,
        detail: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            capability,
            detail: detail.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_request_error() {
        let err: WedgeError = RequestError::NotAnObject.into();
        assert!(matches!(err, WedgeError::Request(RequestError::NotAnObject)));
    }

    #[test]
    fn should_display_hardware_detail() {
        let err = HardwareError::new(Capability::Sensors, "i2c bus 3 timed out");
        assert_eq!(err.to_string(), "sensors: i2c bus 3 timed out");
    }

    #[test]
    fn should_keep_hardware_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such device");
        let err = HardwareError::with_source(Capability::Gpios, "cannot read gpio", io);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn should_display_not_present() {
        let err = NotPresentError {
            capability: Capability::FcPresent,
        };
        assert_eq!(err.to_string(), "fc_present hardware not present");
    }

    #[test]
    fn should_display_unsupported_action() {
        let err = RequestError::UnsupportedAction("reboot".to_string());
        assert_eq!(err.to_string(), "unsupported action `reboot`");
    }
}
