//! Reply: what a capability provider hands back to the router.

use serde_json::Value;

use crate::resource::ResourceNode;

/// Result of a capability call.
///
/// Structured results are serialized as JSON by the HTTP layer and never
/// inspected. `Raw` carries an already-encoded payload that is passed
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Raw {
        content_type: String,
        body: Vec<u8>,
    },
}

impl Reply {
    /// A ready-made payload with its own content type.
    pub fn raw(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::Raw {
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// The structured value, if this is a JSON reply.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw { .. } => None,
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<ResourceNode> for Reply {
    fn from(node: ResourceNode) -> Self {
        // A node only holds strings and JSON values, so this cannot fail.
        Self::Json(serde_json::to_value(node).unwrap_or(Value::Null))
    }
}
