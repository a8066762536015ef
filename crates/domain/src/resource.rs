//! Resource node: the `Information` / `Actions` / `Resources` descriptor
//! every endpoint of the API answers with.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Descriptor of an API endpoint: free-form information, the actions it
/// accepts and the names of its child resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceNode {
    pub information: Map<String, Value>,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

impl ResourceNode {
    /// Create a builder for constructing a [`ResourceNode`].
    #[must_use]
    pub fn builder() -> ResourceNodeBuilder {
        ResourceNodeBuilder::default()
    }

    /// Check descriptor invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when an action or child name is empty,
    /// contains a `/`, or appears twice.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        check_names("action", &self.actions)?;
        check_names("resource", &self.resources)
    }
}

fn check_names(kind: &'static str, names: &[String]) -> Result<(), DescriptorError> {
    for (idx, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(DescriptorError::EmptyName(kind));
        }
        if name.contains('/') {
            return Err(DescriptorError::InvalidName {
                kind,
                name: name.clone(),
            });
        }
        if names[..idx].contains(name) {
            return Err(DescriptorError::Duplicate {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// Invalid resource descriptor.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    #[error("{kind} name `{name}` must not contain '/'")]
    InvalidName { kind: &'static str, name: String },

    #[error("{kind} `{name}` listed twice")]
    Duplicate { kind: &'static str, name: String },

    /// A listed child does not resolve to a registered endpoint.
    #[error("`{parent}` lists unknown child `{child}`")]
    DanglingChild { parent: String, child: String },
}

/// Step-by-step builder for [`ResourceNode`].
#[derive(Debug, Default)]
pub struct ResourceNodeBuilder {
    information: Map<String, Value>,
    actions: Vec<String>,
    resources: Vec<String>,
}

impl ResourceNodeBuilder {
    /// Shorthand for the `Description` information field.
    #[must_use]
    pub fn description(self, description: impl Into<String>) -> Self {
        self.info("Description", description.into())
    }

    #[must_use]
    pub fn info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.information.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Consume the builder, validate, and return a [`ResourceNode`].
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] if any action or child name is invalid.
    pub fn build(self) -> Result<ResourceNode, DescriptorError> {
        let node = ResourceNode {
            information: self.information,
            actions: self.actions,
            resources: self.resources,
        };
        node.validate()?;
        Ok(node)
    }
}
