//! Static resource hierarchy.
//!
//! The three inner nodes of the API (`/api`, `/api/sys`, `/api/sys/mb`) are
//! hand-authored descriptors. Leaves are served by capability providers.

use wedge_domain::capability::Capability;
use wedge_domain::resource::{DescriptorError, ResourceNode};

/// Every path the API serves, inner nodes first.
pub const ENDPOINTS: [&str; 13] = [
    "/api",
    "/api/sys",
    "/api/sys/mb",
    "/api/sys/mb/fruid",
    "/api/sys/bmc",
    "/api/sys/server",
    "/api/sys/sensors",
    "/api/sys/gpios",
    "/api/sys/fc_present",
    "/api/sys/modbus_registers",
    "/api/sys/psu_update",
    "/api/sys/slotid",
    "/api/sys/usb2i2c_reset",
];

/// Hand-authored descriptor nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    Root,
    Sys,
    Mb,
}

impl Descriptor {
    /// URL path of the node.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/api",
            Self::Sys => "/api/sys",
            Self::Mb => "/api/sys/mb",
        }
    }
}

/// The immutable set of descriptor nodes, built once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: ResourceNode,
    sys: ResourceNode,
    mb: ResourceNode,
}

impl Catalog {
    /// Build the standard wedge hierarchy and check it has no dangling
    /// children.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] if a node is malformed or lists a child
    /// that is not in [`ENDPOINTS`].
    pub fn standard() -> Result<Self, DescriptorError> {
        let root = ResourceNode::builder()
            .description("Wedge RESTful API Entry")
            .resource("sys")
            .build()?;

        let sys = [
            "mb",
            Capability::Bmc.as_str(),
            Capability::Server.as_str(),
            Capability::Sensors.as_str(),
            Capability::Gpios.as_str(),
            Capability::ModbusRegisters.as_str(),
            Capability::SlotId.as_str(),
        ]
        .into_iter()
        .fold(
            ResourceNode::builder().description("Wedge System"),
            |builder, child| builder.resource(child),
        )
        .build()?;

        let mb = ResourceNode::builder()
            .description("System Motherboard")
            .resource(Capability::Fruid.as_str())
            .build()?;

        let catalog = Self { root, sys, mb };
        catalog.validate(&ENDPOINTS)?;
        Ok(catalog)
    }

    /// Descriptor for `node`.
    #[must_use]
    pub fn node(&self, node: Descriptor) -> &ResourceNode {
        match node {
            Descriptor::Root => &self.root,
            Descriptor::Sys => &self.sys,
            Descriptor::Mb => &self.mb,
        }
    }

    /// Check that every child of every node resolves to one of `endpoints`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::DanglingChild`] for the first child that
    /// does not resolve.
    pub fn validate(&self, endpoints: &[&str]) -> Result<(), DescriptorError> {
        for descriptor in [Descriptor::Root, Descriptor::Sys, Descriptor::Mb] {
            let parent = descriptor.path();
            for child in &self.node(descriptor).resources {
                let path = format!("{parent}/{child}");
                if !endpoints.contains(&path.as_str()) {
                    return Err(DescriptorError::DanglingChild {
                        parent: parent.to_string(),
                        child: child.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Full paths of every child listed by the descriptors.
    #[must_use]
    pub fn child_paths(&self) -> Vec<String> {
        [Descriptor::Root, Descriptor::Sys, Descriptor::Mb]
            .into_iter()
            .flat_map(|descriptor| {
                self.node(descriptor)
                    .resources
                    .iter()
                    .map(move |child| format!("{}/{child}", descriptor.path()))
            })
            .collect()
    }
}
