// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions for node inputs/outputs.

use flowscript_ir::TypeTag;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// A port on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Port name
    pub name: String,
    /// Port direction
    pub direction: PortDirection,
    /// Declared type tag
    pub type_tag: TypeTag,
    /// Description shown by host tooling
    pub description: String,
    /// Whether multiple connections are allowed.
    /// Inputs accept at most one incoming connection; outputs fan out freely.
    pub multi_connect: bool,
}

impl Port {
    /// Create a new input port
    pub fn input(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Input,
            type_tag,
            description: String::new(),
            multi_connect: false,
        }
    }

    /// Create a new output port
    pub fn output(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            id: PortId::new(),
            name: name.into(),
            direction: PortDirection::Output,
            type_tag,
            description: String::new(),
            multi_connect: true,
        }
    }

    /// Copy of this port declaration under a fresh identity.
    ///
    /// Connections match ports by id, so each node instance must carry its
    /// own port ids rather than share the ones on the type declaration.
    pub fn instantiate(&self) -> Self {
        Self {
            id: PortId::new(),
            ..self.clone()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check if a connection from this port to another port is valid
    pub fn can_connect(&self, other: &Port) -> bool {
        if self.direction == other.direction {
            return false;
        }

        match self.direction {
            PortDirection::Output => self.type_tag.can_flow_into(&other.type_tag),
            PortDirection::Input => other.type_tag.can_flow_into(&self.type_tag),
        }
    }
}
