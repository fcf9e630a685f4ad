// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions and the node-type registry.

use crate::compile::NodeCompiler;
use crate::port::{Port, PortId};
use flowscript_ir::IrNode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a node instance.
///
/// Assigned at creation and immutable for the instance's lifetime. Serialized
/// with the graph, so an instance keeps its identifier (and therefore its
/// allocated IR identifiers) across a save/reload cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Base string for IR identifiers allocated to this instance
    pub fn identifier_base(&self) -> String {
        format!("var_{}", self.0.simple())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Node type definition: the declarative port metadata of one node kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeType {
    /// Unique type identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Declared input ports
    pub inputs: Vec<Port>,
    /// Declared output ports
    pub outputs: Vec<Port>,
}

/// A node instance in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Node type ID
    pub node_type: String,
    /// Display name (can be customized)
    pub name: String,
    /// Input ports, in declaration order
    pub inputs: Vec<Port>,
    /// Output ports, in declaration order
    pub outputs: Vec<Port>,
    /// Literal payload for constant-style node types
    pub literal: Option<IrNode>,
}

impl Node {
    /// Create a new node instance from a type definition.
    ///
    /// Ports are instantiated under fresh ids so instances of the same type
    /// never alias each other's connections. Deserialized instances keep
    /// their persisted port ids instead of passing through here.
    pub fn new(node_type: &NodeType) -> Self {
        Self {
            id: NodeId::new(),
            node_type: node_type.id.clone(),
            name: node_type.name.clone(),
            inputs: node_type.inputs.iter().map(Port::instantiate).collect(),
            outputs: node_type.outputs.iter().map(Port::instantiate).collect(),
            literal: None,
        }
    }

    /// Set the literal payload
    pub fn with_literal(mut self, literal: IrNode) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Get an input port by index
    pub fn input(&self, index: usize) -> Option<&Port> {
        self.inputs.get(index)
    }

    /// Get an output port by index
    pub fn output(&self, index: usize) -> Option<&Port> {
        self.outputs.get(index)
    }

    /// Index of an input port within this node
    pub fn input_index(&self, port_id: PortId) -> Option<usize> {
        self.inputs.iter().position(|p| p.id == port_id)
    }

    /// Index of an output port within this node
    pub fn output_index(&self, port_id: PortId) -> Option<usize> {
        self.outputs.iter().position(|p| p.id == port_id)
    }

    /// Get a port by ID
    pub fn port(&self, port_id: PortId) -> Option<&Port> {
        self.inputs
            .iter()
            .find(|p| p.id == port_id)
            .or_else(|| self.outputs.iter().find(|p| p.id == port_id))
    }
}

/// Registry of available node types and their compilers
#[derive(Default)]
pub struct NodeRegistry {
    /// Registered node types by ID
    types: indexmap::IndexMap<String, NodeType>,
    /// Compiler implementation per type ID
    compilers: indexmap::IndexMap<String, Arc<dyn NodeCompiler>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type together with its compiler
    pub fn register(&mut self, node_type: NodeType, compiler: Arc<dyn NodeCompiler>) {
        self.compilers.insert(node_type.id.clone(), compiler);
        self.types.insert(node_type.id.clone(), node_type);
    }

    /// Get a node type by ID
    pub fn get(&self, id: &str) -> Option<&NodeType> {
        self.types.get(id)
    }

    /// Get the compiler for a type ID
    pub fn compiler(&self, id: &str) -> Option<&Arc<dyn NodeCompiler>> {
        self.compilers.get(id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// Create a node instance from a type ID
    pub fn create_node(&self, type_id: &str) -> Option<Node> {
        self.get(type_id).map(Node::new)
    }
}
