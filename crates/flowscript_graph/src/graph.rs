// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::port::{PortDirection, PortId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// Connections between nodes
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and its connections
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.connections.retain(|_, c| !c.involves_node(node_id));
        self.nodes.swap_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a connection from an output port to an input port
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
    ) -> Result<ConnectionId, ConnectionError> {
        let source_node = self
            .nodes
            .get(&from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?;
        let target_node = self
            .nodes
            .get(&to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?;

        let source_port = source_node
            .port(from_port)
            .ok_or(ConnectionError::PortNotFound(from_port))?;
        let target_port = target_node
            .port(to_port)
            .ok_or(ConnectionError::PortNotFound(to_port))?;

        if source_port.direction != PortDirection::Output
            || target_port.direction != PortDirection::Input
        {
            return Err(ConnectionError::WrongDirection);
        }

        if !source_port.can_connect(target_port) {
            return Err(ConnectionError::IncompatiblePorts);
        }

        // Each input accepts at most one incoming connection
        if !target_port.multi_connect && self.connections.values().any(|c| c.to_port == to_port) {
            return Err(ConnectionError::PortAlreadyConnected(to_port));
        }

        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        let connection = Connection::new(from_node, from_port, to_node, to_port);
        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.swap_remove(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get connections involving a node
    pub fn connections_for_node(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(move |c| c.involves_node(node_id))
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Whether the `input_index`-th input port of a node has an incoming edge
    pub fn is_input_connected(&self, node_id: NodeId, input_index: usize) -> bool {
        let Some(port) = self.nodes.get(&node_id).and_then(|n| n.input(input_index)) else {
            return false;
        };
        self.connections.values().any(|c| c.to_port == port.id)
    }

    /// Connectivity of every input port of a node, in port-index order
    pub fn input_connectivity(&self, node_id: NodeId) -> Vec<bool> {
        let Some(node) = self.nodes.get(&node_id) else {
            return Vec::new();
        };
        node.inputs
            .iter()
            .map(|port| self.connections.values().any(|c| c.to_port == port.id))
            .collect()
    }

    /// Source of an input: the upstream node and its output-port index
    pub fn input_source(&self, node_id: NodeId, input_index: usize) -> Option<(NodeId, usize)> {
        let port = self.nodes.get(&node_id)?.input(input_index)?;
        let connection = self.connections.values().find(|c| c.to_port == port.id)?;
        let source = self.nodes.get(&connection.from_node)?;
        let output_index = source.output_index(connection.from_port)?;
        Some((connection.from_node, output_index))
    }

    /// Get nodes in topological order (for compilation)
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut visited = std::collections::HashSet::new();
        let mut temp_mark = std::collections::HashSet::new();
        let mut order = Vec::new();

        for node_id in self.nodes.keys() {
            if !visited.contains(node_id) {
                self.visit(*node_id, &mut visited, &mut temp_mark, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(
        &self,
        node_id: NodeId,
        visited: &mut std::collections::HashSet<NodeId>,
        temp_mark: &mut std::collections::HashSet<NodeId>,
        order: &mut Vec<NodeId>,
    ) -> Result<(), CycleError> {
        if temp_mark.contains(&node_id) {
            return Err(CycleError);
        }
        if visited.contains(&node_id) {
            return Ok(());
        }

        temp_mark.insert(node_id);

        // Visit all nodes that this node depends on
        for connection in self.connections_for_node(node_id) {
            if connection.to_node == node_id {
                self.visit(connection.from_node, visited, temp_mark, order)?;
            }
        }

        temp_mark.remove(&node_id);
        visited.insert(node_id);
        order.push(node_id);

        Ok(())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found
    #[error("Port not found: {0:?}")]
    PortNotFound(PortId),

    /// Connection must run from an output port to an input port
    #[error("Connection must run from an output to an input")]
    WrongDirection,

    /// Incompatible port types
    #[error("Incompatible port types")]
    IncompatiblePorts,

    /// Port is already connected
    #[error("Port already connected: {0:?}")]
    PortAlreadyConnected(PortId),

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

/// Error when graph contains a cycle
#[derive(Debug, thiserror::Error)]
#[error("Graph contains a cycle")]
pub struct CycleError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::standard_registry;

    fn wired_pair() -> (Graph, NodeId, NodeId) {
        let registry = standard_registry();
        let mut graph = Graph::new("test");
        let number = graph.add_node(registry.create_node("number").unwrap());
        let multiply = graph.add_node(registry.create_node("multiply").unwrap());
        let from = graph.node(number).unwrap().outputs[0].id;
        let to = graph.node(multiply).unwrap().inputs[0].id;
        graph.connect(number, from, multiply, to).unwrap();
        (graph, number, multiply)
    }

    #[test]
    fn test_connectivity_queries() {
        let (graph, number, multiply) = wired_pair();
        assert_eq!(graph.input_connectivity(multiply), vec![true, false]);
        assert!(graph.is_input_connected(multiply, 0));
        assert!(!graph.is_input_connected(multiply, 1));
        assert_eq!(graph.input_source(multiply, 0), Some((number, 0)));
        assert_eq!(graph.input_source(multiply, 1), None);
    }

    #[test]
    fn test_second_instance_of_same_type_is_unconnected() {
        let (mut graph, _, wired) = wired_pair();
        let registry = standard_registry();
        let fresh = graph.add_node(registry.create_node("multiply").unwrap());

        assert_eq!(graph.input_connectivity(wired), vec![true, false]);
        assert_eq!(graph.input_connectivity(fresh), vec![false, false]);
        assert!(!graph.is_input_connected(fresh, 0));
        assert_eq!(graph.input_source(fresh, 0), None);
    }

    #[test]
    fn test_same_type_instances_connect_independently() {
        let (mut graph, _, wired) = wired_pair();
        let registry = standard_registry();
        let fresh = graph.add_node(registry.create_node("multiply").unwrap());
        let source = graph.add_node(registry.create_node("number").unwrap());

        // the sibling's wiring must not block this instance's input
        let from = graph.node(source).unwrap().outputs[0].id;
        let to = graph.node(fresh).unwrap().inputs[0].id;
        graph.connect(source, from, fresh, to).unwrap();

        assert_eq!(graph.input_connectivity(fresh), vec![true, false]);
        assert_eq!(graph.input_source(fresh, 0), Some((source, 0)));
        assert_eq!(graph.input_connectivity(wired), vec![true, false]);
    }

    #[test]
    fn test_input_rejects_second_connection() {
        let (mut graph, _, multiply) = wired_pair();
        let registry = standard_registry();
        let other = graph.add_node(registry.create_node("number").unwrap());
        let from = graph.node(other).unwrap().outputs[0].id;
        let to = graph.node(multiply).unwrap().inputs[0].id;
        assert!(matches!(
            graph.connect(other, from, multiply, to),
            Err(ConnectionError::PortAlreadyConnected(_))
        ));
    }

    #[test]
    fn test_self_loop_rejected() {
        let registry = standard_registry();
        let mut graph = Graph::new("test");
        let inspect = graph.add_node(registry.create_node("inspect").unwrap());
        let from = graph.node(inspect).unwrap().outputs[0].id;
        let to = graph.node(inspect).unwrap().inputs[0].id;
        assert!(matches!(
            graph.connect(inspect, from, inspect, to),
            Err(ConnectionError::SelfLoop)
        ));
    }

    #[test]
    fn test_incompatible_types_rejected() {
        let registry = standard_registry();
        let mut graph = Graph::new("test");
        let number = graph.add_node(registry.create_node("number").unwrap());
        let inspect = graph.add_node(registry.create_node("inspect").unwrap());
        let from = graph.node(number).unwrap().outputs[0].id;
        let to = graph.node(inspect).unwrap().inputs[0].id;
        // double output into a string input
        assert!(matches!(
            graph.connect(number, from, inspect, to),
            Err(ConnectionError::IncompatiblePorts)
        ));
    }

    #[test]
    fn test_topological_order_puts_sources_first() {
        let (graph, number, multiply) = wired_pair();
        let order = graph.topological_order().unwrap();
        let pos = |id| order.iter().position(|n| *n == id).unwrap();
        assert!(pos(number) < pos(multiply));
    }

    #[test]
    fn test_remove_node_drops_its_connections() {
        let (mut graph, number, multiply) = wired_pair();
        assert_eq!(graph.connection_count(), 1);
        graph.remove_node(number);
        assert_eq!(graph.connection_count(), 0);
        assert_eq!(graph.input_connectivity(multiply), vec![false, false]);
    }

    #[test]
    fn test_node_ids_survive_serialization() {
        let (graph, number, multiply) = wired_pair();
        let ron_str = ron::ser::to_string(&graph).unwrap();
        let loaded: Graph = ron::from_str(&ron_str).unwrap();
        assert_eq!(
            loaded.node(number).unwrap().id.identifier_base(),
            graph.node(number).unwrap().id.identifier_base()
        );
        assert_eq!(loaded.input_source(multiply, 0), Some((number, 0)));
    }
}
