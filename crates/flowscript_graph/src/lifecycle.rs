// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node lifecycle management.
//!
//! Ties a node instance's bridge registration to its lifetime: the callback is
//! installed once the instance is fully built and removed no later than its
//! destruction, so no dispatch can land in a destroyed instance.

use crate::bridge::{RuntimeValue, ValueBridge};
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use std::sync::Arc;

/// Binds node construction and disposal to the value bridge
pub struct LifecycleManager {
    bridge: Arc<ValueBridge>,
}

impl LifecycleManager {
    /// Create a manager for a bridge owned by the host session
    pub fn new(bridge: Arc<ValueBridge>) -> Self {
        Self { bridge }
    }

    /// The bridge this manager registers into
    pub fn bridge(&self) -> &Arc<ValueBridge> {
        &self.bridge
    }

    /// Register a built node's value callback under its instance id.
    ///
    /// Call only after the instance is fully constructed: compilation may hand
    /// a bridge-send to the interpreter at any point afterwards.
    pub fn node_built(
        &self,
        node: &Node,
        callback: impl Fn(RuntimeValue) + Send + Sync + 'static,
    ) {
        self.bridge.register(node.id.to_string(), callback);
    }

    /// Release a node's bridge registration. Idempotent.
    pub fn node_disposed(&self, node_id: NodeId) {
        self.bridge.unregister(&node_id.to_string());
    }

    /// Remove a node from the graph and release its bridge registration
    pub fn dispose_node(&self, graph: &mut Graph, node_id: NodeId) -> Option<Node> {
        let node = graph.remove_node(node_id);
        self.node_disposed(node_id);
        node
    }

    /// Whether an edge currently supplies a value to the given input port
    pub fn is_connected(&self, graph: &Graph, node_id: NodeId, input_index: usize) -> bool {
        graph.is_input_connected(node_id, input_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::standard_registry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_built_then_disposed() {
        let bridge = Arc::new(ValueBridge::new());
        let lifecycle = LifecycleManager::new(Arc::clone(&bridge));
        let registry = standard_registry();
        let node = registry.create_node("inspect").unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let hits2 = Arc::clone(&hits);
        lifecycle.node_built(&node, move |_| {
            hits2.fetch_add(1, Ordering::SeqCst);
        });

        bridge.dispatch(&node.id.to_string(), RuntimeValue::Null);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        lifecycle.node_disposed(node.id);
        lifecycle.node_disposed(node.id); // double disposal tolerated
        bridge.dispatch(&node.id.to_string(), RuntimeValue::Null);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.dropped_dispatches(), 1);
    }

    #[test]
    fn test_dispose_node_removes_graph_node_and_registration() {
        let bridge = Arc::new(ValueBridge::new());
        let lifecycle = LifecycleManager::new(Arc::clone(&bridge));
        let registry = standard_registry();

        let mut graph = Graph::new("test");
        let node = registry.create_node("inspect").unwrap();
        let node_id = node.id;
        lifecycle.node_built(&node, |_| {});
        graph.add_node(node);

        assert_eq!(bridge.len(), 1);
        let removed = lifecycle.dispose_node(&mut graph, node_id);
        assert!(removed.is_some());
        assert!(bridge.is_empty());
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_is_connected_passthrough() {
        let bridge = Arc::new(ValueBridge::new());
        let lifecycle = LifecycleManager::new(bridge);
        let registry = standard_registry();

        let mut graph = Graph::new("test");
        let number = graph.add_node(registry.create_node("number").unwrap());
        let multiply = graph.add_node(registry.create_node("multiply").unwrap());
        let from = graph.node(number).unwrap().outputs[0].id;
        let to = graph.node(multiply).unwrap().inputs[0].id;
        graph.connect(number, from, multiply, to).unwrap();

        assert!(lifecycle.is_connected(&graph, multiply, 0));
        assert!(!lifecycle.is_connected(&graph, multiply, 1));
    }
}
