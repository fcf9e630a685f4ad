// SPDX-License-Identifier: MIT OR Apache-2.0
//! The per-node compilation contract and the graph compile driver.
//!
//! Compilation happens eagerly for the whole graph whenever topology changes,
//! including on half-wired graphs, so the contract has a hard invariant: it
//! never fails. A node that cannot produce a meaningful result assigns null
//! literals to its outputs instead.

use crate::graph::Graph;
use crate::node::{Node, NodeRegistry};
use flowscript_ir::{ident, Assignment, IrNode};

/// Everything one node observes during a compilation call
pub struct CompileContext<'a> {
    /// The node instance being compiled
    pub node: &'a Node,
    /// Per input port: whether an edge currently supplies a value
    pub connectivity: &'a [bool],
    /// IR fragment bound to each input, in port-index order.
    /// Unconnected slots hold a null placeholder that gated compilers never
    /// read.
    pub inputs: &'a [IrNode],
}

impl CompileContext<'_> {
    /// Whether the `index`-th input port is connected
    pub fn is_connected(&self, index: usize) -> bool {
        self.connectivity.get(index).copied().unwrap_or(false)
    }

    /// Whether every declared input port is connected
    pub fn all_inputs_connected(&self) -> bool {
        self.node.inputs.len() == self.connectivity.len()
            && self.connectivity.iter().all(|connected| *connected)
    }

    /// IR bound to the `index`-th input
    pub fn input(&self, index: usize) -> IrNode {
        self.inputs.get(index).cloned().unwrap_or(IrNode::Null)
    }

    /// IR bound to every input, in port-index order
    pub fn all_inputs(&self) -> Vec<IrNode> {
        (0..self.node.inputs.len()).map(|i| self.input(i)).collect()
    }

    /// Target identifier for the `index`-th output port
    pub fn output_target(&self, index: usize) -> String {
        ident::output_identifier(&self.node.id.identifier_base(), index)
    }

    /// Auxiliary target identifier not tied to a declared output port
    pub fn dummy_target(&self) -> String {
        ident::dummy_identifier(&self.node.id.identifier_base())
    }

    /// Assign a value to the `index`-th output port
    pub fn assign_output(&self, index: usize, value: IrNode) -> Assignment {
        Assignment::new(self.output_target(index), value)
    }

    /// Fallback compilation: every declared output assigned a null literal,
    /// in port-index order
    pub fn fallback_outputs(&self) -> Vec<Assignment> {
        (0..self.node.outputs.len())
            .map(|index| self.assign_output(index, IrNode::Null))
            .collect()
    }
}

/// The capability every concrete node type implements.
///
/// Contract:
/// - **Connectivity gate**: check every required input's connectivity before
///   touching its IR; if any is unconnected, return a fallback compilation
///   (null or a documented default literal per output).
/// - **Output arity**: return exactly one assignment per declared output port,
///   in port-index order, targeting [`CompileContext::output_target`].
/// - **Never fail**: no panics, no errors; inability to produce a result is
///   encoded as null-literal outputs.
///
/// A node needing a materialized value after execution additionally emits one
/// assignment of a [`crate::bridge::bridge_send_call`] into
/// [`CompileContext::dummy_target`]. The bridge fires only after the
/// interpreter evaluates the call's argument; no other ordering relative to
/// the output assignments may be assumed.
pub trait NodeCompiler: Send + Sync {
    /// Produce the ordered assignment list defining this node's outputs
    fn compile(&self, ctx: &CompileContext<'_>) -> Vec<Assignment>;
}

/// Compile one node against explicit connectivity and input IR.
///
/// A node type with no registered compiler compiles to the fallback, keeping
/// the program structurally complete.
pub fn compile_node(
    registry: &NodeRegistry,
    node: &Node,
    connectivity: &[bool],
    inputs: &[IrNode],
) -> Vec<Assignment> {
    let ctx = CompileContext {
        node,
        connectivity,
        inputs,
    };
    match registry.compiler(&node.node_type) {
        Some(compiler) => compiler.compile(&ctx),
        None => {
            tracing::warn!("no compiler registered for node type {}", node.node_type);
            ctx.fallback_outputs()
        }
    }
}

/// Compile the whole graph into one ordered statement list.
///
/// Nodes are visited in topological order; each connected input is bound to an
/// identifier reference to the upstream node's output target. On a cyclic
/// graph the driver warns and falls back to insertion order so compilation
/// still returns a structurally valid program.
pub fn compile_graph(graph: &Graph, registry: &NodeRegistry) -> Vec<Assignment> {
    let order = match graph.topological_order() {
        Ok(order) => order,
        Err(_) => {
            tracing::warn!("graph {} contains a cycle, compiling in insertion order", graph.name);
            graph.node_ids().collect()
        }
    };

    let mut program = Vec::new();
    for node_id in order {
        let Some(node) = graph.node(node_id) else {
            continue;
        };

        let connectivity = graph.input_connectivity(node_id);
        let inputs: Vec<IrNode> = (0..node.inputs.len())
            .map(|index| match graph.input_source(node_id, index) {
                Some((source, output_index)) => IrNode::identifier(ident::output_identifier(
                    &source.identifier_base(),
                    output_index,
                )),
                None => IrNode::Null,
            })
            .collect();

        let assignments = compile_node(registry, node, &connectivity, &inputs);
        tracing::debug!(
            "compiled node {} ({}) into {} statements",
            node.name,
            node_id,
            assignments.len()
        );
        program.extend(assignments);
    }
    program
}
