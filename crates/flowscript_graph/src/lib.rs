// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph for flowscript.
//!
//! This crate provides the graph side of the compilation pipeline:
//! - Typed input/output ports and validated connections
//! - The per-node compilation contract ([`NodeCompiler`]) turning connectivity
//!   and bound input IR into assignment statements
//! - The value bridge ([`ValueBridge`]) handing materialized runtime values
//!   back to node instances after the host interpreter has executed their IR
//! - Node lifecycle management tying bridge registration to instance lifetime
//!
//! ## Architecture
//!
//! A [`Graph`] holds [`Node`] instances and connections between their ports.
//! Each node type registers a [`NodeCompiler`] in the [`NodeRegistry`];
//! [`compile::compile_graph`] walks the graph and asks every node to emit the
//! assignments defining its output identifiers. The aggregated statement list
//! goes to a host interpreter, which is an external collaborator: it executes
//! the IR and, for any bridge-send call, dispatches the materialized value
//! through the [`ValueBridge`].

pub mod bridge;
pub mod compile;
pub mod connection;
pub mod functions;
pub mod graph;
pub mod lifecycle;
pub mod node;
pub mod nodes;
pub mod port;

pub use bridge::{bridge_send_call, RuntimeValue, ValueBridge, BRIDGE_SEND_FUNCTION};
pub use compile::{compile_graph, compile_node, CompileContext, NodeCompiler};
pub use connection::{Connection, ConnectionId};
pub use graph::Graph;
pub use lifecycle::LifecycleManager;
pub use node::{Node, NodeId, NodeRegistry, NodeType};
pub use port::{Port, PortDirection, PortId};
