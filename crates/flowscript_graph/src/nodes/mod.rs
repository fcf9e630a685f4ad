// SPDX-License-Identifier: MIT OR Apache-2.0
//! The standard node library.
//!
//! Each node type pairs declarative port metadata ([`NodeType`]) with a
//! [`NodeCompiler`] implementation. [`standard_registry`] assembles the whole
//! set; hosts can register further types on top.

mod constant;
mod inspect;
mod math;

pub use constant::Constant;
pub use inspect::Inspect;
pub use math::{MultiOperation, Multiply};

use crate::node::{NodeRegistry, NodeType};
use crate::port::Port;
use flowscript_ir::TypeTag;
use std::sync::Arc;

/// Create the registry of standard node types
pub fn standard_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();

    registry.register(
        NodeType {
            id: "number".to_string(),
            name: "Number".to_string(),
            description: "Constant number value".to_string(),
            inputs: vec![],
            outputs: vec![Port::output("Value", TypeTag::Double)],
        },
        Arc::new(Constant),
    );

    registry.register(
        NodeType {
            id: "string".to_string(),
            name: "String".to_string(),
            description: "Constant string value".to_string(),
            inputs: vec![],
            outputs: vec![Port::output("Value", TypeTag::Str)],
        },
        Arc::new(Constant),
    );

    registry.register(
        NodeType {
            id: "multiply".to_string(),
            name: "Multiply".to_string(),
            description: "Product of two numbers".to_string(),
            inputs: vec![
                Port::input("A", TypeTag::Double).with_description("Number A"),
                Port::input("B", TypeTag::Double).with_description("Number B"),
            ],
            outputs: vec![Port::output("A*B", TypeTag::Double).with_description("Product of A x B")],
        },
        Arc::new(Multiply),
    );

    registry.register(
        NodeType {
            id: "multi_operation".to_string(),
            name: "MultiOperation".to_string(),
            description: "Performs multiple operations with the inputs".to_string(),
            inputs: vec![
                Port::input("A", TypeTag::Double).with_description("Number A"),
                Port::input("B", TypeTag::Double).with_description("Number B"),
            ],
            outputs: vec![
                Port::output("AxB", TypeTag::Double).with_description("Product of A x B"),
                Port::output("A+B", TypeTag::Double).with_description("Addition of A and B"),
                Port::output("A-B", TypeTag::Double).with_description("Subtraction of A and B"),
                Port::output("A/B", TypeTag::Double).with_description("Division of A by B"),
            ],
        },
        Arc::new(MultiOperation),
    );

    registry.register(
        NodeType {
            id: "inspect".to_string(),
            name: "Inspect".to_string(),
            description: "Concatenates three strings and bridges the connected inputs back to the node instance".to_string(),
            inputs: vec![
                Port::input("A", TypeTag::Str).with_description("A string"),
                Port::input("B", TypeTag::Str).with_description("Another string"),
                Port::input("C", TypeTag::Str).with_description("Another string"),
            ],
            outputs: vec![Port::output("Out", TypeTag::Str).with_description("Resulting string")],
        },
        Arc::new(Inspect),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_types_have_compilers() {
        let registry = standard_registry();
        for node_type in registry.types() {
            assert!(
                registry.compiler(&node_type.id).is_some(),
                "missing compiler for {}",
                node_type.id
            );
        }
    }

    #[test]
    fn test_create_known_node() {
        let registry = standard_registry();
        let node = registry.create_node("multi_operation").unwrap();
        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.outputs.len(), 4);
        assert!(registry.create_node("unknown").is_none());
    }
}
