// SPDX-License-Identifier: MIT OR Apache-2.0
//! IR node values and their stateless constructors.

use crate::function::FunctionRef;
use serde::{Deserialize, Serialize};

/// An immutable IR value consumed by a host interpreter.
///
/// IR nodes are pure data: no identity beyond structural content, no side
/// effects on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrNode {
    /// Null literal
    Null,
    /// Integer literal
    Int(i64),
    /// String literal
    Str(String),
    /// Reference to a previously assigned identifier
    Identifier(String),
    /// Call of a host function with ordered arguments
    FunctionCall {
        /// The referenced function
        function: FunctionRef,
        /// Argument IR nodes, one per declared parameter
        arguments: Vec<IrNode>,
    },
    /// Ordered list of IR nodes packaged as one value
    ExprList(Vec<IrNode>),
}

impl IrNode {
    /// Build a null literal
    pub fn null() -> Self {
        Self::Null
    }

    /// Build an integer literal
    pub fn int(value: i64) -> Self {
        Self::Int(value)
    }

    /// Build a string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Build an identifier reference
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Build a function call.
    ///
    /// The argument count must equal the function's declared arity; a mismatch
    /// is a programming error in the calling node type, not a recoverable
    /// runtime condition.
    pub fn function_call(function: FunctionRef, arguments: Vec<IrNode>) -> Self {
        debug_assert_eq!(
            arguments.len(),
            function.arity(),
            "argument count does not match arity of `{}`",
            function.name
        );
        Self::FunctionCall {
            function,
            arguments,
        }
    }

    /// Build an expression list bundling several IR nodes into one value
    pub fn expr_list(nodes: Vec<IrNode>) -> Self {
        Self::ExprList(nodes)
    }
}

/// One IR statement: assign a value into a named identifier.
///
/// A node's compilation result is an ordered list of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Identifier assigned into
    pub target: String,
    /// Value IR node
    pub value: IrNode,
}

impl Assignment {
    /// Create a new assignment
    pub fn new(target: impl Into<String>, value: IrNode) -> Self {
        Self {
            target: target.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::TypeTag;

    fn multiply() -> FunctionRef {
        FunctionRef::new(
            "multiply",
            vec![TypeTag::Double, TypeTag::Double],
            TypeTag::Double,
        )
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(IrNode::int(42), IrNode::Int(42));
        assert_eq!(IrNode::string("a"), IrNode::Str("a".into()));
        assert_ne!(IrNode::identifier("a"), IrNode::string("a"));
    }

    #[test]
    fn test_function_call_shape() {
        let call = IrNode::function_call(
            multiply(),
            vec![IrNode::identifier("x"), IrNode::identifier("y")],
        );
        match call {
            IrNode::FunctionCall {
                function,
                arguments,
            } => {
                assert_eq!(function.name, "multiply");
                assert_eq!(arguments.len(), 2);
            }
            other => panic!("expected function call, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "argument count")]
    fn test_arity_mismatch_is_a_bug() {
        let _ = IrNode::function_call(multiply(), vec![IrNode::identifier("x")]);
    }

    #[test]
    fn test_serde_round_trip() {
        let stmt = Assignment::new(
            "n_out0",
            IrNode::expr_list(vec![IrNode::null(), IrNode::int(7)]),
        );
        let json = serde_json::to_string(&stmt).unwrap();
        let loaded: Assignment = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, stmt);
    }
}
