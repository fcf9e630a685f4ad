// SPDX-License-Identifier: MIT OR Apache-2.0
//! The bridged inspection node.

use crate::bridge::bridge_send_call;
use crate::compile::{CompileContext, NodeCompiler};
use crate::functions;
use flowscript_ir::{Assignment, IrNode};

/// Concatenates three strings and bridges the materialized inputs back to the
/// node instance.
///
/// Besides its output assignment, a fully connected instance emits an
/// auxiliary assignment of a bridge-send call wrapping all three input IR
/// nodes as one expression list. After the interpreter evaluates that list,
/// the value arrives at whatever callback the instance registered under its
/// id. A half-wired instance emits the null fallback only; no bridge send, so
/// no callback fires for it.
pub struct Inspect;

impl NodeCompiler for Inspect {
    fn compile(&self, ctx: &CompileContext<'_>) -> Vec<Assignment> {
        if !ctx.all_inputs_connected() {
            return ctx.fallback_outputs();
        }

        let concatenated = IrNode::function_call(
            functions::concat(),
            vec![ctx.input(0), ctx.input(1), ctx.input(2)],
        );
        let bridged = bridge_send_call(
            ctx.node.id.to_string(),
            IrNode::expr_list(ctx.all_inputs()),
        );

        vec![
            ctx.assign_output(0, concatenated),
            Assignment::new(ctx.dummy_target(), bridged),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BRIDGE_SEND_FUNCTION;
    use crate::compile::compile_node;
    use crate::nodes::standard_registry;

    #[test]
    fn test_bridged_compilation_shape() {
        let registry = standard_registry();
        let node = registry.create_node("inspect").unwrap();
        let inputs = [
            IrNode::identifier("a"),
            IrNode::identifier("b"),
            IrNode::identifier("c"),
        ];
        let result = compile_node(&registry, &node, &[true, true, true], &inputs);

        assert_eq!(result.len(), 2);
        let base = node.id.identifier_base();

        assert_eq!(result[0].target, format!("{base}_out0"));
        match &result[0].value {
            IrNode::FunctionCall { function, .. } => assert_eq!(function.name, "concat"),
            other => panic!("expected function call, got {other:?}"),
        }

        assert_eq!(result[1].target, format!("{base}_dummy"));
        match &result[1].value {
            IrNode::FunctionCall {
                function,
                arguments,
            } => {
                assert_eq!(function.name, BRIDGE_SEND_FUNCTION);
                assert_eq!(arguments[0], IrNode::string(node.id.to_string()));
                assert_eq!(arguments[1], IrNode::expr_list(inputs.to_vec()));
            }
            other => panic!("expected bridge send call, got {other:?}"),
        }
    }

    #[test]
    fn test_any_disconnected_input_suppresses_the_bridge() {
        let registry = standard_registry();
        let node = registry.create_node("inspect").unwrap();
        for connectivity in [[false, true, true], [true, false, true], [true, true, false]] {
            let result = compile_node(&registry, &node, &connectivity, &[]);
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].value, IrNode::Null);
        }
    }
}
