// SPDX-License-Identifier: MIT OR Apache-2.0
//! Arithmetic node types.

use crate::compile::{CompileContext, NodeCompiler};
use crate::functions;
use flowscript_ir::{Assignment, IrNode};

/// Two numeric inputs, one output: their product
pub struct Multiply;

impl NodeCompiler for Multiply {
    fn compile(&self, ctx: &CompileContext<'_>) -> Vec<Assignment> {
        if !ctx.all_inputs_connected() {
            return ctx.fallback_outputs();
        }

        vec![ctx.assign_output(
            0,
            IrNode::function_call(functions::multiply(), vec![ctx.input(0), ctx.input(1)]),
        )]
    }
}

/// Two numeric inputs, four outputs: product, sum, difference and quotient.
///
/// Fallback outputs are the documented default literals 1, 2, 3 and 4 rather
/// than null, so a half-wired instance still shows distinguishable values.
pub struct MultiOperation;

impl NodeCompiler for MultiOperation {
    fn compile(&self, ctx: &CompileContext<'_>) -> Vec<Assignment> {
        if !ctx.all_inputs_connected() {
            return (0..4)
                .map(|index| ctx.assign_output(index, IrNode::int(index as i64 + 1)))
                .collect();
        }

        let ops = [
            functions::multiply(),
            functions::add(),
            functions::subtract(),
            functions::divide(),
        ];
        ops.into_iter()
            .enumerate()
            .map(|(index, function)| {
                ctx.assign_output(
                    index,
                    IrNode::function_call(function, vec![ctx.input(0), ctx.input(1)]),
                )
            })
            .collect()
    }
}
