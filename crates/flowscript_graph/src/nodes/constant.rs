// SPDX-License-Identifier: MIT OR Apache-2.0
//! Constant source nodes.

use crate::compile::{CompileContext, NodeCompiler};
use flowscript_ir::{Assignment, IrNode};

/// Assigns the instance's stored literal to its single output.
///
/// An instance without a literal payload compiles to a null output.
pub struct Constant;

impl NodeCompiler for Constant {
    fn compile(&self, ctx: &CompileContext<'_>) -> Vec<Assignment> {
        let value = ctx.node.literal.clone().unwrap_or(IrNode::Null);
        vec![ctx.assign_output(0, value)]
    }
}
