// SPDX-License-Identifier: MIT OR Apache-2.0
//! Intermediate representation for flowscript.
//!
//! This crate defines the IR value language that graph nodes compile into:
//! - Literal, identifier, function-call, assignment and expression-list nodes
//! - Function references with fixed, statically-known signatures
//! - Deterministic output-identifier allocation
//!
//! IR nodes are immutable plain data with structural equality only. They carry
//! no execution semantics of their own; a host interpreter consumes them by
//! value.

pub mod ast;
pub mod function;
pub mod ident;

pub use ast::{Assignment, IrNode};
pub use function::{FunctionRef, TypeTag};
