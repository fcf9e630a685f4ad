// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deterministic allocation of output-slot identifiers.
//!
//! Each node instance owns an identifier base derived from its stable instance
//! id. Re-compilation must produce the same targets on every pass, so these are
//! pure formatting functions over that base.

/// Identifier a node instance assigns its `index`-th output into
pub fn output_identifier(base: &str, index: usize) -> String {
    format!("{base}_out{index}")
}

/// Auxiliary identifier for assignments not tied to a declared output port
pub fn dummy_identifier(base: &str) -> String {
    format!("{base}_dummy")
}
