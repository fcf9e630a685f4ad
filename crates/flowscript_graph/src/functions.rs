// SPDX-License-Identifier: MIT OR Apache-2.0
//! The domain function surface invoked from emitted IR.
//!
//! Compilation only needs the [`FunctionRef`] signatures; the native
//! implementations are offered so a host can bind the names directly.

use crate::bridge::RuntimeValue;
use flowscript_ir::{FunctionRef, TypeTag};

fn binary_double(name: &str) -> FunctionRef {
    FunctionRef::new(name, vec![TypeTag::Double, TypeTag::Double], TypeTag::Double)
}

/// `multiply(double, double) -> double`
pub fn multiply() -> FunctionRef {
    binary_double("multiply")
}

/// `add(double, double) -> double`
pub fn add() -> FunctionRef {
    binary_double("add")
}

/// `subtract(double, double) -> double`
pub fn subtract() -> FunctionRef {
    binary_double("subtract")
}

/// `divide(double, double) -> double`
pub fn divide() -> FunctionRef {
    binary_double("divide")
}

/// `concat(string, string, string) -> string`
pub fn concat() -> FunctionRef {
    FunctionRef::new(
        "concat",
        vec![TypeTag::Str, TypeTag::Str, TypeTag::Str],
        TypeTag::Str,
    )
}

fn as_double(value: &RuntimeValue) -> f64 {
    match value {
        RuntimeValue::Int(v) => *v as f64,
        RuntimeValue::Double(v) => *v,
        _ => f64::NAN,
    }
}

fn as_str(value: &RuntimeValue) -> &str {
    match value {
        RuntimeValue::Str(v) => v,
        _ => "",
    }
}

/// Apply a function by name to materialized arguments.
///
/// Returns `None` for names outside this surface or for an argument count
/// that does not match the declared arity, letting a host layer its own
/// bindings on top.
pub fn apply(name: &str, args: &[RuntimeValue]) -> Option<RuntimeValue> {
    let value = match (name, args) {
        ("multiply", [a, b]) => RuntimeValue::Double(as_double(a) * as_double(b)),
        ("add", [a, b]) => RuntimeValue::Double(as_double(a) + as_double(b)),
        ("subtract", [a, b]) => RuntimeValue::Double(as_double(a) - as_double(b)),
        ("divide", [a, b]) => RuntimeValue::Double(as_double(a) / as_double(b)),
        ("concat", [a, b, c]) => {
            RuntimeValue::Str(format!("{}{}{}", as_str(a), as_str(b), as_str(c)))
        }
        _ => return None,
    };
    Some(value)
}
