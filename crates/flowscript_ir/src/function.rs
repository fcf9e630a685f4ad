// SPDX-License-Identifier: MIT OR Apache-2.0
//! Function references with fixed, statically-known signatures.

use serde::{Deserialize, Serialize};

/// Declared type of a port or function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    /// Double-precision number
    Double,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// String value
    Str,
    /// Any type (for generic slots)
    Any,
    /// Custom host-defined type
    Custom(String),
}

impl TypeTag {
    /// Check if a value of this type can flow into a slot of another type
    pub fn can_flow_into(&self, other: &TypeTag) -> bool {
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }

        if self == other {
            return true;
        }

        // Implicit numeric widening
        matches!((self, other), (Self::Int, Self::Double))
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Double => write!(f, "double"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::Str => write!(f, "string"),
            Self::Any => write!(f, "var"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// A reference to a host function with a fixed signature.
///
/// The reference carries the function's name and declared parameter/return
/// types; resolving the name to an executable function happens at the host's
/// binding time, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRef {
    /// Name the host resolves at binding time
    pub name: String,
    /// Declared parameter types, in order
    pub parameter_types: Vec<TypeTag>,
    /// Declared return type
    pub return_type: TypeTag,
}

impl FunctionRef {
    /// Create a new function reference
    pub fn new(
        name: impl Into<String>,
        parameter_types: Vec<TypeTag>,
        return_type: TypeTag,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_types,
            return_type,
        }
    }

    /// Number of parameters the function takes
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_display() {
        assert_eq!(TypeTag::Double.to_string(), "double");
        assert_eq!(TypeTag::Str.to_string(), "string");
        assert_eq!(TypeTag::Custom("MyMesh".into()).to_string(), "MyMesh");
    }

    #[test]
    fn test_type_flow() {
        assert!(TypeTag::Int.can_flow_into(&TypeTag::Double));
        assert!(!TypeTag::Double.can_flow_into(&TypeTag::Int));
        assert!(TypeTag::Any.can_flow_into(&TypeTag::Str));
        assert!(TypeTag::Str.can_flow_into(&TypeTag::Any));
        assert!(!TypeTag::Str.can_flow_into(&TypeTag::Bool));
    }

    #[test]
    fn test_arity() {
        let f = FunctionRef::new(
            "multiply",
            vec![TypeTag::Double, TypeTag::Double],
            TypeTag::Double,
        );
        assert_eq!(f.arity(), 2);
    }
}
