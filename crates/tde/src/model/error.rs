// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Model and manager errors.

use crate::types::{ParseScalarError, TypeError};
use std::fmt;

/// Errors raised while building or mutating element trees.
///
/// Two families: *technical* errors wrap a type-system failure or an
/// unsupported type shape and are reported to the user as such; every other
/// variant is a *usage* error (illegal API use or invalid input).
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Type-system lookup failed while `context` was being processed.
    Technical { context: String, source: TypeError },
    /// Field signature the walker cannot model (type variable, wildcard, capture).
    UnsupportedSignature { field: String, signature: String },
    /// A referenced type is unknown to the resolver.
    TypeNotFound(String),
    /// Instantiation of an abstract type without a dedicated factory.
    AbstractType(String),
    /// No factory is registered for the type or any of its ancestors.
    NoFactory(String),
    /// Array dimensions must be >= 1.
    InvalidDimensions(u32),
    /// Array operation on a non-array type.
    NotAnArray(String),
    /// Null assigned to a slot that cannot be unset.
    NullNotAllowed(String),
    /// No extender applies to the element.
    NotExtendable(String),
    IndexOutOfBounds { index: usize, length: usize },
    /// Text rejected by a leaf codec.
    InvalidValue(ParseScalarError),
    /// Scalar of the wrong kind for a leaf.
    ScalarMismatch { expected: String, got: String },
    /// Enum type without constants.
    EmptyEnum(String),
    /// Value type is not compatible with the attribute's lower bound.
    NotAssignable { value: String, lower_bound: String },
    /// A path does not address an attribute of the tree.
    InvalidPath(String),
    /// Operation not supported by this element kind.
    Unsupported(String),
}

impl ModelError {
    /// Wrap a type-system failure with the name of what was being processed.
    pub fn technical(context: impl Into<String>, source: TypeError) -> Self {
        Self::Technical {
            context: context.into(),
            source,
        }
    }

    /// Type-system failures and unsupported type shapes.
    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            Self::Technical { .. } | Self::UnsupportedSignature { .. } | Self::TypeNotFound(_)
        )
    }

    /// Illegal API use or invalid input.
    pub fn is_usage(&self) -> bool {
        !self.is_technical()
    }
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Technical { context, source } => {
                write!(f, "Technical error while processing {}: {}", context, source)
            }
            Self::UnsupportedSignature { field, signature } => {
                write!(f, "Unsupported type shape '{}' for field {}", signature, field)
            }
            Self::TypeNotFound(name) => write!(f, "Type not found: {}", name),
            Self::AbstractType(name) => {
                write!(f, "Cannot instantiate abstract type without a dedicated factory: {}", name)
            }
            Self::NoFactory(name) => write!(f, "No factory registered for {}", name),
            Self::InvalidDimensions(d) => {
                write!(f, "Invalid array dimensions: {} (must be >= 1)", d)
            }
            Self::NotAnArray(name) => write!(f, "Not an array type: {}", name),
            Self::NullNotAllowed(name) => write!(f, "Null values not supported for {}", name),
            Self::NotExtendable(name) => write!(f, "No extender for {}", name),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index out of bounds: {} >= {}", index, length)
            }
            Self::InvalidValue(e) => write!(f, "Invalid value: {}", e),
            Self::ScalarMismatch { expected, got } => {
                write!(f, "Scalar mismatch: expected {}, got {}", expected, got)
            }
            Self::EmptyEnum(name) => write!(f, "Enum type has no constants: {}", name),
            Self::NotAssignable { value, lower_bound } => {
                write!(f, "{} is not assignable to {}", value, lower_bound)
            }
            Self::InvalidPath(path) => write!(f, "Invalid path: {}", path),
            Self::Unsupported(msg) => write!(f, "Unsupported operation: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Technical { source, .. } => Some(source),
            Self::InvalidValue(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseScalarError> for ModelError {
    fn from(e: ParseScalarError) -> Self {
        Self::InvalidValue(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_families() {
        let tech =
            ModelError::technical("com.acme.Foo", TypeError::NotFound("com.acme.Bar".into()));
        assert!(tech.is_technical());
        assert!(tech.source().is_some());
        assert!(tech.to_string().contains("com.acme.Foo"));

        assert!(ModelError::AbstractType("x.Y".into()).is_usage());
        assert!(ModelError::InvalidDimensions(0).is_usage());
        assert!(ModelError::UnsupportedSignature {
            field: "t".into(),
            signature: "T".into()
        }
        .is_technical());
    }
}
