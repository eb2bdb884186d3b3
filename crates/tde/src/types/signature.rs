// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field signatures.

use super::{Modifiers, PrimitiveKind, TypeError};
use std::fmt;

/// Declared type of a field, as reported by the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSignature {
    /// One of the eight primitives.
    Base(PrimitiveKind),
    /// Reference to a class or interface.
    ///
    /// `resolved` is false for source-level simple names that still have to
    /// be qualified relative to the declaring type.
    Class { name: String, resolved: bool },
    /// Array of `element` with `dimensions` >= 1.
    Array {
        element: Box<FieldSignature>,
        dimensions: u32,
    },
    /// Generic type parameter such as `T`.
    TypeVariable(String),
    /// `?`, `? extends X` or `? super X`.
    Wildcard,
    /// Compiler-generated capture of a wildcard.
    Capture,
}

impl FieldSignature {
    /// Parse Java source-like type text.
    ///
    /// `type_params` lists the declaring type's type parameters so that `T`
    /// parses as a type variable rather than a class name. Generic arguments
    /// of class types are dropped.
    pub fn parse(text: &str, type_params: &[String]) -> Result<Self, TypeError> {
        let err = |reason: &str| TypeError::Signature {
            text: text.to_string(),
            reason: reason.to_string(),
        };
        let mut base = text.trim();
        if base.is_empty() {
            return Err(err("empty type"));
        }
        if base == "capture" || base.starts_with("capture of") {
            return Ok(Self::Capture);
        }
        if base.starts_with('?') {
            return Ok(Self::Wildcard);
        }

        let mut dimensions = 0u32;
        while let Some(rest) = base.strip_suffix("[]") {
            dimensions += 1;
            base = rest.trim_end();
        }
        if let Some(open) = base.find('<') {
            if !base.ends_with('>') {
                return Err(err("unbalanced type arguments"));
            }
            base = base[..open].trim_end();
        }
        if base.is_empty() {
            return Err(err("missing type name"));
        }
        if base == "void" {
            return Err(err("void is not a field type"));
        }
        if !base
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '$' | '_'))
        {
            return Err(err("illegal character in type name"));
        }

        let element = if let Some(kind) = PrimitiveKind::from_name(base) {
            Self::Base(kind)
        } else if type_params.iter().any(|p| p == base) {
            Self::TypeVariable(base.to_string())
        } else {
            Self::Class {
                name: base.to_string(),
                resolved: base.contains('.'),
            }
        };

        if dimensions == 0 {
            Ok(element)
        } else {
            Ok(Self::Array {
                element: Box::new(element),
                dimensions,
            })
        }
    }
}

impl fmt::Display for FieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(kind) => f.write_str(kind.name()),
            Self::Class { name, .. } | Self::TypeVariable(name) => f.write_str(name),
            Self::Array {
                element,
                dimensions,
            } => {
                write!(f, "{}", element)?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            Self::Wildcard => f.write_str("?"),
            Self::Capture => f.write_str("capture"),
        }
    }
}

/// A declared field: name, signature and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub signature: FieldSignature,
    pub modifiers: Modifiers,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, signature: FieldSignature, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            signature,
            modifiers,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}
