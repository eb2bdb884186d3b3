// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Java primitive kinds and their wrapper classes.

use super::{
    ClassDefinition, ElementCategory, Modifiers, ParseScalarError, Scalar, TypeHandle, TypeKind,
};

/// Root of every class hierarchy.
pub const OBJECT_TYPE: &str = "java.lang.Object";

/// The eight Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveKind {
    /// All kinds, in Java declaration order.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Char,
    ];

    /// Java keyword for the primitive (`int`, `char`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
        }
    }

    /// Fully-qualified wrapper class name.
    pub fn wrapper_name(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
            Self::Char => "java.lang.Character",
        }
    }

    /// Look up a kind by its keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Look up a kind by its wrapper class name.
    pub fn from_wrapper(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.wrapper_name() == name)
    }

    /// Default value: `false`, zero, or the NUL character.
    // @audit-ok: Simple pattern matching (cyclo 8, cogni 1) - one default per primitive
    pub fn default_value(self) -> Scalar {
        match self {
            Self::Boolean => Scalar::Boolean(false),
            Self::Byte => Scalar::Byte(0),
            Self::Short => Scalar::Short(0),
            Self::Int => Scalar::Int(0),
            Self::Long => Scalar::Long(0),
            Self::Float => Scalar::Float(0.0),
            Self::Double => Scalar::Double(0.0),
            Self::Char => Scalar::Char('\0'),
        }
    }

    /// Parse the textual form of a value of this kind.
    ///
    /// Numbers and booleans tolerate surrounding whitespace. An empty char
    /// text is the NUL character.
    pub fn parse(self, text: &str) -> Result<Scalar, ParseScalarError> {
        let err = || ParseScalarError::new(self.name(), text);
        let trimmed = text.trim();
        match self {
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" => Ok(Scalar::Boolean(true)),
                "false" => Ok(Scalar::Boolean(false)),
                _ => Err(err()),
            },
            Self::Byte => trimmed.parse().map(Scalar::Byte).map_err(|_| err()),
            Self::Short => trimmed.parse().map(Scalar::Short).map_err(|_| err()),
            Self::Int => trimmed.parse().map(Scalar::Int).map_err(|_| err()),
            Self::Long => trimmed.parse().map(Scalar::Long).map_err(|_| err()),
            Self::Float => java_special(trimmed)
                .map(|v| v as f32)
                .or_else(|| trimmed.parse().ok())
                .map(Scalar::Float)
                .ok_or_else(err),
            Self::Double => java_special(trimmed)
                .or_else(|| trimmed.parse().ok())
                .map(Scalar::Double)
                .ok_or_else(err),
            Self::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (None, _) => Ok(Scalar::Char('\0')),
                    (Some(c), None) => Ok(Scalar::Char(c)),
                    _ => Err(err()),
                }
            }
        }
    }

    /// Handle of the wrapper class, usable without a resolver.
    pub fn wrapper_handle(self) -> TypeHandle {
        TypeHandle::new(self.wrapper_name(), TypeKind::Class, Modifiers::FINAL)
    }

    /// Definition used for primitive slots: wrapper name, PRIMITIVE category.
    pub fn definition(self) -> ClassDefinition {
        ClassDefinition::new(self.wrapper_handle(), ElementCategory::Primitive)
    }
}

/// Java spellings of the special floating-point values.
fn java_special(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(PrimitiveKind::Boolean.default_value(), Scalar::Boolean(false));
        assert_eq!(PrimitiveKind::Byte.default_value(), Scalar::Byte(0));
        assert_eq!(PrimitiveKind::Short.default_value(), Scalar::Short(0));
        assert_eq!(PrimitiveKind::Int.default_value(), Scalar::Int(0));
        assert_eq!(PrimitiveKind::Long.default_value(), Scalar::Long(0));
        assert_eq!(PrimitiveKind::Float.default_value(), Scalar::Float(0.0));
        assert_eq!(PrimitiveKind::Double.default_value(), Scalar::Double(0.0));
        assert_eq!(PrimitiveKind::Char.default_value(), Scalar::Char('\0'));
    }

    #[test]
    fn test_name_lookups() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_name(kind.name()), Some(kind));
            assert_eq!(PrimitiveKind::from_wrapper(kind.wrapper_name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_name("void"), None);
        assert_eq!(PrimitiveKind::from_wrapper("java.lang.String"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(PrimitiveKind::Int.parse(" 42 "), Ok(Scalar::Int(42)));
        assert_eq!(PrimitiveKind::Boolean.parse("TRUE"), Ok(Scalar::Boolean(true)));
        assert_eq!(PrimitiveKind::Byte.parse("-128"), Ok(Scalar::Byte(-128)));
        assert!(PrimitiveKind::Byte.parse("128").is_err());
        assert_eq!(PrimitiveKind::Double.parse("-Infinity"), Ok(Scalar::Double(f64::NEG_INFINITY)));
        assert_eq!(PrimitiveKind::Char.parse(""), Ok(Scalar::Char('\0')));
        assert_eq!(PrimitiveKind::Char.parse(" "), Ok(Scalar::Char(' ')));
        assert!(PrimitiveKind::Char.parse("ab").is_err());
    }

    #[test]
    fn test_definition_uses_wrapper_name() {
        let def = PrimitiveKind::Int.definition();
        assert_eq!(def.name(), "java.lang.Integer");
        assert!(def.category().is_primitive());
    }
}
