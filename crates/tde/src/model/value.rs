// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf elements.

use super::ModelError;
use crate::types::{ClassDefinition, PrimitiveKind, Scalar};

/// `strftime` pattern of date values, as rendered in data files.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f UTC";

/// Kind of leaf, used as the lookup key of its [`LeafCodec`](super::LeafCodec).
#[derive(Debug, Clone, PartialEq)]
pub enum LeafKind {
    /// Unboxed primitive; never null.
    Primitive(PrimitiveKind),
    /// Boxed primitive.
    Wrapper(PrimitiveKind),
    /// `String`, `StringBuilder`, `StringBuffer`.
    Text,
    /// Types that round-trip through their string form (URL, BigDecimal...).
    Parsed,
    /// `java.util.Date` in [`DATE_FORMAT`].
    Date,
    /// Enum with its constants in declaration order.
    Enum(Vec<String>),
    /// Externally registered leaf kind.
    Custom(String),
}

impl LeafKind {
    /// Stable codec key.
    pub fn codec_key(&self) -> &str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Wrapper(_) => "wrapper",
            Self::Text => "text",
            Self::Parsed => "parsed",
            Self::Date => "date",
            Self::Enum(_) => "enum",
            Self::Custom(key) => key,
        }
    }
}

/// Atomic element holding one scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueElement {
    ty: ClassDefinition,
    leaf: LeafKind,
    value: Scalar,
}

impl ValueElement {
    /// Primitive value holding the kind's default.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            ty: kind.definition(),
            leaf: LeafKind::Primitive(kind),
            value: kind.default_value(),
        }
    }

    /// Wrapper value holding the primitive default.
    pub fn wrapper(ty: ClassDefinition, kind: PrimitiveKind) -> Self {
        Self {
            ty,
            leaf: LeafKind::Wrapper(kind),
            value: kind.default_value(),
        }
    }

    /// String-like value, initially empty.
    pub fn text(ty: ClassDefinition) -> Self {
        Self {
            ty,
            leaf: LeafKind::Text,
            value: Scalar::Text(String::new()),
        }
    }

    /// Parsed value, initially empty.
    pub fn parsed(ty: ClassDefinition) -> Self {
        Self {
            ty,
            leaf: LeafKind::Parsed,
            value: Scalar::Text(String::new()),
        }
    }

    /// Date value, initially the current time.
    pub fn date(ty: ClassDefinition) -> Self {
        let now = chrono::Utc::now().naive_utc().format(DATE_FORMAT).to_string();
        Self {
            ty,
            leaf: LeafKind::Date,
            value: Scalar::Text(now),
        }
    }

    /// Enum value set to the first constant.
    pub fn enumeration(ty: ClassDefinition, constants: Vec<String>) -> Result<Self, ModelError> {
        let first = constants
            .first()
            .cloned()
            .ok_or_else(|| ModelError::EmptyEnum(ty.name().to_string()))?;
        Ok(Self {
            ty,
            leaf: LeafKind::Enum(constants),
            value: Scalar::Text(first),
        })
    }

    /// Leaf of an externally registered kind.
    pub fn custom(ty: ClassDefinition, key: impl Into<String>, initial: Scalar) -> Self {
        Self {
            ty,
            leaf: LeafKind::Custom(key.into()),
            value: initial,
        }
    }

    pub fn ty(&self) -> &ClassDefinition {
        &self.ty
    }

    pub fn leaf(&self) -> &LeafKind {
        &self.leaf
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// Enum constants (empty for other leaves).
    pub fn constants(&self) -> &[String] {
        match &self.leaf {
            LeafKind::Enum(constants) => constants,
            _ => &[],
        }
    }

    /// Replace the scalar, returning the previous one.
    ///
    /// The scalar must match the leaf: the primitive kind for primitives and
    /// wrappers, text for everything else, a declared constant for enums.
    pub fn set(&mut self, value: Scalar) -> Result<Scalar, ModelError> {
        let mismatch = |expected: &str, got: &Scalar| ModelError::ScalarMismatch {
            expected: expected.to_string(),
            got: format!("{:?}", got),
        };
        match &self.leaf {
            LeafKind::Primitive(kind) | LeafKind::Wrapper(kind) => {
                if value.primitive_kind() != Some(*kind) {
                    return Err(mismatch(kind.name(), &value));
                }
            }
            LeafKind::Enum(constants) => match value.as_text() {
                Some(name) if constants.iter().any(|c| c == name) => {}
                _ => return Err(mismatch("enum constant", &value)),
            },
            LeafKind::Text | LeafKind::Parsed | LeafKind::Date => {
                if value.as_text().is_none() {
                    return Err(mismatch("text", &value));
                }
            }
            LeafKind::Custom(_) => {}
        }
        Ok(std::mem::replace(&mut self.value, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ElementCategory, TypeHandle};

    fn def(name: &str) -> ClassDefinition {
        ClassDefinition::new(TypeHandle::class(name), ElementCategory::Value)
    }

    #[test]
    fn test_primitive_defaults_are_present() {
        for kind in PrimitiveKind::ALL {
            let v = ValueElement::primitive(kind);
            assert_eq!(v.value(), &kind.default_value());
            assert!(v.ty().category().is_primitive());
        }
    }

    #[test]
    fn test_text_defaults_empty() {
        assert_eq!(
            ValueElement::text(def("java.lang.String")).value(),
            &Scalar::Text(String::new())
        );
        assert_eq!(ValueElement::parsed(def("java.net.URL")).value(), &Scalar::Text(String::new()));
    }

    #[test]
    fn test_enum_first_constant_and_empty() {
        let color =
            ValueElement::enumeration(def("com.acme.Color"), vec!["RED".into(), "GREEN".into()])
                .unwrap();
        assert_eq!(color.value(), &Scalar::Text("RED".into()));
        assert_eq!(
            ValueElement::enumeration(def("com.acme.Empty"), Vec::new()),
            Err(ModelError::EmptyEnum("com.acme.Empty".into()))
        );
    }

    #[test]
    fn test_set_checks_kind() {
        let mut v = ValueElement::wrapper(def("java.lang.Integer"), PrimitiveKind::Int);
        assert_eq!(v.set(Scalar::Int(5)), Ok(Scalar::Int(0)));
        assert!(v.set(Scalar::Long(5)).is_err());

        let mut e =
            ValueElement::enumeration(def("com.acme.Color"), vec!["RED".into(), "GREEN".into()])
                .unwrap();
        assert!(e.set("GREEN".into()).is_ok());
        assert!(e.set("BLUE".into()).is_err());
    }

    #[test]
    fn test_date_default_parses() {
        let d = ValueElement::date(def("java.util.Date"));
        let text = d.value().as_text().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(text, DATE_FORMAT).is_ok());
    }
}
