// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Scalar payload of value elements.

use super::PrimitiveKind;
use std::fmt;

/// Value held by a leaf element.
///
/// Primitive and wrapper leaves hold the matching numeric variant; every
/// other leaf kind (strings, dates, enums, parsed values) holds `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Text(String),
}

impl Scalar {
    /// Primitive kind of a numeric/boolean/char scalar.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Boolean(_) => Some(PrimitiveKind::Boolean),
            Self::Byte(_) => Some(PrimitiveKind::Byte),
            Self::Short(_) => Some(PrimitiveKind::Short),
            Self::Int(_) => Some(PrimitiveKind::Int),
            Self::Long(_) => Some(PrimitiveKind::Long),
            Self::Float(_) => Some(PrimitiveKind::Float),
            Self::Double(_) => Some(PrimitiveKind::Double),
            Self::Char(_) => Some(PrimitiveKind::Char),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Textual form as written to data files and shown in the editor.
    pub fn render(&self) -> String {
        match self {
            Self::Boolean(v) => v.to_string(),
            Self::Byte(v) => v.to_string(),
            Self::Short(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Long(v) => v.to_string(),
            Self::Float(v) => render_float(f64::from(*v), v.to_string()),
            Self::Double(v) => render_float(*v, v.to_string()),
            Self::Char(c) if *c == '\0' => String::new(),
            Self::Char(c) => c.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Java-style spelling: `1.0` rather than `1`, `Infinity` rather than `inf`.
fn render_float(value: f64, shortest: String) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if shortest.contains(['.', 'e', 'E']) {
        shortest
    } else {
        format!("{}.0", shortest)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_scalar_from! {
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Text,
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Text that does not parse as the requested kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScalarError {
    /// Name of the expected kind (`int`, `date`, ...).
    pub expected: String,
    /// Offending text.
    pub text: String,
}

impl ParseScalarError {
    pub fn new(expected: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for ParseScalarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.text, self.expected)
    }
}

impl std::error::Error for ParseScalarError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_java_style() {
        assert_eq!(Scalar::Double(1.0).render(), "1.0");
        assert_eq!(Scalar::Float(2.5).render(), "2.5");
        assert_eq!(Scalar::Double(f64::INFINITY).render(), "Infinity");
        assert_eq!(Scalar::Float(f32::NAN).render(), "NaN");
        assert_eq!(Scalar::Char('\0').render(), "");
        assert_eq!(Scalar::Char('x').render(), "x");
        assert_eq!(Scalar::from("hi").render(), "hi");
    }

    #[test]
    fn test_render_parses_back() {
        for v in [0.1f64, -3.75, 1e300, 5e-324] {
            let text = Scalar::Double(v).render();
            assert_eq!(PrimitiveKind::Double.parse(&text), Ok(Scalar::Double(v)));
        }
        let text = Scalar::Float(0.1).render();
        assert_eq!(PrimitiveKind::Float.parse(&text), Ok(Scalar::Float(0.1)));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Scalar::Short(-7).as_i64(), Some(-7));
        assert_eq!(Scalar::Boolean(true).as_bool(), Some(true));
        assert_eq!(Scalar::Int(1).primitive_kind(), Some(PrimitiveKind::Int));
        assert_eq!(Scalar::Text(String::new()).primitive_kind(), None);
    }
}
