// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text input validation for leaf editors.
//!
//! A validator returns `None` for acceptable input and a short message
//! otherwise. Validation is advisory: [`LeafCodecs::parse_into`] still
//! decides whether the text is stored.
//!
//! [`LeafCodecs::parse_into`]: crate::model::LeafCodecs::parse_into

use crate::model::{LeafKind, ValueElement};
use crate::types::PrimitiveKind;
use regex::Regex;

pub trait InputValidator: Send + Sync {
    /// `None` when `text` is acceptable, else the reason it is not.
    fn validate(&self, text: &str) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Regex
// ---------------------------------------------------------------------------

/// Accepts text matching a pattern.
///
/// An invalid pattern rejects everything and reports itself.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    regex: Option<Regex>,
    pattern: String,
    message: String,
}

impl RegexValidator {
    pub fn new(pattern: &str, message: impl Into<String>) -> Self {
        let regex = Regex::new(pattern).ok();
        if regex.is_none() {
            log::warn!("[validators] invalid pattern '{}'", pattern);
        }
        Self {
            regex,
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }

    /// `true` or `false`, any case.
    pub fn boolean() -> Self {
        Self::new("(?i)^(true|false)$", "expected true or false")
    }

    /// At most one character; empty text is the NUL character.
    pub fn character() -> Self {
        Self::new(r"(?s)^.?$", "expected a single character")
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl InputValidator for RegexValidator {
    fn validate(&self, text: &str) -> Option<String> {
        match &self.regex {
            Some(regex) if regex.is_match(text) => None,
            Some(_) => Some(self.message.clone()),
            None => Some(format!("invalid pattern '{}'", self.pattern)),
        }
    }
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Integer or decimal notation without range checks.
#[derive(Debug, Clone)]
pub struct NumberValidator {
    inner: RegexValidator,
}

impl NumberValidator {
    pub fn integer() -> Self {
        Self {
            inner: RegexValidator::new(r"^[+-]?\d+$", "expected an integer"),
        }
    }

    pub fn decimal() -> Self {
        Self {
            inner: RegexValidator::new(r"^[+-]?\d+(\.\d*)?([eE][+-]?\d+)?$", "expected a number"),
        }
    }
}

impl InputValidator for NumberValidator {
    fn validate(&self, text: &str) -> Option<String> {
        self.inner.validate(text.trim())
    }
}

/// Number notation plus the range of a primitive kind.
#[derive(Debug, Clone)]
pub struct BoundedNumberValidator {
    kind: PrimitiveKind,
    notation: NumberValidator,
}

impl BoundedNumberValidator {
    /// `None` for kinds that are not numeric.
    pub fn new(kind: PrimitiveKind) -> Option<Self> {
        let notation = match kind {
            PrimitiveKind::Byte
            | PrimitiveKind::Short
            | PrimitiveKind::Int
            | PrimitiveKind::Long => {
                NumberValidator::integer()
            }
            PrimitiveKind::Float | PrimitiveKind::Double => NumberValidator::decimal(),
            PrimitiveKind::Boolean | PrimitiveKind::Char => return None,
        };
        Some(Self { kind, notation })
    }
}

impl InputValidator for BoundedNumberValidator {
    fn validate(&self, text: &str) -> Option<String> {
        if let Some(message) = self.notation.validate(text) {
            return Some(message);
        }
        match self.kind.parse(text.trim()) {
            Ok(_) => None,
            Err(_) => Some(format!("out of range for {}", self.kind.name())),
        }
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// `scheme:rest` URL syntax.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    inner: RegexValidator,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self {
            inner: RegexValidator::new(r"^[A-Za-z][A-Za-z0-9+.-]*:\S+$", "expected a URL"),
        }
    }
}

impl InputValidator for UrlValidator {
    fn validate(&self, text: &str) -> Option<String> {
        self.inner.validate(text)
    }
}

/// Any non-blank path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileValidator;

impl InputValidator for FileValidator {
    fn validate(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            Some("expected a file path".to_string())
        } else {
            None
        }
    }
}

/// Validator matching the leaf held by `value`, if any applies.
pub fn validator_for(value: &ValueElement) -> Option<Box<dyn InputValidator>> {
    let kind = match value.leaf() {
        LeafKind::Primitive(kind) | LeafKind::Wrapper(kind) => *kind,
        LeafKind::Parsed => {
            return match value.ty().name() {
                "java.net.URL" | "java.net.URI" => Some(Box::new(UrlValidator::default())),
                "java.io.File" => Some(Box::new(FileValidator)),
                "java.math.BigInteger" => Some(Box::new(NumberValidator::integer())),
                "java.math.BigDecimal" => Some(Box::new(NumberValidator::decimal())),
                _ => None,
            };
        }
        _ => return None,
    };
    match kind {
        PrimitiveKind::Boolean => Some(Box::new(RegexValidator::boolean())),
        PrimitiveKind::Char => Some(Box::new(RegexValidator::character())),
        _ => BoundedNumberValidator::new(kind).map(|v| Box::new(v) as Box<dyn InputValidator>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassDefinition, ElementCategory, TypeHandle};

    #[test]
    fn test_integer_range() {
        let byte = BoundedNumberValidator::new(PrimitiveKind::Byte).unwrap();
        assert!(byte.validate("127").is_none());
        assert!(byte.validate("-128").is_none());
        assert!(byte.validate("128").is_some());
        assert!(byte.validate("1.5").is_some());
        assert!(BoundedNumberValidator::new(PrimitiveKind::Char).is_none());
    }

    #[test]
    fn test_decimal_notation() {
        let double = NumberValidator::decimal();
        assert!(double.validate("3.25").is_none());
        assert!(double.validate("-1e10").is_none());
        assert!(double.validate("abc").is_some());
    }

    #[test]
    fn test_boolean_and_char() {
        let boolean = RegexValidator::boolean();
        assert!(boolean.validate("TRUE").is_none());
        assert!(boolean.validate("yes").is_some());

        let ch = RegexValidator::character();
        assert!(ch.validate("x").is_none());
        assert!(ch.validate("xy").is_some());
        assert!(ch.validate("\n").is_none());
        // Same rule as the char codec: empty text is NUL.
        assert!(ch.validate("").is_none());
        assert_eq!(PrimitiveKind::Char.parse(""), Ok(crate::types::Scalar::Char('\0')));
    }

    #[test]
    fn test_invalid_pattern_rejects() {
        let broken = RegexValidator::new("([", "never");
        let message = broken.validate("anything").unwrap();
        assert!(message.contains("invalid pattern"));
    }

    #[test]
    fn test_validator_for_leaves() {
        let int = ValueElement::primitive(PrimitiveKind::Int);
        let v = validator_for(&int).unwrap();
        assert!(v.validate("42").is_none());
        assert!(v.validate("99999999999").is_some());

        let url = ValueElement::parsed(ClassDefinition::new(
            TypeHandle::class("java.net.URL"),
            ElementCategory::Value,
        ));
        let v = validator_for(&url).unwrap();
        assert!(v.validate("https://naskel.com").is_none());
        assert!(v.validate("not a url").is_some());

        let text = ValueElement::text(ClassDefinition::new(
            TypeHandle::class("java.lang.String"),
            ElementCategory::Value,
        ));
        assert!(validator_for(&text).is_none());
    }
}
