// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tag names for types and fields.
//!
//! A type tag is the alias of the type or its escaped qualified name,
//! followed by one `-array` suffix per array dimension. Primitive arrays
//! use the primitive name as base (`int-array`); wrapper arrays use the
//! qualified wrapper name (`java.lang.Integer-array`) so the two stay
//! distinguishable.

use super::alias::AliasTable;
use crate::types::{ClassDefinition, ElementCategory, PrimitiveKind};

/// Placeholder tag for an explicit null slot.
pub const NULL_TAG: &str = "null";
/// Suffix appended once per array dimension.
pub const ARRAY_SUFFIX: &str = "-array";
/// Concrete type of a structure field whose value differs from the declared type.
pub const CLASS_ATTRIBUTE: &str = "class";
/// Declaring type of a field hidden by a subclass field of the same name.
pub const DEFINED_IN_ATTRIBUTE: &str = "defined-in";

/// Marks leaf text stored as base64 because it holds characters XML cannot carry.
pub const ENCODING_ATTRIBUTE: &str = "encoding";
pub const BASE64_ENCODING: &str = "base64";

/// Whether `name` can be used unchanged as a tag: a letter or `_` followed
/// by letters, digits, `-`, `.` or `_`. Namespace colons are not allowed.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

/// Make a type or field name usable as a tag (`_` -> `__`, `$` -> `_-`).
pub fn escape_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' => out.push_str("__"),
            '$' => out.push_str("_-"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_name`].
pub fn unescape_name(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut chars = tag.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('_') => {
                chars.next();
                out.push('_');
            }
            Some('-') => {
                chars.next();
                out.push('$');
            }
            _ => out.push('_'),
        }
    }
    out
}

/// Tag of a value of type `def`.
pub fn type_tag(def: &ClassDefinition, aliases: &AliasTable) -> String {
    let primitive = PrimitiveKind::from_wrapper(def.name());
    let base = match (def.category(), primitive) {
        (ElementCategory::Primitive | ElementCategory::PrimitiveArray, Some(kind)) => {
            kind.name().to_string()
        }
        (ElementCategory::ObjectArray, Some(_)) => escape_name(def.name()),
        _ => match aliases.alias_of(def.name()) {
            Some(alias) => alias.to_string(),
            None => escape_name(def.name()),
        },
    };
    let mut tag = base;
    for _ in 0..def.dimensions() {
        tag.push_str(ARRAY_SUFFIX);
    }
    tag
}

/// Type described by a tag, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagType {
    /// Qualified name of the (element) type.
    pub name: String,
    /// Primitive array; `name` is then the wrapper class.
    pub primitive: bool,
    pub dimensions: u32,
}

impl TagType {
    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }
}

/// Inverse of [`type_tag`].
pub fn parse_tag(tag: &str, aliases: &AliasTable) -> TagType {
    let mut base = tag;
    let mut dimensions = 0;
    while let Some(stripped) = base.strip_suffix(ARRAY_SUFFIX) {
        base = stripped;
        dimensions += 1;
    }
    if dimensions > 0 {
        if let Some(kind) = PrimitiveKind::from_name(base) {
            return TagType {
                name: kind.wrapper_name().to_string(),
                primitive: true,
                dimensions,
            };
        }
    }
    let name = match aliases.type_of(base) {
        Some(ty) => ty.to_string(),
        None => unescape_name(base),
    };
    TagType {
        name,
        primitive: false,
        dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeHandle;

    fn def(name: &str, category: ElementCategory, dims: u32) -> ClassDefinition {
        ClassDefinition::array(TypeHandle::class(name), category, dims)
    }

    #[test]
    fn test_escape_roundtrip() {
        for name in ["a.b.C", "a.Outer$Inner", "my_field", "x_$_y", "_", "$"] {
            assert_eq!(unescape_name(&escape_name(name)), name);
        }
        assert_eq!(escape_name("a.Outer$Inner_1"), "a.Outer_-Inner__1");
    }

    #[test]
    fn test_type_tags() {
        let aliases = AliasTable::with_defaults();
        let tag = |d: &ClassDefinition| type_tag(d, &aliases);

        assert_eq!(tag(&def("java.lang.String", ElementCategory::Value, 0)), "string");
        assert_eq!(tag(&def("java.lang.Integer", ElementCategory::Value, 0)), "int");
        assert_eq!(tag(&PrimitiveKind::Char.definition()), "char");
        assert_eq!(
            tag(&def("java.lang.Integer", ElementCategory::PrimitiveArray, 2)),
            "int-array-array"
        );
        assert_eq!(
            tag(&def("java.lang.Integer", ElementCategory::ObjectArray, 1)),
            "java.lang.Integer-array"
        );
        assert_eq!(tag(&def("java.lang.String", ElementCategory::ObjectArray, 1)), "string-array");
        assert_eq!(tag(&def("a.Outer$Inner", ElementCategory::Structure, 0)), "a.Outer_-Inner");
    }

    #[test]
    fn test_parse_tags() {
        let aliases = AliasTable::with_defaults();
        let parse = |t: &str| parse_tag(t, &aliases);

        let ints = parse("int-array-array");
        assert_eq!(ints.name, "java.lang.Integer");
        assert!(ints.primitive);
        assert_eq!(ints.dimensions, 2);

        let wrappers = parse("java.lang.Integer-array");
        assert!(!wrappers.primitive);
        assert_eq!(wrappers.dimensions, 1);

        assert_eq!(parse("int").name, "java.lang.Integer");
        assert!(!parse("int").primitive);
        assert_eq!(parse("list").name, "java.util.ArrayList");
        assert_eq!(parse("a.Outer_-Inner").name, "a.Outer$Inner");
        assert!(!parse("a.Outer_-Inner").is_array());
    }
}
