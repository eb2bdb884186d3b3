// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element categories.

use std::fmt;

/// Coarse classification of a resolved type.
///
/// Drives which factory shape a type gets and how the editor presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    /// One of the eight Java primitives.
    Primitive,
    /// Atomic value: strings, wrappers, dates, enums.
    Value,
    /// `java.util` collections and maps.
    Collection,
    /// Array whose element type is a reference type.
    ObjectArray,
    /// Array whose element type is a primitive.
    PrimitiveArray,
    /// Any other class, modeled field by field.
    Structure,
}

impl ElementCategory {
    /// True for both array categories.
    pub fn is_array(self) -> bool {
        matches!(self, Self::ObjectArray | Self::PrimitiveArray)
    }

    /// True only for [`ElementCategory::Primitive`].
    pub fn is_primitive(self) -> bool {
        self == Self::Primitive
    }

    /// Upper-case name, as shown by the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Self::Primitive => "PRIMITIVE",
            Self::Value => "VALUE",
            Self::Collection => "COLLECTION",
            Self::ObjectArray => "OBJECT_ARRAY",
            Self::PrimitiveArray => "PRIMITIVE_ARRAY",
            Self::Structure => "STRUCTURE",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
