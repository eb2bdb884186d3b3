// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type handles and class definitions.

use super::ElementCategory;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::BitOr;
use std::sync::Arc;

/// Declaration kind of a host type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// Java modifier bits relevant to the element model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const STATIC: Self = Self(0x01);
    pub const ABSTRACT: Self = Self(0x02);
    pub const FINAL: Self = Self(0x04);

    /// Check whether all bits of `other` are set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    pub fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug)]
struct HandleInner {
    name: String,
    kind: TypeKind,
    modifiers: Modifiers,
}

/// Opaque, cheaply clonable reference to a host type.
///
/// Two handles are equal when they name the same fully-qualified type.
#[derive(Debug, Clone)]
pub struct TypeHandle(Arc<HandleInner>);

impl TypeHandle {
    /// Create a handle for a fully-qualified type name.
    pub fn new(name: impl Into<String>, kind: TypeKind, modifiers: Modifiers) -> Self {
        Self(Arc::new(HandleInner {
            name: name.into(),
            kind,
            modifiers,
        }))
    }

    /// Concrete class without modifiers.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, Modifiers::NONE)
    }

    /// Interface handle.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface, Modifiers::ABSTRACT)
    }

    /// Fully-qualified (binary) name, e.g. `java.util.Map$Entry`.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Name without the package prefix.
    pub fn simple_name(&self) -> &str {
        let name = self.name();
        let start = name.rfind(['.', '$']).map_or(0, |i| i + 1);
        &name[start..]
    }

    /// Package part of the name (empty for the default package).
    pub fn package(&self) -> &str {
        self.name().rfind('.').map_or("", |i| &self.name()[..i])
    }

    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    pub fn modifiers(&self) -> Modifiers {
        self.0.modifiers
    }

    pub fn is_interface(&self) -> bool {
        self.0.kind == TypeKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.0.kind == TypeKind::Enum
    }

    /// Interfaces and abstract classes cannot be instantiated.
    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.0.modifiers.is_abstract()
    }

    pub fn is_final(&self) -> bool {
        self.0.modifiers.is_final()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable description of a resolved type usage.
///
/// Equality is structural: name, category and dimensions. The handle is
/// carried along but does not take part in comparisons.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    handle: TypeHandle,
    category: ElementCategory,
    dimensions: u32,
}

impl ClassDefinition {
    /// Definition of a non-array type.
    pub fn new(handle: TypeHandle, category: ElementCategory) -> Self {
        Self {
            handle,
            category,
            dimensions: 0,
        }
    }

    /// Definition of an array whose element type is `handle`.
    ///
    /// `category` should be one of the array categories.
    pub fn array(handle: TypeHandle, category: ElementCategory, dimensions: u32) -> Self {
        Self {
            handle,
            category,
            dimensions,
        }
    }

    /// Fully-qualified name of the (element) type.
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }

    pub fn category(&self) -> ElementCategory {
        self.category
    }

    /// Array dimension count (0 for non-arrays).
    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }
}

impl PartialEq for ClassDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
            && self.category == other.category
            && self.dimensions == other.dimensions
    }
}

impl Eq for ClassDefinition {}

impl Hash for ClassDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.category.hash(state);
        self.dimensions.hash(state);
    }
}

impl fmt::Display for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
