// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-name bindings with exact and hierarchy-based lookup.

use crate::types::{ancestors_by_level, TypeError, TypeHandle, TypeResolver};
use std::collections::HashMap;

/// Values bound either to one exact type or to a type and its descendants.
///
/// Lookup order: exact binding of the queried type; then supertype
/// bindings, breadth-first over [`ancestors_by_level`] starting with the
/// queried type itself. Within one level the binding registered first wins.
#[derive(Debug, Clone)]
pub(crate) struct Bindings<T> {
    exact: HashMap<String, T>,
    supertype: HashMap<String, (u64, T)>,
    next_seq: u64,
}

impl<T> Bindings<T> {
    pub(crate) fn new() -> Self {
        Self {
            exact: HashMap::new(),
            supertype: HashMap::new(),
            next_seq: 0,
        }
    }

    pub(crate) fn bind_exact(&mut self, name: impl Into<String>, value: T) {
        self.exact.insert(name.into(), value);
    }

    /// Rebinding a name replaces the value and its registration rank.
    pub(crate) fn bind_supertype(&mut self, name: impl Into<String>, value: T) {
        self.supertype.insert(name.into(), (self.next_seq, value));
        self.next_seq += 1;
    }

    pub(crate) fn exact(&self, name: &str) -> Option<&T> {
        self.exact.get(name)
    }

    /// Exact binding first, then the nearest supertype binding.
    pub(crate) fn lookup(
        &self,
        resolver: &dyn TypeResolver,
        ty: &TypeHandle,
    ) -> Result<Option<&T>, TypeError> {
        if let Some(value) = self.exact(ty.name()) {
            return Ok(Some(value));
        }
        if self.supertype.is_empty() {
            return Ok(None);
        }
        for level in ancestors_by_level(resolver, ty) {
            let nearest = level?
                .iter()
                .filter_map(|t| self.supertype.get(t.name()))
                .min_by_key(|(seq, _)| *seq);
            if let Some((_, value)) = nearest {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    pub(crate) fn len(&self) -> usize {
        self.exact.len() + self.supertype.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TypeCatalog, TypeDecl};

    fn catalog() -> TypeCatalog {
        let mut c = TypeCatalog::with_jdk();
        c.insert(TypeDecl::interface("t.Left"));
        c.insert(TypeDecl::interface("t.Right"));
        c.insert(TypeDecl::class("t.Both").implements("t.Right").implements("t.Left"));
        c.insert(TypeDecl::class("t.Child").extends("t.Both"));
        c
    }

    fn handle(c: &TypeCatalog, name: &str) -> TypeHandle {
        c.resolve_type(name).unwrap().unwrap()
    }

    #[test]
    fn test_exact_beats_supertype() {
        let c = catalog();
        let mut b = Bindings::new();
        b.bind_supertype("t.Both", "super");
        b.bind_exact("t.Both", "exact");
        assert_eq!(b.lookup(&c, &handle(&c, "t.Both")).unwrap(), Some(&"exact"));
        assert_eq!(b.lookup(&c, &handle(&c, "t.Child")).unwrap(), Some(&"super"));
    }

    #[test]
    fn test_nearest_level_wins() {
        let c = catalog();
        let mut b = Bindings::new();
        b.bind_supertype("java.lang.Object", "object");
        b.bind_supertype("t.Left", "left");
        // Left is two levels above Child, Object too; Object was registered first
        assert_eq!(b.lookup(&c, &handle(&c, "t.Child")).unwrap(), Some(&"object"));
        b.bind_supertype("t.Both", "both");
        assert_eq!(b.lookup(&c, &handle(&c, "t.Child")).unwrap(), Some(&"both"));
    }

    #[test]
    fn test_same_level_tie_uses_registration_order() {
        let c = catalog();
        let child = handle(&c, "t.Child");

        let mut b = Bindings::new();
        b.bind_supertype("t.Left", "left");
        b.bind_supertype("t.Right", "right");
        assert_eq!(b.lookup(&c, &child).unwrap(), Some(&"left"));

        let mut b = Bindings::new();
        b.bind_supertype("t.Right", "right");
        b.bind_supertype("t.Left", "left");
        assert_eq!(b.lookup(&c, &child).unwrap(), Some(&"right"));
    }

    #[test]
    fn test_interfaces_reach_object() {
        let c = catalog();
        let mut b = Bindings::new();
        b.bind_supertype("java.lang.Object", 1);
        assert_eq!(b.lookup(&c, &handle(&c, "t.Left")).unwrap(), Some(&1));
    }
}
