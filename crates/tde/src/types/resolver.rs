// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The consumed type-system capability.

use super::{FieldInfo, TypeError, TypeHandle, OBJECT_TYPE};
use std::collections::HashSet;

/// Cancellation and progress contract for long-running lookups.
pub trait Monitor: Send + Sync {
    /// Polled between units of work; `true` aborts the operation.
    fn is_canceled(&self) -> bool;

    /// Report `units` of completed work.
    fn worked(&self, _units: u32) {}
}

/// Monitor that is never canceled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullMonitor;

impl Monitor for NullMonitor {
    fn is_canceled(&self) -> bool {
        false
    }
}

/// Host type system as seen by the element model.
///
/// Implementations must be safe to share between the owning thread and
/// background workers.
pub trait TypeResolver: Send + Sync {
    /// Resolve a fully-qualified (binary) name.
    fn resolve_type(&self, name: &str) -> Result<Option<TypeHandle>, TypeError>;

    /// Declared fields of `ty`, static ones included, in declaration order.
    fn fields_of(&self, ty: &TypeHandle) -> Result<Vec<FieldInfo>, TypeError>;

    /// Direct superclass (`None` for `java.lang.Object` and interfaces).
    fn superclass_of(&self, ty: &TypeHandle) -> Result<Option<TypeHandle>, TypeError>;

    /// Directly implemented or extended interfaces, in declaration order.
    fn interfaces_of(&self, ty: &TypeHandle) -> Result<Vec<TypeHandle>, TypeError>;

    /// `ty` and every known type assignable to it.
    fn subtypes_of(
        &self,
        ty: &TypeHandle,
        monitor: &dyn Monitor,
    ) -> Result<Vec<TypeHandle>, TypeError>;

    /// Constant names of an enum type, in declaration order.
    fn enum_constants(&self, ty: &TypeHandle) -> Result<Vec<String>, TypeError>;

    /// Direct supertypes: superclass first, then interfaces.
    fn supertypes_of(&self, ty: &TypeHandle) -> Result<Vec<TypeHandle>, TypeError> {
        let mut supers: Vec<TypeHandle> = self.superclass_of(ty)?.into_iter().collect();
        supers.extend(self.interfaces_of(ty)?);
        Ok(supers)
    }

    /// Resolve a name as written inside `declaring`.
    ///
    /// Binary names resolve directly; simple source names are looked up
    /// relative to the declaring type by implementations that know imports.
    fn qualify(
        &self,
        _declaring: &TypeHandle,
        name: &str,
    ) -> Result<Option<TypeHandle>, TypeError> {
        self.resolve_type(name)
    }
}

/// Breadth-first walk over `ty` and its ancestors, one level per item.
///
/// Level 0 is `ty` itself. Each type appears once, at its shallowest depth,
/// in the order the resolver reports supertypes. For interfaces,
/// `java.lang.Object` is appended as a last level since interface
/// hierarchies do not report it.
pub fn ancestors_by_level<'a>(resolver: &'a dyn TypeResolver, ty: &TypeHandle) -> LevelWalk<'a> {
    LevelWalk {
        resolver,
        root: Some(ty.clone()),
        inject_object: ty.is_interface(),
        last: Vec::new(),
        visited: HashSet::new(),
    }
}

/// Iterator returned by [`ancestors_by_level`].
pub struct LevelWalk<'a> {
    resolver: &'a dyn TypeResolver,
    root: Option<TypeHandle>,
    inject_object: bool,
    last: Vec<TypeHandle>,
    visited: HashSet<String>,
}

impl LevelWalk<'_> {
    fn object_level(&mut self) -> Option<Result<Vec<TypeHandle>, TypeError>> {
        if !self.inject_object || self.visited.contains(OBJECT_TYPE) {
            return None;
        }
        self.inject_object = false;
        self.visited.insert(OBJECT_TYPE.to_string());
        let object = match self.resolver.resolve_type(OBJECT_TYPE) {
            Ok(found) => found.unwrap_or_else(|| TypeHandle::class(OBJECT_TYPE)),
            Err(e) => return Some(Err(e)),
        };
        Some(Ok(vec![object]))
    }
}

impl Iterator for LevelWalk<'_> {
    type Item = Result<Vec<TypeHandle>, TypeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.visited.insert(root.name().to_string());
            self.last = vec![root];
            return Some(Ok(self.last.clone()));
        }

        let mut level = Vec::new();
        for ty in std::mem::take(&mut self.last) {
            let supers = match self.resolver.supertypes_of(&ty) {
                Ok(supers) => supers,
                Err(e) => {
                    self.inject_object = false;
                    return Some(Err(e));
                }
            };
            for s in supers {
                if self.visited.insert(s.name().to_string()) {
                    level.push(s);
                }
            }
        }

        if level.is_empty() {
            return self.object_level();
        }
        self.last = level.clone();
        Some(Ok(level))
    }
}

/// Check whether `sub` is `sup` or one of its descendants.
pub fn is_subtype(
    resolver: &dyn TypeResolver,
    sub: &TypeHandle,
    sup: &TypeHandle,
) -> Result<bool, TypeError> {
    if sup.name() == OBJECT_TYPE {
        return Ok(true);
    }
    for level in ancestors_by_level(resolver, sub) {
        if level?.iter().any(|t| t == sup) {
            return Ok(true);
        }
    }
    Ok(false)
}
