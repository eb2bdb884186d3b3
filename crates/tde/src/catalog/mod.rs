// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory type catalog.
//!
//! [`TypeCatalog`] is a [`HashMap`]-backed [`TypeResolver`] used by the CLI
//! and by tests. It ships with the JDK types the built-in element
//! descriptors bind to and can be extended programmatically or from YAML.
//!
//! # Example
//!
//! ```
//! use tde::catalog::{TypeCatalog, TypeDecl};
//! use tde::types::TypeResolver;
//!
//! let mut catalog = TypeCatalog::with_jdk();
//! catalog.insert(
//!     TypeDecl::class("com.acme.Point")
//!         .field("x", "int")
//!         .field("y", "int"),
//! );
//! let point = catalog.resolve_type("com.acme.Point").unwrap().unwrap();
//! assert_eq!(catalog.fields_of(&point).unwrap().len(), 2);
//! ```

mod jdk;
#[cfg(feature = "catalog-loaders")]
mod yaml;

#[cfg(feature = "catalog-loaders")]
pub use yaml::{CatalogError, YamlCatalogLoader};

use crate::types::{
    is_subtype, FieldInfo, FieldSignature, Modifiers, Monitor, TypeError, TypeHandle,
    TypeKind, TypeResolver, OBJECT_TYPE,
};
use std::collections::HashMap;

const ENUM_TYPE: &str = "java.lang.Enum";

/// Field as declared in a catalog: name, source type text, modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_text: String,
    pub modifiers: Modifiers,
}

/// Declaration of one type.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    handle: TypeHandle,
    superclass: Option<String>,
    interfaces: Vec<String>,
    type_params: Vec<String>,
    fields: Vec<FieldDecl>,
    constants: Vec<String>,
}

impl TypeDecl {
    /// Declare a type with explicit kind and modifiers.
    pub fn new(name: impl Into<String>, kind: TypeKind, modifiers: Modifiers) -> Self {
        Self {
            handle: TypeHandle::new(name, kind, modifiers),
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Concrete class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, Modifiers::NONE)
    }

    /// Abstract class.
    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, Modifiers::ABSTRACT)
    }

    /// Final class.
    pub fn final_class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, Modifiers::FINAL)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface, Modifiers::ABSTRACT)
    }

    /// Enum with the given constants.
    pub fn enumeration<I, S>(name: impl Into<String>, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decl = Self::new(name, TypeKind::Enum, Modifiers::FINAL);
        decl.constants = constants.into_iter().map(Into::into).collect();
        decl
    }

    /// Set the superclass (classes only).
    pub fn extends(mut self, name: impl Into<String>) -> Self {
        self.superclass = Some(name.into());
        self
    }

    /// Add an implemented (or, for interfaces, extended) interface.
    pub fn implements(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(name.into());
        self
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Add an instance field with Java source type text.
    pub fn field(self, name: impl Into<String>, type_text: impl Into<String>) -> Self {
        self.field_with(name, type_text, Modifiers::NONE)
    }

    pub fn static_field(self, name: impl Into<String>, type_text: impl Into<String>) -> Self {
        self.field_with(name, type_text, Modifiers::STATIC)
    }

    pub fn field_with(
        mut self,
        name: impl Into<String>,
        type_text: impl Into<String>,
        modifiers: Modifiers,
    ) -> Self {
        self.fields.push(FieldDecl {
            name: name.into(),
            type_text: type_text.into(),
            modifiers,
        });
        self
    }

    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        self.handle.name()
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

/// [`HashMap`]-backed [`TypeResolver`].
#[derive(Debug, Default, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, TypeDecl>,
    order: Vec<String>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the JDK types used by the built-in
    /// element descriptors.
    #[must_use]
    pub fn with_jdk() -> Self {
        let mut catalog = Self::new();
        for decl in jdk::declarations() {
            catalog.insert(decl);
        }
        catalog
    }

    /// Insert or replace a declaration.
    pub fn insert(&mut self, decl: TypeDecl) {
        let name = decl.name().to_string();
        if self.types.insert(name.clone(), decl).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Type names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn decl(&self, ty: &TypeHandle) -> Result<&TypeDecl, TypeError> {
        self.types
            .get(ty.name())
            .ok_or_else(|| TypeError::NotFound(ty.name().to_string()))
    }

    fn require(&self, name: &str) -> Result<TypeHandle, TypeError> {
        self.types
            .get(name)
            .map(|d| d.handle.clone())
            .ok_or_else(|| TypeError::NotFound(name.to_string()))
    }
}

impl TypeResolver for TypeCatalog {
    fn resolve_type(&self, name: &str) -> Result<Option<TypeHandle>, TypeError> {
        Ok(self.types.get(name).map(|d| d.handle.clone()))
    }

    fn fields_of(&self, ty: &TypeHandle) -> Result<Vec<FieldInfo>, TypeError> {
        let decl = self.decl(ty)?;
        decl.fields
            .iter()
            .map(|f| {
                let signature = FieldSignature::parse(&f.type_text, &decl.type_params)?;
                Ok(FieldInfo::new(f.name.clone(), signature, f.modifiers))
            })
            .collect()
    }

    fn superclass_of(&self, ty: &TypeHandle) -> Result<Option<TypeHandle>, TypeError> {
        let decl = self.decl(ty)?;
        match (&decl.superclass, ty.kind()) {
            (_, TypeKind::Interface) => Ok(None),
            (Some(name), _) => self.require(name).map(Some),
            (None, TypeKind::Enum) if ty.name() != ENUM_TYPE => self.require(ENUM_TYPE).map(Some),
            (None, _) if ty.name() != OBJECT_TYPE => self.resolve_type(OBJECT_TYPE),
            (None, _) => Ok(None),
        }
    }

    fn interfaces_of(&self, ty: &TypeHandle) -> Result<Vec<TypeHandle>, TypeError> {
        self.decl(ty)?
            .interfaces
            .iter()
            .map(|name| self.require(name))
            .collect()
    }

    fn subtypes_of(
        &self,
        ty: &TypeHandle,
        monitor: &dyn Monitor,
    ) -> Result<Vec<TypeHandle>, TypeError> {
        let mut found = Vec::new();
        for name in &self.order {
            if monitor.is_canceled() {
                log::debug!("[catalog] subtype search for {} canceled", ty);
                break;
            }
            let candidate = &self.types[name].handle;
            if is_subtype(self, candidate, ty)? {
                found.push(candidate.clone());
            }
            monitor.worked(1);
        }
        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }

    fn enum_constants(&self, ty: &TypeHandle) -> Result<Vec<String>, TypeError> {
        Ok(self.decl(ty)?.constants.clone())
    }

    /// Binary names resolve as-is; simple names are tried as a nested type
    /// of `declaring`, then in its package, then in `java.lang`.
    fn qualify(&self, declaring: &TypeHandle, name: &str) -> Result<Option<TypeHandle>, TypeError> {
        if name.contains('.') {
            return self.resolve_type(name);
        }
        let package = declaring.package();
        let mut candidates = vec![format!("{}${}", declaring.name(), name)];
        if !package.is_empty() {
            candidates.push(format!("{}.{}", package, name));
        }
        candidates.push(format!("java.lang.{}", name));
        candidates.push(name.to_string());
        for candidate in candidates {
            if let Some(found) = self.resolve_type(&candidate)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}
