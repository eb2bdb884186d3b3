// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element factory registry and manager.
//!
//! [`ElementManager`] maps types to factories, categories and extenders.
//! Each mapping is either *exact* (one type) or *supertype* (a type and all
//! its descendants). Lookups try the exact binding, then walk the ancestors
//! breadth-first; within one level the earliest registration wins.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tde::catalog::{TypeCatalog, TypeDecl};
//! use tde::manager::ElementManager;
//! use tde::model::Element;
//! use tde::types::ElementCategory;
//!
//! let mut catalog = TypeCatalog::with_jdk();
//! catalog.insert(TypeDecl::class("com.acme.Point").field("x", "int"));
//! let manager = ElementManager::with_builtins(Arc::new(catalog));
//!
//! let point = manager.resolve("com.acme.Point").unwrap();
//! assert_eq!(manager.get_type_category(&point).unwrap(), ElementCategory::Structure);
//! let element = manager.create(&point).unwrap();
//! assert!(matches!(element, Element::Structure(_)));
//! ```

mod bindings;
mod constraints;
mod descriptors;
mod extender;
mod factory;
mod walker;

pub use constraints::{ConstraintAnalyzer, ConstraintManager};
pub use descriptors::{BaseDescriptor, CollectionDescriptor, ElementDescriptor};
pub use extender::{ArrayExtender, CollectionExtender, Extender};
pub use factory::{
    BagFactory, DateFactory, ElementFactory, EnumFactory, ListFactory, MapFactory, ParsedFactory,
    TextFactory, WrapperFactory,
};
pub use walker::{build_structure, StructureFactory};

use crate::model::{Element, IndexedCollection, ModelError, ValueElement};
use crate::types::{
    is_subtype, ClassDefinition, ElementCategory, PrimitiveKind, TypeHandle, TypeResolver,
    OBJECT_TYPE,
};
use bindings::Bindings;
use std::fmt;
use std::sync::Arc;

/// Registry of factories, categories and extenders over a type resolver.
///
/// Populated once, then shared read-only (see [`AppContext`]).
///
/// [`AppContext`]: crate::context::AppContext
#[derive(Clone)]
pub struct ElementManager {
    resolver: Arc<dyn TypeResolver>,
    factories: Bindings<Arc<dyn ElementFactory>>,
    categories: Bindings<ElementCategory>,
    extenders: Bindings<Arc<dyn Extender>>,
    constraints: ConstraintManager,
}

impl ElementManager {
    /// Manager without any registration.
    pub fn new(resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            resolver,
            factories: Bindings::new(),
            categories: Bindings::new(),
            extenders: Bindings::new(),
            constraints: ConstraintManager::new(),
        }
    }

    /// Manager with the base and collection descriptors registered.
    pub fn with_builtins(resolver: Arc<dyn TypeResolver>) -> Self {
        let mut manager = Self::new(resolver);
        manager.register_descriptor(&BaseDescriptor);
        manager.register_descriptor(&CollectionDescriptor);
        manager
    }

    pub fn register_descriptor(&mut self, descriptor: &dyn ElementDescriptor) {
        descriptor.register(self);
        log::debug!("[manager] registered descriptor '{}'", descriptor.name());
    }

    /// Bind `factory` to exactly the type `name`.
    pub fn register_type_factory(&mut self, name: &str, factory: Arc<dyn ElementFactory>) {
        self.factories.bind_exact(name, factory);
    }

    /// Bind `factory` to `name` and its descendants.
    pub fn register_supertype_factory(&mut self, name: &str, factory: Arc<dyn ElementFactory>) {
        self.factories.bind_supertype(name, factory);
    }

    pub fn register_type_category(&mut self, name: &str, category: ElementCategory) {
        self.categories.bind_exact(name, category);
    }

    pub fn register_supertype_category(&mut self, name: &str, category: ElementCategory) {
        self.categories.bind_supertype(name, category);
    }

    pub fn register_extender(&mut self, name: &str, extender: Arc<dyn Extender>) {
        self.extenders.bind_exact(name, extender);
    }

    pub fn register_supertype_extender(&mut self, name: &str, extender: Arc<dyn Extender>) {
        self.extenders.bind_supertype(name, extender);
    }

    pub fn constraints(&self) -> &ConstraintManager {
        &self.constraints
    }

    pub fn constraints_mut(&mut self) -> &mut ConstraintManager {
        &mut self.constraints
    }

    pub fn resolver(&self) -> &dyn TypeResolver {
        self.resolver.as_ref()
    }

    /// Shared handle to the resolver, for background jobs.
    pub fn resolver_arc(&self) -> Arc<dyn TypeResolver> {
        self.resolver.clone()
    }

    /// Resolve a fully-qualified name or fail with [`ModelError::TypeNotFound`].
    pub fn resolve(&self, name: &str) -> Result<TypeHandle, ModelError> {
        self.resolver
            .resolve_type(name)
            .map_err(|e| ModelError::technical(name, e))?
            .ok_or_else(|| ModelError::TypeNotFound(name.to_string()))
    }

    /// Build the element for `ty`.
    ///
    /// An exact factory always applies, even to abstract types. Otherwise
    /// abstract types are rejected and the nearest supertype factory is used.
    pub fn create(&self, ty: &TypeHandle) -> Result<Element, ModelError> {
        if let Some(factory) = self.factories.exact(ty.name()) {
            return factory.create(ty, self);
        }
        if ty.is_abstract() {
            return Err(ModelError::AbstractType(ty.name().to_string()));
        }
        let factory = self
            .factories
            .lookup(self.resolver(), ty)
            .map_err(|e| ModelError::technical(ty.name(), e))?
            .ok_or_else(|| ModelError::NoFactory(ty.name().to_string()))?;
        factory.create(ty, self)
    }

    /// Resolve `name` and build its element.
    pub fn create_by_name(&self, name: &str) -> Result<Element, ModelError> {
        let ty = self.resolve(name)?;
        self.create(&ty)
    }

    /// Build an empty array of `ty` with `dimensions` >= 1.
    ///
    /// With `primitive`, `ty` must be a wrapper class and the slots hold
    /// primitives. The slot type of a multi-dimensional array is the array
    /// type with one dimension less.
    pub fn create_array(
        &self,
        ty: &TypeHandle,
        primitive: bool,
        dimensions: u32,
    ) -> Result<Element, ModelError> {
        let def = self.array_definition(ty, primitive, dimensions)?;
        let value_type = match (dimensions, primitive) {
            (1, true) => primitive_kind(ty)?.definition(),
            (1, false) => self.definition_for(ty)?,
            _ => ClassDefinition::array(ty.clone(), def.category(), dimensions - 1),
        };
        Ok(Element::Indexed(IndexedCollection::new(def, value_type)))
    }

    /// Value for a slot declared as `def` when no type choice is needed:
    /// primitives, arrays, enums, final types and types with a dedicated
    /// factory. `None` means a concrete subtype has to be picked.
    pub fn create_default(&self, def: &ClassDefinition) -> Result<Option<Element>, ModelError> {
        if def.category().is_primitive() {
            let kind = primitive_kind(def.handle())?;
            return Ok(Some(ValueElement::primitive(kind).into()));
        }
        if def.is_array() {
            let primitive = def.category() == ElementCategory::PrimitiveArray;
            return self
                .create_array(def.handle(), primitive, def.dimensions())
                .map(Some);
        }
        let ty = def.handle();
        if self.has_dedicated_factory(ty) || ty.is_final() || ty.is_enum() {
            return self.create(ty).map(Some);
        }
        Ok(None)
    }

    /// Append one slot to a collection or array element.
    pub fn extend(&self, element: &mut Element) -> Result<usize, ModelError> {
        if element.ty().is_array() {
            return ArrayExtender.extend(element, self);
        }
        let handle = element.ty().handle().clone();
        let extender = self
            .extenders
            .lookup(self.resolver(), &handle)
            .map_err(|e| ModelError::technical(handle.name(), e))?
            .ok_or_else(|| ModelError::NotExtendable(handle.name().to_string()))?
            .clone();
        extender.extend(element, self)
    }

    /// Category of `ty`; STRUCTURE unless registered otherwise.
    pub fn get_type_category(&self, ty: &TypeHandle) -> Result<ElementCategory, ModelError> {
        let category = self
            .categories
            .lookup(self.resolver(), ty)
            .map_err(|e| ModelError::technical(ty.name(), e))?;
        Ok(category.copied().unwrap_or(ElementCategory::Structure))
    }

    /// True only when a factory is bound to exactly `ty`.
    pub fn has_dedicated_factory(&self, ty: &TypeHandle) -> bool {
        self.factories.exact(ty.name()).is_some()
    }

    /// Non-array definition of `ty` with its category.
    pub fn definition_for(&self, ty: &TypeHandle) -> Result<ClassDefinition, ModelError> {
        Ok(ClassDefinition::new(ty.clone(), self.get_type_category(ty)?))
    }

    /// Array definition of `ty` with `dimensions` >= 1.
    pub fn array_definition(
        &self,
        ty: &TypeHandle,
        primitive: bool,
        dimensions: u32,
    ) -> Result<ClassDefinition, ModelError> {
        if dimensions == 0 {
            return Err(ModelError::InvalidDimensions(dimensions));
        }
        let category = if primitive {
            primitive_kind(ty)?;
            ElementCategory::PrimitiveArray
        } else {
            ElementCategory::ObjectArray
        };
        Ok(ClassDefinition::array(ty.clone(), category, dimensions))
    }

    /// Definition of `java.lang.Object`, the slot type of untyped collections.
    pub fn object_definition(&self) -> Result<ClassDefinition, ModelError> {
        let object = self
            .resolver
            .resolve_type(OBJECT_TYPE)
            .map_err(|e| ModelError::technical(OBJECT_TYPE, e))?
            .unwrap_or_else(|| TypeHandle::class(OBJECT_TYPE));
        self.definition_for(&object)
    }

    /// Whether a value of type `value` may be stored under `lower_bound`.
    pub fn is_assignable(
        &self,
        value: &ClassDefinition,
        lower_bound: &ClassDefinition,
    ) -> Result<bool, ModelError> {
        if value == lower_bound {
            return Ok(true);
        }
        if lower_bound.dimensions() == 0 && lower_bound.name() == OBJECT_TYPE {
            return Ok(!value.category().is_primitive());
        }
        if lower_bound.category().is_primitive() || value.category().is_primitive() {
            return Ok(false);
        }
        if value.dimensions() != lower_bound.dimensions() {
            return Ok(false);
        }
        if lower_bound.category() == ElementCategory::PrimitiveArray
            || value.category() == ElementCategory::PrimitiveArray
        {
            return Ok(
                value.name() == lower_bound.name() && value.category() == lower_bound.category()
            );
        }
        is_subtype(self.resolver(), value.handle(), lower_bound.handle())
            .map_err(|e| ModelError::technical(value.name(), e))
    }

    /// Number of factory, category and extender bindings.
    pub fn binding_count(&self) -> usize {
        self.factories.len() + self.categories.len() + self.extenders.len()
    }
}

fn primitive_kind(ty: &TypeHandle) -> Result<PrimitiveKind, ModelError> {
    PrimitiveKind::from_wrapper(ty.name())
        .ok_or_else(|| ModelError::Unsupported(format!("{} has no primitive counterpart", ty)))
}

impl fmt::Debug for ElementManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementManager")
            .field("factories", &self.factories.len())
            .field("categories", &self.categories.len())
            .field("extenders", &self.extenders.len())
            .field("constraints", &self.constraints)
            .finish()
    }
}
