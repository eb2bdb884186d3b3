// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element factories.

use super::ElementManager;
use crate::model::{
    BagCollection, Element, IndexedCollection, KeyedCollection, ModelError, ValueElement,
};
use crate::types::{ClassDefinition, ElementCategory, PrimitiveKind, TypeHandle};

/// Builds the element for a type.
///
/// Factories receive the manager so composite shapes can resolve and
/// classify the types they reference.
pub trait ElementFactory: Send + Sync {
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError>;
}

impl<F> ElementFactory for F
where
    F: Fn(&TypeHandle, &ElementManager) -> Result<Element, ModelError> + Send + Sync,
{
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError> {
        self(ty, manager)
    }
}

fn value_def(ty: &TypeHandle) -> ClassDefinition {
    ClassDefinition::new(ty.clone(), ElementCategory::Value)
}

/// `String`, `StringBuilder`, `StringBuffer` and other string-constructed types.
pub struct TextFactory;

impl ElementFactory for TextFactory {
    fn create(&self, ty: &TypeHandle, _manager: &ElementManager) -> Result<Element, ModelError> {
        Ok(ValueElement::text(value_def(ty)).into())
    }
}

/// Types that round-trip through their string form.
pub struct ParsedFactory;

impl ElementFactory for ParsedFactory {
    fn create(&self, ty: &TypeHandle, _manager: &ElementManager) -> Result<Element, ModelError> {
        Ok(ValueElement::parsed(value_def(ty)).into())
    }
}

/// The eight wrapper classes.
pub struct WrapperFactory;

impl ElementFactory for WrapperFactory {
    fn create(&self, ty: &TypeHandle, _manager: &ElementManager) -> Result<Element, ModelError> {
        let kind = PrimitiveKind::from_wrapper(ty.name())
            .ok_or_else(|| ModelError::Unsupported(format!("{} is not a wrapper type", ty)))?;
        Ok(ValueElement::wrapper(value_def(ty), kind).into())
    }
}

/// `java.util.Date`.
pub struct DateFactory;

impl ElementFactory for DateFactory {
    fn create(&self, ty: &TypeHandle, _manager: &ElementManager) -> Result<Element, ModelError> {
        Ok(ValueElement::date(value_def(ty)).into())
    }
}

/// Enum types; the constants come from the resolver.
pub struct EnumFactory;

impl ElementFactory for EnumFactory {
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError> {
        let constants = manager
            .resolver()
            .enum_constants(ty)
            .map_err(|e| ModelError::technical(ty.name(), e))?;
        Ok(ValueElement::enumeration(value_def(ty), constants)?.into())
    }
}

/// Lists: indexed slots of `java.lang.Object`.
pub struct ListFactory;

impl ElementFactory for ListFactory {
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError> {
        let def = manager.definition_for(ty)?;
        Ok(Element::Indexed(IndexedCollection::new(def, manager.object_definition()?)))
    }
}

/// Sets and plain collections: unnamed slots of `java.lang.Object`.
pub struct BagFactory;

impl ElementFactory for BagFactory {
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError> {
        let def = manager.definition_for(ty)?;
        Ok(Element::Bag(BagCollection::new(def, manager.object_definition()?)))
    }
}

/// Maps: entries with `java.lang.Object` keys and values.
pub struct MapFactory;

impl ElementFactory for MapFactory {
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError> {
        let def = manager.definition_for(ty)?;
        let object = manager.object_definition()?;
        Ok(Element::Keyed(KeyedCollection::new(def, object.clone(), object)))
    }
}
