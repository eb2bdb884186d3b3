// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structure field walker.
//!
//! Builds the attribute list of a structure from the declared instance
//! fields of its type and every superclass, most-derived class first.
//! Primitive fields get their default value right away; every other field
//! only gets its lower bound and stays unset.

use super::{ElementFactory, ElementManager};
use crate::model::{Attribute, Element, ModelError, StructureElement, ValueElement};
use crate::types::{ClassDefinition, ElementCategory, FieldInfo, FieldSignature, TypeHandle};

/// Factory for plain classes, bound to `java.lang.Object` as a supertype.
pub struct StructureFactory;

impl ElementFactory for StructureFactory {
    fn create(&self, ty: &TypeHandle, manager: &ElementManager) -> Result<Element, ModelError> {
        build_structure(manager, ty).map(Element::Structure)
    }
}

/// Walk `ty` and its superclass chain, skipping static fields.
pub fn build_structure(
    manager: &ElementManager,
    ty: &TypeHandle,
) -> Result<StructureElement, ModelError> {
    crate::trace_fn!("build_structure");
    let resolver = manager.resolver();
    let mut attributes = Vec::new();
    let mut current = Some(ty.clone());

    while let Some(declaring) = current {
        let fields = resolver
            .fields_of(&declaring)
            .map_err(|e| ModelError::technical(declaring.name(), e))?;
        for field in fields.iter().filter(|f| !f.is_static()) {
            attributes.push(field_attribute(manager, &declaring, field)?);
        }
        current = resolver
            .superclass_of(&declaring)
            .map_err(|e| ModelError::technical(declaring.name(), e))?;
    }

    log::debug!("[walker] {} -> {} attributes", ty, attributes.len());
    Ok(StructureElement::new(
        ClassDefinition::new(ty.clone(), ElementCategory::Structure),
        attributes,
    ))
}

fn field_attribute(
    manager: &ElementManager,
    declaring: &TypeHandle,
    field: &FieldInfo,
) -> Result<Attribute, ModelError> {
    let constraints = manager.constraints().constraints_for(field, declaring);
    let attribute = match &field.signature {
        FieldSignature::Base(kind) => {
            let mut attr = Attribute::new(&field.name, declaring.name(), kind.definition());
            attr.set_value(Some(ValueElement::primitive(*kind).into()));
            attr
        }
        FieldSignature::Class { name, resolved } => {
            let handle = resolve_class(manager, declaring, name, *resolved)?;
            Attribute::new(&field.name, declaring.name(), manager.definition_for(&handle)?)
        }
        FieldSignature::Array {
            element,
            dimensions,
        } => {
            let (handle, primitive) = match element.as_ref() {
                FieldSignature::Base(kind) => (kind.wrapper_handle(), true),
                FieldSignature::Class { name, resolved } => {
                    (resolve_class(manager, declaring, name, *resolved)?, false)
                }
                other => return Err(unsupported(field, other)),
            };
            let lower_bound = manager.array_definition(&handle, primitive, *dimensions)?;
            Attribute::new(&field.name, declaring.name(), lower_bound)
        }
        other => return Err(unsupported(field, other)),
    };
    Ok(attribute.with_constraints(constraints))
}

/// Binary names resolve directly; source names relative to `declaring`.
fn resolve_class(
    manager: &ElementManager,
    declaring: &TypeHandle,
    name: &str,
    resolved: bool,
) -> Result<TypeHandle, ModelError> {
    let resolver = manager.resolver();
    let found = if resolved {
        resolver.resolve_type(name)
    } else {
        resolver.qualify(declaring, name)
    };
    found
        .map_err(|e| ModelError::technical(declaring.name(), e))?
        .ok_or_else(|| ModelError::TypeNotFound(name.to_string()))
}

fn unsupported(field: &FieldInfo, signature: &FieldSignature) -> ModelError {
    ModelError::UnsupportedSignature {
        field: field.name.clone(),
        signature: signature.to_string(),
    }
}
