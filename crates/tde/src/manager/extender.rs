// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Extenders: strategies appending one slot to an open-ended element.

use super::ElementManager;
use crate::model::{Element, ModelError, ValueElement};
use crate::types::PrimitiveKind;

pub trait Extender: Send + Sync {
    /// Append one slot to `element`; returns its index.
    fn extend(&self, element: &mut Element, manager: &ElementManager) -> Result<usize, ModelError>;
}

/// Arrays. Primitive slots start out holding the primitive's default.
pub struct ArrayExtender;

impl Extender for ArrayExtender {
    fn extend(
        &self,
        element: &mut Element,
        _manager: &ElementManager,
    ) -> Result<usize, ModelError> {
        let value_type = match element.as_indexed() {
            Some(array) => array.value_type().clone(),
            None => return Err(ModelError::NotAnArray(element.ty().to_string())),
        };
        let index = element.push_slot()?;
        if value_type.category().is_primitive() {
            let kind = PrimitiveKind::from_wrapper(value_type.name())
                .ok_or_else(|| ModelError::NotAnArray(value_type.to_string()))?;
            if let Some(slot) = element.child_mut(index) {
                slot.set_value(Some(ValueElement::primitive(kind).into()));
            }
        }
        Ok(index)
    }
}

/// Lists, sets and maps: append an unset slot.
pub struct CollectionExtender;

impl Extender for CollectionExtender {
    fn extend(
        &self,
        element: &mut Element,
        _manager: &ElementManager,
    ) -> Result<usize, ModelError> {
        element.push_slot()
    }
}
