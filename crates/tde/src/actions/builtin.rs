// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in actions.

use super::{ActionInput, ActionOutcome, DataAction};
use crate::editor::{Document, Edit};
use crate::jobs::{JobOutcome, SubtypeSearch};
use crate::model::{Attribute, Element, ElementKind, ModelError, Path, Step};
use crate::types::{PrimitiveKind, TypeError, TypeHandle, OBJECT_TYPE};
use std::sync::Arc;

/// One instance of every built-in action, in menu order.
pub fn builtin_actions() -> Vec<Arc<dyn DataAction>> {
    vec![
        Arc::new(NewInstanceAction),
        Arc::new(CreateArrayAction),
        Arc::new(EditKeyAction),
        Arc::new(ResetAction),
        Arc::new(MoveUpAction),
        Arc::new(MoveDownAction),
        Arc::new(RemoveAction),
    ]
}

// ---------------------------------------------------------------------------
// Target helpers
// ---------------------------------------------------------------------------

/// Owner element and slot index of a `Child` target.
fn slot_of<'d>(doc: &'d Document, target: &Path) -> Option<(&'d Element, usize)> {
    let Some(Step::Child(index)) = target.last() else {
        return None;
    };
    let owner = doc.root().element_at(&target.parent()?)?;
    Some((owner, index))
}

fn split_target(target: &Path) -> Result<(Path, usize), ModelError> {
    match (target.parent(), target.last()) {
        (Some(owner), Some(Step::Child(index))) => Ok((owner, index)),
        _ => Err(ModelError::InvalidPath(target.to_string())),
    }
}

fn attribute<'d>(doc: &'d Document, target: &Path) -> Result<&'d Attribute, ModelError> {
    doc.attribute(target)
        .ok_or_else(|| ModelError::InvalidPath(target.to_string()))
}

/// Store `value` at `target` and show it when it has attributes of its own.
fn assign_and_enter(doc: &mut Document, target: &Path, value: Element) -> Result<(), ModelError> {
    let composite = value.kind() != ElementKind::Value;
    doc.apply(Edit::SetValue {
        path: target.clone(),
        value: Some(value),
    })?;
    if composite {
        doc.step_to(target.clone())?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// Clear a value. Primitive attributes cannot be null.
pub struct ResetAction;

impl DataAction for ResetAction {
    fn label(&self) -> &str {
        "Reset"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        doc.attribute(target)
            .is_some_and(|a| a.is_set() && !a.lower_bound().category().is_primitive())
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        _input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        doc.apply(Edit::Reset {
            path: target.clone(),
        })?;
        Ok(ActionOutcome::Applied)
    }
}

// ---------------------------------------------------------------------------
// Move / remove
// ---------------------------------------------------------------------------

/// Swap a slot with the one before it.
pub struct MoveUpAction;

impl DataAction for MoveUpAction {
    fn label(&self) -> &str {
        "Move up"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        slot_of(doc, target)
            .is_some_and(|(owner, index)| owner.as_indexed().is_some() && index > 0)
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        _input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        let (element, index) = split_target(target)?;
        doc.apply(Edit::MoveUp { element, index })?;
        Ok(ActionOutcome::Applied)
    }
}

/// Swap a slot with the one after it.
pub struct MoveDownAction;

impl DataAction for MoveDownAction {
    fn label(&self) -> &str {
        "Move down"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        slot_of(doc, target).is_some_and(|(owner, index)| {
            owner.as_indexed().is_some_and(|c| index + 1 < c.len())
        })
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        _input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        let (element, index) = split_target(target)?;
        doc.apply(Edit::MoveDown { element, index })?;
        Ok(ActionOutcome::Applied)
    }
}

/// Drop a slot of a list, array or map.
pub struct RemoveAction;

impl DataAction for RemoveAction {
    fn label(&self) -> &str {
        "Remove"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        slot_of(doc, target).is_some_and(|(owner, index)| {
            matches!(owner.kind(), ElementKind::Indexed | ElementKind::Keyed)
                && index < owner.child_count()
        })
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        _input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        let (element, index) = split_target(target)?;
        doc.apply(Edit::Remove { element, index })?;
        Ok(ActionOutcome::Applied)
    }
}

// ---------------------------------------------------------------------------
// Map keys
// ---------------------------------------------------------------------------

/// Show the key of a map entry, creating it first when unset.
pub struct EditKeyAction;

impl DataAction for EditKeyAction {
    fn label(&self) -> &str {
        "Edit key"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        slot_of(doc, target).is_some_and(|(owner, _)| owner.kind() == ElementKind::Keyed)
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        let (owner, index) = split_target(target)?;
        let key_path = owner.key(index);
        let key = attribute(doc, &key_path)?;
        if key.is_set() {
            doc.step_to(key_path)?;
            return Ok(ActionOutcome::Applied);
        }
        match instantiate(doc, &key_path, input)? {
            Some(value) => {
                doc.apply(Edit::SetValue {
                    path: key_path.clone(),
                    value: Some(value),
                })?;
                doc.step_to(key_path)?;
                Ok(ActionOutcome::Applied)
            }
            None => Ok(ActionOutcome::Canceled),
        }
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Build a value for the attribute at `target`.
///
/// Unambiguous types are created directly; otherwise the instantiable
/// subtypes of the lower bound are searched in the background and the input
/// picks one. `None` means canceled.
fn instantiate(
    doc: &Document,
    target: &Path,
    input: &mut dyn ActionInput,
) -> Result<Option<Element>, ModelError> {
    let lower_bound = attribute(doc, target)?.lower_bound().clone();
    let manager = doc.context().manager();
    if let Some(value) = manager.create_default(&lower_bound)? {
        return Ok(Some(value));
    }

    let base = lower_bound.handle().clone();
    let search = SubtypeSearch::new(manager.resolver_arc(), base.clone());
    let job = search
        .spawn(input.cancel_token())
        .map_err(|e| ModelError::Unsupported(format!("cannot start subtype search: {}", e)))?;
    let candidates = match job.wait() {
        JobOutcome::Done(types) => types,
        JobOutcome::Canceled => {
            log::debug!("[actions] subtype search of {} canceled", base);
            return Ok(None);
        }
        JobOutcome::Failed(e) => return Err(ModelError::technical(base.name(), e)),
        JobOutcome::Panicked(message) => return Err(search_panicked(base.name(), message)),
    };
    if candidates.is_empty() {
        return Err(ModelError::NoFactory(base.name().to_string()));
    }
    match input.choose_type(&candidates) {
        Some(ty) => manager.create(&ty).map(Some),
        None => Ok(None),
    }
}

fn search_panicked(type_name: &str, message: String) -> ModelError {
    let reason = format!("subtype search panicked: {}", message);
    ModelError::technical(
        type_name,
        TypeError::Lookup {
            type_name: type_name.to_string(),
            reason,
        },
    )
}

/// Assign a new element, choosing a concrete type when needed.
pub struct NewInstanceAction;

impl DataAction for NewInstanceAction {
    fn label(&self) -> &str {
        "New instance"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        doc.attribute(target)
            .is_some_and(|a| !a.lower_bound().category().is_primitive())
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        match instantiate(doc, target, input)? {
            Some(value) => {
                assign_and_enter(doc, target, value)?;
                Ok(ActionOutcome::Applied)
            }
            None => Ok(ActionOutcome::Canceled),
        }
    }
}

/// Store a new array in an `Object` attribute.
pub struct CreateArrayAction;

impl DataAction for CreateArrayAction {
    fn label(&self) -> &str {
        "Create array"
    }

    fn is_enabled(&self, doc: &Document, target: &Path) -> bool {
        doc.attribute(target).is_some_and(|a| {
            let bound = a.lower_bound();
            bound.dimensions() == 0 && bound.name() == OBJECT_TYPE
        })
    }

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        let Some(dimensions) = input.dimensions() else {
            return Ok(ActionOutcome::Canceled);
        };
        if dimensions == 0 {
            return Err(ModelError::InvalidDimensions(dimensions));
        }

        let manager = doc.context().manager();
        let object = manager.object_definition()?.handle().clone();
        let search = SubtypeSearch::new(manager.resolver_arc(), object).with_abstract(true);
        let candidates = match search
            .spawn(input.cancel_token())
            .map_err(|e| ModelError::Unsupported(format!("cannot start subtype search: {}", e)))?
            .wait()
        {
            JobOutcome::Done(types) => types,
            JobOutcome::Canceled => return Ok(ActionOutcome::Canceled),
            JobOutcome::Failed(e) => return Err(ModelError::technical(OBJECT_TYPE, e)),
            JobOutcome::Panicked(message) => return Err(search_panicked(OBJECT_TYPE, message)),
        };
        let Some(component) = input.choose_type(&candidates) else {
            return Ok(ActionOutcome::Canceled);
        };
        let primitive = is_wrapper(&component) && input.primitive_component(&component);
        let array = manager.create_array(&component, primitive, dimensions)?;
        assign_and_enter(doc, target, array)?;
        Ok(ActionOutcome::Applied)
    }
}

fn is_wrapper(ty: &TypeHandle) -> bool {
    PrimitiveKind::from_wrapper(ty.name()).is_some()
}
