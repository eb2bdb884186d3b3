// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attributes: typed slots of structural elements.

use super::Element;
use crate::types::ClassDefinition;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Lifecycle state of an attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AttributeState {
    /// Present in the type and, after a load, in the file.
    #[default]
    Defined,
    /// Introduced after the data was written: a field the file did not
    /// have, or a slot added by the user.
    Added,
}

/// Validation metadata attached to an attribute.
///
/// The model never interprets constraints; it only carries them.
pub trait AttributeConstraint: fmt::Debug + Send + Sync {
    /// Short identifier, e.g. the annotation name.
    fn name(&self) -> &str;

    /// Human-readable description for the editor.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

/// Shared handle to an [`AttributeConstraint`].
#[derive(Debug, Clone)]
pub struct Constraint(Arc<dyn AttributeConstraint>);

impl Constraint {
    pub fn new(constraint: impl AttributeConstraint + 'static) -> Self {
        Self(Arc::new(constraint))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn get(&self) -> &dyn AttributeConstraint {
        self.0.as_ref()
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.name() == other.name() && self.describe() == other.describe())
    }
}

/// A named or positional slot holding an optional typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    declaring_type: String,
    lower_bound: ClassDefinition,
    value: Option<Box<Element>>,
    state: AttributeState,
    constraints: Vec<Constraint>,
    key: Option<Box<Attribute>>,
}

impl Attribute {
    /// Field attribute of a structure.
    pub fn new(
        name: impl Into<String>,
        declaring_type: impl Into<String>,
        lower_bound: ClassDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            lower_bound,
            value: None,
            state: AttributeState::Defined,
            constraints: Vec::new(),
            key: None,
        }
    }

    /// Slot `index` of an indexed collection.
    pub fn positional(index: usize, lower_bound: ClassDefinition) -> Self {
        Self::new(index.to_string(), "", lower_bound)
    }

    /// Slot of a set-like collection.
    pub fn unnamed(lower_bound: ClassDefinition) -> Self {
        Self::new("", "", lower_bound)
    }

    /// Map entry: a value slot carrying a nested key slot.
    pub fn map_entry(key_bound: ClassDefinition, value_bound: ClassDefinition) -> Self {
        let mut entry = Self::new("", "", value_bound);
        entry.key = Some(Box::new(Self::new("key", "", key_bound)));
        entry
    }

    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_state(mut self, state: AttributeState) -> Self {
        self.state = state;
        self
    }

    /// Display name. Map entries are named after their key.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.key {
            Some(key) => Cow::Owned(key.value_label()),
            None => Cow::Borrowed(&self.name),
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    /// Name of the declaring class; empty for synthetic slots.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn lower_bound(&self) -> &ClassDefinition {
        &self.lower_bound
    }

    pub fn value(&self) -> Option<&Element> {
        self.value.as_deref()
    }

    pub fn value_mut(&mut self) -> Option<&mut Element> {
        self.value.as_deref_mut()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Replace the value, returning the previous one.
    pub fn set_value(&mut self, value: Option<Element>) -> Option<Element> {
        std::mem::replace(&mut self.value, value.map(Box::new)).map(|b| *b)
    }

    pub fn state(&self) -> AttributeState {
        self.state
    }

    /// Set the state; returns whether it changed.
    pub fn set_state(&mut self, state: AttributeState) -> bool {
        let changed = self.state != state;
        self.state = state;
        changed
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Key slot of a map entry.
    pub fn key(&self) -> Option<&Attribute> {
        self.key.as_deref()
    }

    pub fn key_mut(&mut self) -> Option<&mut Attribute> {
        self.key.as_deref_mut()
    }

    /// Short text for the current value: the rendered scalar for leaves,
    /// the type name for composite values, `null` when unset.
    pub fn value_label(&self) -> String {
        match self.value() {
            None => "null".to_string(),
            Some(Element::Value(v)) => v.value().render(),
            Some(other) => other.ty().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueElement;
    use crate::types::{ElementCategory, PrimitiveKind, TypeHandle};

    #[derive(Debug)]
    struct NotNull;

    impl AttributeConstraint for NotNull {
        fn name(&self) -> &str {
            "NotNull"
        }
    }

    fn string_def() -> ClassDefinition {
        ClassDefinition::new(TypeHandle::class("java.lang.String"), ElementCategory::Value)
    }

    #[test]
    fn test_set_value_returns_previous() {
        let mut attr = Attribute::new("count", "com.acme.Foo", PrimitiveKind::Int.definition());
        assert!(!attr.is_set());
        let value = Element::Value(ValueElement::primitive(PrimitiveKind::Int));
        assert!(attr.set_value(Some(value)).is_none());
        let previous = attr.set_value(None);
        assert!(matches!(previous, Some(Element::Value(_))));
        assert!(!attr.is_set());
    }

    #[test]
    fn test_map_entry_named_after_key() {
        let mut entry = Attribute::map_entry(string_def(), string_def());
        assert_eq!(entry.name(), "null");
        let mut key = ValueElement::text(string_def());
        key.set("alpha".into()).unwrap();
        entry.key_mut().unwrap().set_value(Some(Element::Value(key)));
        assert_eq!(entry.name(), "alpha");
    }

    #[test]
    fn test_state_and_constraints() {
        let mut attr = Attribute::new("name", "com.acme.Foo", string_def())
            .with_constraints(vec![Constraint::new(NotNull)]);
        assert_eq!(attr.state(), AttributeState::Defined);
        assert!(attr.set_state(AttributeState::Added));
        assert!(!attr.set_state(AttributeState::Added));
        assert_eq!(attr.constraints()[0].name(), "NotNull");
    }
}
