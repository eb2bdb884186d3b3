// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element tree nodes.

use super::{Attribute, ModelError, Path, Step, ValueElement};
use crate::types::ClassDefinition;

/// Discriminant of [`Element`]; one converter exists per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Structure,
    Indexed,
    Keyed,
    Bag,
    Value,
}

/// A node of the data tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Fixed set of named attributes, one per declared field.
    Structure(StructureElement),
    /// Arrays and lists: dense positional slots.
    Indexed(IndexedCollection),
    /// Maps: entries carrying a key slot.
    Keyed(KeyedCollection),
    /// Sets and plain collections: unnamed slots.
    Bag(BagCollection),
    /// Atomic leaf.
    Value(ValueElement),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Structure(_) => ElementKind::Structure,
            Self::Indexed(_) => ElementKind::Indexed,
            Self::Keyed(_) => ElementKind::Keyed,
            Self::Bag(_) => ElementKind::Bag,
            Self::Value(_) => ElementKind::Value,
        }
    }

    /// Type of the element.
    pub fn ty(&self) -> &ClassDefinition {
        match self {
            Self::Structure(e) => &e.ty,
            Self::Indexed(e) => &e.ty,
            Self::Keyed(e) => &e.ty,
            Self::Bag(e) => &e.ty,
            Self::Value(e) => e.ty(),
        }
    }

    /// Attributes in order; empty for leaves.
    pub fn children(&self) -> &[Attribute] {
        match self {
            Self::Structure(e) => &e.attributes,
            Self::Indexed(e) => &e.attributes,
            Self::Keyed(e) => &e.attributes,
            Self::Bag(e) => &e.attributes,
            Self::Value(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Attribute] {
        match self {
            Self::Structure(e) => &mut e.attributes,
            Self::Indexed(e) => &mut e.attributes,
            Self::Keyed(e) => &mut e.attributes,
            Self::Bag(e) => &mut e.attributes,
            Self::Value(_) => &mut [],
        }
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    pub fn child(&self, index: usize) -> Option<&Attribute> {
        self.children().get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Attribute> {
        self.children_mut().get_mut(index)
    }

    /// Collections can grow; structures and leaves cannot.
    pub fn is_extendable(&self) -> bool {
        matches!(self, Self::Indexed(_) | Self::Keyed(_) | Self::Bag(_))
    }

    pub fn as_structure(&self) -> Option<&StructureElement> {
        match self {
            Self::Structure(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_indexed(&self) -> Option<&IndexedCollection> {
        match self {
            Self::Indexed(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_indexed_mut(&mut self) -> Option<&mut IndexedCollection> {
        match self {
            Self::Indexed(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&KeyedCollection> {
        match self {
            Self::Keyed(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_keyed_mut(&mut self) -> Option<&mut KeyedCollection> {
        match self {
            Self::Keyed(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_bag(&self) -> Option<&BagCollection> {
        match self {
            Self::Bag(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&ValueElement> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut ValueElement> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Append a slot of the collection's value type; returns its index.
    pub fn push_slot(&mut self) -> Result<usize, ModelError> {
        match self {
            Self::Indexed(e) => Ok(e.push()),
            Self::Keyed(e) => Ok(e.push()),
            Self::Bag(e) => Ok(e.push()),
            other => Err(ModelError::NotExtendable(other.ty().to_string())),
        }
    }

    /// Remove slot `index` of a collection.
    pub fn remove_slot(&mut self, index: usize) -> Result<Attribute, ModelError> {
        match self {
            Self::Indexed(e) => e.remove(index),
            Self::Keyed(e) => e.remove(index),
            Self::Bag(e) => e.remove(index),
            other => Err(ModelError::Unsupported(format!(
                "cannot remove attributes of {}",
                other.ty()
            ))),
        }
    }

    /// Attribute addressed by `path`, relative to this element.
    pub fn attribute_at(&self, path: &Path) -> Option<&Attribute> {
        let (last, parent) = path.steps().split_last()?;
        let owner = self.descend(parent)?;
        step_attribute(owner, *last)
    }

    pub fn attribute_at_mut(&mut self, path: &Path) -> Option<&mut Attribute> {
        let (last, parent) = path.steps().split_last()?;
        let owner = self.descend_mut(parent)?;
        step_attribute_mut(owner, *last)
    }

    /// Element reached by following `path`; the empty path is `self`.
    pub fn element_at(&self, path: &Path) -> Option<&Element> {
        self.descend(path.steps())
    }

    pub fn element_at_mut(&mut self, path: &Path) -> Option<&mut Element> {
        self.descend_mut(path.steps())
    }

    fn descend(&self, steps: &[Step]) -> Option<&Element> {
        let mut current = self;
        for step in steps {
            current = step_attribute(current, *step)?.value()?;
        }
        Some(current)
    }

    fn descend_mut(&mut self, steps: &[Step]) -> Option<&mut Element> {
        let mut current = self;
        for step in steps {
            current = step_attribute_mut(current, *step)?.value_mut()?;
        }
        Some(current)
    }
}

fn step_attribute(element: &Element, step: Step) -> Option<&Attribute> {
    match step {
        Step::Child(i) => element.child(i),
        Step::Key(i) => element.child(i)?.key(),
    }
}

fn step_attribute_mut(element: &mut Element, step: Step) -> Option<&mut Attribute> {
    match step {
        Step::Child(i) => element.child_mut(i),
        Step::Key(i) => element.child_mut(i)?.key_mut(),
    }
}

impl From<ValueElement> for Element {
    fn from(v: ValueElement) -> Self {
        Self::Value(v)
    }
}

/// Structure: one attribute per declared instance field.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureElement {
    ty: ClassDefinition,
    attributes: Vec<Attribute>,
}

impl StructureElement {
    pub fn new(ty: ClassDefinition, attributes: Vec<Attribute>) -> Self {
        Self { ty, attributes }
    }

    pub fn ty(&self) -> &ClassDefinition {
        &self.ty
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Index of the first attribute named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.index_of(name).map(|i| &self.attributes[i])
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        let index = self.index_of(name)?;
        self.attributes.get_mut(index)
    }
}

/// Array or list: slots keyed `0..n-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedCollection {
    ty: ClassDefinition,
    value_type: ClassDefinition,
    attributes: Vec<Attribute>,
}

impl IndexedCollection {
    pub fn new(ty: ClassDefinition, value_type: ClassDefinition) -> Self {
        Self {
            ty,
            value_type,
            attributes: Vec::new(),
        }
    }

    pub fn ty(&self) -> &ClassDefinition {
        &self.ty
    }

    /// Lower bound of every slot.
    pub fn value_type(&self) -> &ClassDefinition {
        &self.value_type
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Append an unset slot; returns its index.
    pub fn push(&mut self) -> usize {
        let index = self.attributes.len();
        self.attributes.push(Attribute::positional(index, self.value_type.clone()));
        index
    }

    /// Remove slot `index` and renumber the following ones.
    pub fn remove(&mut self, index: usize) -> Result<Attribute, ModelError> {
        self.check(index)?;
        let removed = self.attributes.remove(index);
        self.reindex(index);
        Ok(removed)
    }

    /// Swap slot `index` with its predecessor; no-op on the first slot.
    pub fn move_up(&mut self, index: usize) -> Result<bool, ModelError> {
        self.check(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap(index - 1, index);
        Ok(true)
    }

    /// Swap slot `index` with its successor; no-op on the last slot.
    pub fn move_down(&mut self, index: usize) -> Result<bool, ModelError> {
        self.check(index)?;
        if index + 1 == self.attributes.len() {
            return Ok(false);
        }
        self.swap(index, index + 1);
        Ok(true)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.attributes.swap(a, b);
        self.attributes[a].set_name(a.to_string());
        self.attributes[b].set_name(b.to_string());
    }

    fn reindex(&mut self, from: usize) {
        for (i, attr) in self.attributes.iter_mut().enumerate().skip(from) {
            attr.set_name(i.to_string());
        }
    }

    fn check(&self, index: usize) -> Result<(), ModelError> {
        if index < self.attributes.len() {
            Ok(())
        } else {
            Err(ModelError::IndexOutOfBounds {
                index,
                length: self.attributes.len(),
            })
        }
    }
}

/// Map: entries with a key slot and a value slot.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedCollection {
    ty: ClassDefinition,
    key_type: ClassDefinition,
    value_type: ClassDefinition,
    attributes: Vec<Attribute>,
}

impl KeyedCollection {
    pub fn new(
        ty: ClassDefinition,
        key_type: ClassDefinition,
        value_type: ClassDefinition,
    ) -> Self {
        Self {
            ty,
            key_type,
            value_type,
            attributes: Vec::new(),
        }
    }

    pub fn ty(&self) -> &ClassDefinition {
        &self.ty
    }

    pub fn key_type(&self) -> &ClassDefinition {
        &self.key_type
    }

    pub fn value_type(&self) -> &ClassDefinition {
        &self.value_type
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Append an entry with unset key and value; returns its index.
    pub fn push(&mut self) -> usize {
        self.attributes.push(Attribute::map_entry(
            self.key_type.clone(),
            self.value_type.clone(),
        ));
        self.attributes.len() - 1
    }

    /// Remove entry `index`. Entries are named by key, so nothing is renumbered.
    pub fn remove(&mut self, index: usize) -> Result<Attribute, ModelError> {
        if index >= self.attributes.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                length: self.attributes.len(),
            });
        }
        Ok(self.attributes.remove(index))
    }
}

/// Set or plain collection: unnamed slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BagCollection {
    ty: ClassDefinition,
    value_type: ClassDefinition,
    attributes: Vec<Attribute>,
}

impl BagCollection {
    pub fn new(ty: ClassDefinition, value_type: ClassDefinition) -> Self {
        Self {
            ty,
            value_type,
            attributes: Vec::new(),
        }
    }

    pub fn ty(&self) -> &ClassDefinition {
        &self.ty
    }

    pub fn value_type(&self) -> &ClassDefinition {
        &self.value_type
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn push(&mut self) -> usize {
        self.attributes.push(Attribute::unnamed(self.value_type.clone()));
        self.attributes.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<Attribute, ModelError> {
        if index >= self.attributes.len() {
            return Err(ModelError::IndexOutOfBounds {
                index,
                length: self.attributes.len(),
            });
        }
        Ok(self.attributes.remove(index))
    }
}
