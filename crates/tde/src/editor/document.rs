// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Editable document: one element tree, a cursor and a change log.

use crate::context::AppContext;
use crate::model::{
    Attribute, AttributeState, ChangeLog, Element, ModelError, ModelEvent, Path, Sequenced,
};
use crate::types::ClassDefinition;
use crate::xml::ConversionError;
use std::sync::Arc;

/// A change to a document. Every mutation goes through [`Document::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Assign or clear the attribute at `path`.
    SetValue { path: Path, value: Option<Element> },
    /// Parse `text` into the leaf held by the attribute at `path`.
    SetText { path: Path, text: String },
    /// Clear the attribute at `path`.
    Reset { path: Path },
    /// Append a slot, in state ADDED, to the collection at `element`.
    Extend { element: Path },
    /// Remove slot `index` of the collection at `element`.
    Remove { element: Path, index: usize },
    MoveUp { element: Path, index: usize },
    MoveDown { element: Path, index: usize },
    SetState { path: Path, state: AttributeState },
    ReplaceRoot(Element),
}

/// One line of the attribute table of the current element.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Attribute(AttributeRow),
    /// Placeholder for appending a slot to a collection.
    Insert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub path: Path,
    pub name: String,
    pub declared: ClassDefinition,
    pub value: String,
    pub state: AttributeState,
    /// The value is a leaf the user may type into.
    pub editable: bool,
}

/// Element tree under edit.
///
/// Viewers poll [`events_since`](Self::events_since) with the last sequence
/// number they saw instead of registering listeners.
pub struct Document {
    ctx: Arc<AppContext>,
    root: Element,
    current: Path,
    dirty: bool,
    log: ChangeLog,
}

impl Document {
    pub fn new(ctx: Arc<AppContext>, root: Element) -> Self {
        Self {
            ctx,
            root,
            current: Path::root(),
            dirty: false,
            log: ChangeLog::new(),
        }
    }

    /// New document holding a fresh element of `type_name`.
    pub fn create(ctx: Arc<AppContext>, type_name: &str) -> Result<Self, ModelError> {
        let root = ctx.manager().create_by_name(type_name)?;
        let mut doc = Self::new(ctx, root);
        doc.dirty = true;
        Ok(doc)
    }

    pub fn open(
        ctx: Arc<AppContext>,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, ConversionError> {
        let root = ctx.marshaller().read_file(path)?;
        Ok(Self::new(ctx, root))
    }

    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), ConversionError> {
        self.ctx.marshaller().write_file(&self.root, path)?;
        self.dirty = false;
        Ok(())
    }

    pub fn to_xml(&self) -> Result<String, ConversionError> {
        self.ctx.marshaller().to_xml(&self.root)
    }

    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // -----------------------------------------------------------------------
    // Change log
    // -----------------------------------------------------------------------

    /// Events recorded after `seq`, oldest first.
    pub fn events_since(&self, seq: u64) -> &[Sequenced] {
        self.log.since(seq)
    }

    pub fn last_seq(&self) -> u64 {
        self.log.last_seq()
    }

    fn record(&mut self, event: ModelEvent) -> u64 {
        self.log.record(event)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Path of the element shown in the attribute table.
    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn current_element(&self) -> &Element {
        self.root.element_at(&self.current).unwrap_or(&self.root)
    }

    pub fn attribute(&self, path: &Path) -> Option<&Attribute> {
        self.root.attribute_at(path)
    }

    /// Show the value of attribute `index` of the current element.
    pub fn step_into(&mut self, index: usize) -> Result<(), ModelError> {
        self.step_to(self.current.child(index))
    }

    /// Show the key of map entry `index` of the current element.
    pub fn step_into_key(&mut self, index: usize) -> Result<(), ModelError> {
        self.step_to(self.current.key(index))
    }

    /// Show the element at `path`; it must exist.
    pub fn step_to(&mut self, path: Path) -> Result<(), ModelError> {
        if self.root.element_at(&path).is_none() {
            return Err(ModelError::InvalidPath(path.to_string()));
        }
        if path != self.current {
            self.current = path.clone();
            self.record(ModelEvent::CurrentChanged { path });
        }
        Ok(())
    }

    /// Show the element owning the current one; `false` at the root.
    pub fn step_up(&mut self) -> bool {
        match self.current.parent() {
            Some(parent) => {
                self.current = parent.clone();
                self.record(ModelEvent::CurrentChanged { path: parent });
                true
            }
            None => false,
        }
    }

    /// Attribute table of the current element.
    pub fn rows(&self) -> Vec<Row> {
        let element = self.current_element();
        let codecs = self.ctx.codecs();
        let mut rows: Vec<Row> = element
            .children()
            .iter()
            .enumerate()
            .map(|(index, attr)| {
                let leaf = attr.value().and_then(Element::as_value);
                Row::Attribute(AttributeRow {
                    path: self.current.child(index),
                    name: attr.name().into_owned(),
                    declared: attr.lower_bound().clone(),
                    value: match leaf {
                        Some(v) => codecs.render(v),
                        None => attr.value_label(),
                    },
                    state: attr.state(),
                    editable: leaf.is_some_and(|v| codecs.is_editable(v)),
                })
            })
            .collect();
        if element.is_extendable() {
            rows.push(Row::Insert);
        }
        rows
    }

    /// Paths of all attributes in `state`, depth-first.
    pub fn attributes_in_state(&self, state: AttributeState) -> Vec<Path> {
        let mut found = Vec::new();
        collect_in_state(&self.root, &Path::root(), state, &mut found);
        found
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Apply `edit`; returns the sequence number of the last event.
    ///
    /// A failed edit leaves the document unchanged.
    pub fn apply(&mut self, edit: Edit) -> Result<u64, ModelError> {
        let before = self.log.last_seq();
        match edit {
            Edit::SetValue { path, value } => self.set_value(path, value)?,
            Edit::SetText { path, text } => self.set_text(path, &text)?,
            Edit::Reset { path } => self.set_value(path, None)?,
            Edit::Extend { element } => self.extend(element)?,
            Edit::Remove { element, index } => self.remove(element, index)?,
            Edit::MoveUp { element, index } => self.shift(element, index, true)?,
            Edit::MoveDown { element, index } => self.shift(element, index, false)?,
            Edit::SetState { path, state } => self.set_state(path, state)?,
            Edit::ReplaceRoot(root) => {
                self.root = root;
                self.current = Path::root();
                self.record(ModelEvent::RootReplaced);
            }
        }
        if self.log.last_seq() != before {
            self.dirty = true;
        }
        Ok(self.log.last_seq())
    }

    fn attribute_or_err(&self, path: &Path) -> Result<&Attribute, ModelError> {
        self.root
            .attribute_at(path)
            .ok_or_else(|| ModelError::InvalidPath(path.to_string()))
    }

    fn attribute_mut_or_err(&mut self, path: &Path) -> Result<&mut Attribute, ModelError> {
        self.root
            .attribute_at_mut(path)
            .ok_or_else(|| ModelError::InvalidPath(path.to_string()))
    }

    fn element_mut_or_err(&mut self, path: &Path) -> Result<&mut Element, ModelError> {
        self.root
            .element_at_mut(path)
            .ok_or_else(|| ModelError::InvalidPath(path.to_string()))
    }

    fn set_value(&mut self, path: Path, value: Option<Element>) -> Result<(), ModelError> {
        let attr = self.attribute_or_err(&path)?;
        let lower_bound = attr.lower_bound();
        match &value {
            None if lower_bound.category().is_primitive() => {
                return Err(ModelError::NullNotAllowed(attr.name().into_owned()));
            }
            None => {}
            Some(v) => {
                if !self.ctx.manager().is_assignable(v.ty(), lower_bound)? {
                    return Err(ModelError::NotAssignable {
                        value: v.ty().to_string(),
                        lower_bound: lower_bound.to_string(),
                    });
                }
            }
        }
        self.attribute_mut_or_err(&path)?.set_value(value);
        self.record(ModelEvent::ValueChanged { path: path.clone() });
        self.leave_subtree(&path);
        Ok(())
    }

    /// Parse into the leaf at `path`, creating it first when its type is
    /// unambiguous.
    fn set_text(&mut self, path: Path, text: &str) -> Result<(), ModelError> {
        let attr = self.attribute_or_err(&path)?;
        let created = match attr.value() {
            Some(_) => None,
            None => {
                let def = attr.lower_bound();
                let value = self
                    .ctx
                    .manager()
                    .create_default(def)?
                    .ok_or_else(|| ModelError::NoFactory(def.to_string()))?;
                Some(value)
            }
        };
        let ctx = self.ctx.clone();
        let attr = self.attribute_mut_or_err(&path)?;
        let mut value = match created {
            Some(value) => value,
            None => attr.value().cloned().ok_or_else(|| ModelError::InvalidPath(path.to_string()))?,
        };
        let leaf = value
            .as_value_mut()
            .ok_or_else(|| ModelError::Unsupported(format!("{} is not a leaf", path)))?;
        ctx.codecs().parse_into(leaf, text)?;
        attr.set_value(Some(value));
        self.record(ModelEvent::ValueChanged { path });
        Ok(())
    }

    fn extend(&mut self, path: Path) -> Result<(), ModelError> {
        let ctx = self.ctx.clone();
        let element = self.element_mut_or_err(&path)?;
        let index = ctx.manager().extend(element)?;
        if let Some(slot) = element.child_mut(index) {
            slot.set_state(AttributeState::Added);
        }
        self.record(ModelEvent::AttributeAdded {
            element: path,
            index,
        });
        Ok(())
    }

    fn remove(&mut self, path: Path, index: usize) -> Result<(), ModelError> {
        self.element_mut_or_err(&path)?.remove_slot(index)?;
        self.record(ModelEvent::AttributeRemoved {
            element: path.clone(),
            index,
        });
        self.leave_children_of(&path);
        Ok(())
    }

    fn shift(&mut self, path: Path, index: usize, up: bool) -> Result<(), ModelError> {
        let element = self.element_mut_or_err(&path)?;
        let type_name = element.ty().to_string();
        let indexed = element
            .as_indexed_mut()
            .ok_or(ModelError::NotAnArray(type_name))?;
        let moved = if up {
            indexed.move_up(index)?
        } else {
            indexed.move_down(index)?
        };
        if moved {
            let to = if up { index - 1 } else { index + 1 };
            self.record(ModelEvent::AttributeMoved {
                element: path.clone(),
                from: index,
                to,
            });
            self.leave_children_of(&path);
        }
        Ok(())
    }

    fn set_state(&mut self, path: Path, state: AttributeState) -> Result<(), ModelError> {
        if self.attribute_mut_or_err(&path)?.set_state(state) {
            self.record(ModelEvent::StateChanged { path, state });
        }
        Ok(())
    }

    /// The value at `path` was replaced: a cursor inside it moves to its owner.
    fn leave_subtree(&mut self, path: &Path) {
        if self.current.starts_with(path) {
            if let Some(owner) = path.parent() {
                self.current = owner.clone();
                self.record(ModelEvent::CurrentChanged { path: owner });
            }
        }
    }

    /// Slots of `path` were renumbered: a cursor below it moves to it.
    fn leave_children_of(&mut self, path: &Path) {
        if self.current.len() > path.len() && self.current.starts_with(path) {
            self.current = path.clone();
            self.record(ModelEvent::CurrentChanged { path: path.clone() });
        }
    }
}

fn collect_in_state(element: &Element, path: &Path, state: AttributeState, found: &mut Vec<Path>) {
    for (index, attr) in element.children().iter().enumerate() {
        if let Some(key) = attr.key() {
            let key_path = path.key(index);
            if key.state() == state {
                found.push(key_path.clone());
            }
            if let Some(value) = key.value() {
                collect_in_state(value, &key_path, state, found);
            }
        }
        let attr_path = path.child(index);
        if attr.state() == state {
            found.push(attr_path.clone());
        }
        if let Some(value) = attr.value() {
            collect_in_state(value, &attr_path, state, found);
        }
    }
}
