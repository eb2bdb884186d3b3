// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element model: typed, mutable trees describing one instance of a type.
//!
//! A tree is made of [`Element`]s. Composite elements own ordered
//! [`Attribute`]s; each attribute has a declared lower bound and an optional
//! value element. Leaves are [`ValueElement`]s whose text form is handled by
//! a [`LeafCodec`] looked up by [`LeafKind::codec_key`].
//!
//! # Features
//!
//! - Closed set of node kinds ([`ElementKind`]) with open leaf kinds
//! - Attribute lifecycle ([`AttributeState`]) and opaque [`Constraint`]s
//! - Path addressing ([`Path`]) for edits and navigation
//! - Polled change log ([`ChangeLog`]) instead of listeners
//!
//! # Example
//!
//! ```
//! use tde::model::{Element, IndexedCollection, ValueElement};
//! use tde::types::{ClassDefinition, ElementCategory, PrimitiveKind};
//!
//! let int = PrimitiveKind::Int;
//! let ty = ClassDefinition::array(int.wrapper_handle(), ElementCategory::PrimitiveArray, 1);
//! let mut array = Element::Indexed(IndexedCollection::new(ty, int.definition()));
//! let slot = array.push_slot().unwrap();
//! array.child_mut(slot).unwrap().set_value(Some(ValueElement::primitive(int).into()));
//! assert_eq!(array.child_count(), 1);
//! ```

mod attribute;
mod element;
mod error;
mod events;
mod leaf;
mod path;
mod value;

pub use attribute::{Attribute, AttributeConstraint, AttributeState, Constraint};
pub use element::{
    BagCollection, Element, ElementKind, IndexedCollection, KeyedCollection, StructureElement,
};
pub use error::ModelError;
pub use events::{ChangeLog, ModelEvent, Sequenced};
pub use leaf::{DateCodec, EnumCodec, LeafCodec, LeafCodecs, PrimitiveCodec, TextCodec};
pub use path::{Path, Step};
pub use value::{LeafKind, ValueElement, DATE_FORMAT};
