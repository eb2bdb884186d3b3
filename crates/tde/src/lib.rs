// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # TDE - Test Data Editor core
//!
//! Builds editable, typed data trees for Java class shapes and persists them
//! as XML, so test fixtures can be written without code.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tde::catalog::{TypeCatalog, TypeDecl};
//! use tde::context::{AppContext, BuiltinComponents};
//!
//! let mut catalog = TypeCatalog::with_jdk();
//! catalog.insert(TypeDecl::class("com.acme.Point").field("x", "int").field("label", "String"));
//!
//! let ctx = AppContext::initialize(Arc::new(catalog), &BuiltinComponents);
//! let point = ctx.manager().create_by_name("com.acme.Point").unwrap();
//! let xml = ctx.marshaller().to_xml(&point).unwrap();
//! assert!(xml.contains("<x>0</x>"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------+
//! |  editor::Document  (navigation, edits, change log, rows)      |
//! |  actions::ActionManager          jobs (cancelable searches)   |
//! +---------------------------------------------------------------+
//! |  xml::Marshaller   (construct-then-fill converters per kind)  |
//! +---------------------------------------------------------------+
//! |  manager::ElementManager  (factories, categories, extenders)  |
//! |  manager::build_structure (field walker)                      |
//! +---------------------------------------------------------------+
//! |  model  (Element tree, Attribute, ValueElement, LeafCodecs)   |
//! +---------------------------------------------------------------+
//! |  types::TypeResolver  <-  catalog::TypeCatalog (YAML)         |
//! +---------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`types`] - Type handles, categories, signatures, the resolver trait
//! - [`catalog`] - In-memory resolver with JDK types and a YAML loader
//! - [`model`] - The element tree
//! - [`manager`] - Factory/category/extender registry and structure walker
//! - [`xml`] - Data file encoding and decoding
//! - [`editor`] - Document model and input validators
//! - [`actions`] - Context actions on attributes
//! - [`jobs`] - Background work with cancellation
//! - [`context`] - Component registry and application context

/// Compile-time configurable trace logging.
pub mod logging;

/// Context actions on attributes.
pub mod actions;
/// In-memory type catalog.
pub mod catalog;
/// Component registry and application context.
pub mod context;
/// Document model and input validators.
pub mod editor;
/// Background jobs with cancellation.
pub mod jobs;
/// Element factory registry and structure walker.
pub mod manager;
/// Element tree.
pub mod model;
/// Type model and resolver interface.
pub mod types;
/// XML data files.
pub mod xml;

pub use context::{AppContext, BuiltinComponents, ComponentRegistry};
pub use editor::{Document, Edit};
pub use manager::ElementManager;
pub use model::{Attribute, AttributeState, Element, ModelError, ValueElement};
pub use types::{ClassDefinition, ElementCategory, TypeError, TypeHandle, TypeResolver};
pub use xml::{ConversionError, Marshaller};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
