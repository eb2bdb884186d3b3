// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Application context.
//!
//! [`AppContext`] owns every registry the editor needs: the element
//! manager, the action manager, the leaf codecs and the XML alias table.
//! It is populated once from a [`ComponentRegistry`] and then shared
//! read-only through an `Arc`; components receive it at construction.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tde::catalog::TypeCatalog;
//! use tde::{AppContext, BuiltinComponents};
//!
//! let ctx = AppContext::initialize(Arc::new(TypeCatalog::with_jdk()), &BuiltinComponents);
//! assert!(ctx.manager().binding_count() > 0);
//! assert!(!ctx.actions().is_empty());
//! ```

use crate::actions::{builtin_actions, ActionManager, DataAction};
use crate::manager::{
    BaseDescriptor, CollectionDescriptor, ConstraintAnalyzer, ElementDescriptor, ElementManager,
};
use crate::model::{LeafCodec, LeafCodecs};
use crate::types::{TypeResolver, OBJECT_TYPE};
use crate::xml::{AliasTable, Marshaller, WriterOptions};
use std::sync::Arc;

/// An action with the type it is bound to.
#[derive(Clone)]
pub struct ActionEntry {
    /// Qualified type name.
    pub binding: String,
    /// Bind to exactly `binding` instead of `binding` and its descendants.
    pub concrete: bool,
    pub action: Arc<dyn DataAction>,
}

impl ActionEntry {
    pub fn new(binding: impl Into<String>, concrete: bool, action: Arc<dyn DataAction>) -> Self {
        Self {
            binding: binding.into(),
            concrete,
            action,
        }
    }
}

/// Source of pluggable components, enumerated once at startup.
pub trait ComponentRegistry: Send + Sync {
    fn descriptors(&self) -> Vec<Box<dyn ElementDescriptor>> {
        Vec::new()
    }

    fn constraint_analyzers(&self) -> Vec<Arc<dyn ConstraintAnalyzer>> {
        Vec::new()
    }

    fn actions(&self) -> Vec<ActionEntry> {
        Vec::new()
    }

    /// Leaf codecs keyed by [`LeafKind::codec_key`](crate::model::LeafKind::codec_key).
    fn leaf_codecs(&self) -> Vec<(String, Arc<dyn LeafCodec>)> {
        Vec::new()
    }

    /// Extra XML tag aliases as `(alias, type name)`.
    fn aliases(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// The base and collection descriptors and the built-in actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinComponents;

impl ComponentRegistry for BuiltinComponents {
    fn descriptors(&self) -> Vec<Box<dyn ElementDescriptor>> {
        vec![Box::new(BaseDescriptor), Box::new(CollectionDescriptor)]
    }

    fn actions(&self) -> Vec<ActionEntry> {
        builtin_actions()
            .into_iter()
            .map(|action| ActionEntry::new(OBJECT_TYPE, false, action))
            .collect()
    }
}

/// Several registries enumerated in order.
#[derive(Default)]
pub struct Components {
    registries: Vec<Box<dyn ComponentRegistry>>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, registry: impl ComponentRegistry + 'static) -> Self {
        self.registries.push(Box::new(registry));
        self
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

impl ComponentRegistry for Components {
    fn descriptors(&self) -> Vec<Box<dyn ElementDescriptor>> {
        self.registries.iter().flat_map(|r| r.descriptors()).collect()
    }

    fn constraint_analyzers(&self) -> Vec<Arc<dyn ConstraintAnalyzer>> {
        self.registries
            .iter()
            .flat_map(|r| r.constraint_analyzers())
            .collect()
    }

    fn actions(&self) -> Vec<ActionEntry> {
        self.registries.iter().flat_map(|r| r.actions()).collect()
    }

    fn leaf_codecs(&self) -> Vec<(String, Arc<dyn LeafCodec>)> {
        self.registries.iter().flat_map(|r| r.leaf_codecs()).collect()
    }

    fn aliases(&self) -> Vec<(String, String)> {
        self.registries.iter().flat_map(|r| r.aliases()).collect()
    }
}

/// Registries shared by every document of an editor session.
#[derive(Debug, Clone)]
pub struct AppContext {
    manager: ElementManager,
    actions: ActionManager,
    codecs: LeafCodecs,
    aliases: AliasTable,
    writer: WriterOptions,
}

impl AppContext {
    /// Populate all registries from `registry`.
    pub fn initialize(resolver: Arc<dyn TypeResolver>, registry: &dyn ComponentRegistry) -> Self {
        let mut manager = ElementManager::new(resolver);
        for descriptor in registry.descriptors() {
            manager.register_descriptor(descriptor.as_ref());
        }
        for analyzer in registry.constraint_analyzers() {
            manager.constraints_mut().add_analyzer(analyzer);
        }

        let mut actions = ActionManager::new();
        for entry in registry.actions() {
            actions.register(&entry.binding, entry.concrete, entry.action);
        }

        let mut codecs = LeafCodecs::builtin();
        for (key, codec) in registry.leaf_codecs() {
            codecs.register(key, codec);
        }

        let mut aliases = AliasTable::with_defaults();
        for (alias, type_name) in registry.aliases() {
            if let Err(e) = aliases.add(&alias, &type_name) {
                log::warn!("[context] skipping alias '{}': {}", alias, e);
            }
        }

        log::info!(
            "[context] initialized: {} bindings, {} actions, {} codecs, {} aliases",
            manager.binding_count(),
            actions.len(),
            codecs.len(),
            aliases.len()
        );

        Self {
            manager,
            actions,
            codecs,
            aliases,
            writer: WriterOptions::default(),
        }
    }

    /// Context with the built-in components only.
    pub fn builtin(resolver: Arc<dyn TypeResolver>) -> Self {
        Self::initialize(resolver, &BuiltinComponents)
    }

    #[must_use]
    pub fn with_writer_options(mut self, options: WriterOptions) -> Self {
        self.writer = options;
        self
    }

    pub fn manager(&self) -> &ElementManager {
        &self.manager
    }

    pub fn actions(&self) -> &ActionManager {
        &self.actions
    }

    pub fn codecs(&self) -> &LeafCodecs {
        &self.codecs
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn writer_options(&self) -> &WriterOptions {
        &self.writer
    }

    /// Marshaller over this context's registries.
    pub fn marshaller(&self) -> Marshaller<'_> {
        Marshaller::new(&self.manager, &self.codecs, &self.aliases).with_options(self.writer)
    }
}
