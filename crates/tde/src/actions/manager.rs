// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Action registry.

use super::DataAction;
use crate::editor::Document;
use crate::model::{ModelError, Path};
use crate::types::{ancestors_by_level, TypeError, TypeHandle, TypeResolver};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Actions bound to exact types or to whole hierarchies.
#[derive(Clone, Default)]
pub struct ActionManager {
    exact: HashMap<String, Vec<Arc<dyn DataAction>>>,
    supertype: HashMap<String, Vec<Arc<dyn DataAction>>>,
}

impl ActionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `binding`; `concrete` restricts it to that exact type.
    pub fn register(&mut self, binding: &str, concrete: bool, action: Arc<dyn DataAction>) {
        let map = if concrete {
            &mut self.exact
        } else {
            &mut self.supertype
        };
        map.entry(binding.to_string()).or_default().push(action);
    }

    /// Actions for elements of `ty`: exact bindings, then supertype
    /// bindings of `ty` and its ancestors level by level. Each action
    /// appears once.
    pub fn actions_for(
        &self,
        resolver: &dyn TypeResolver,
        ty: &TypeHandle,
    ) -> Result<Vec<Arc<dyn DataAction>>, TypeError> {
        let mut found: Vec<Arc<dyn DataAction>> = Vec::new();
        let mut push = |action: &Arc<dyn DataAction>| {
            if !found.iter().any(|a| Arc::ptr_eq(a, action)) {
                found.push(action.clone());
            }
        };
        if let Some(actions) = self.exact.get(ty.name()) {
            actions.iter().for_each(&mut push);
        }
        if !self.supertype.is_empty() {
            for level in ancestors_by_level(resolver, ty) {
                for t in level? {
                    if let Some(actions) = self.supertype.get(t.name()) {
                        actions.iter().for_each(&mut push);
                    }
                }
            }
        }
        Ok(found)
    }

    /// Enabled actions for the attribute at `target` of `doc`.
    pub fn enabled_for(
        &self,
        doc: &Document,
        target: &Path,
    ) -> Result<Vec<Arc<dyn DataAction>>, ModelError> {
        let owner_path = target
            .parent()
            .ok_or_else(|| ModelError::InvalidPath(target.to_string()))?;
        let owner = doc
            .root()
            .element_at(&owner_path)
            .ok_or_else(|| ModelError::InvalidPath(target.to_string()))?;
        let ty = owner.ty().handle();
        let resolver = doc.context().manager().resolver();
        let mut actions = self
            .actions_for(resolver, ty)
            .map_err(|e| ModelError::technical(ty.name(), e))?;
        actions.retain(|a| a.is_enabled(doc, target));
        Ok(actions)
    }

    pub fn len(&self) -> usize {
        self.exact.values().chain(self.supertype.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ActionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionManager")
            .field("exact", &self.exact.len())
            .field("supertype", &self.supertype.len())
            .finish()
    }
}
