// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constraint analyzers.

use crate::model::Constraint;
use crate::types::{FieldInfo, TypeHandle};
use std::sync::Arc;

/// Derives constraints for a field, e.g. from its annotations.
pub trait ConstraintAnalyzer: Send + Sync {
    fn analyze(&self, field: &FieldInfo, declaring: &TypeHandle) -> Vec<Constraint>;
}

/// Ordered list of analyzers consulted for every structure field.
#[derive(Clone, Default)]
pub struct ConstraintManager {
    analyzers: Vec<Arc<dyn ConstraintAnalyzer>>,
}

impl ConstraintManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_analyzer(&mut self, analyzer: Arc<dyn ConstraintAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Output of every analyzer, in registration order.
    pub fn constraints_for(&self, field: &FieldInfo, declaring: &TypeHandle) -> Vec<Constraint> {
        self.analyzers
            .iter()
            .flat_map(|a| a.analyze(field, declaring))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl std::fmt::Debug for ConstraintManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintManager")
            .field("analyzers", &self.analyzers.len())
            .finish()
    }
}
