// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Addresses of attributes inside an element tree.

use std::fmt;

/// One navigation step from an element to one of its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Attribute `i` of the element.
    Child(usize),
    /// Key slot of map entry `i`.
    Key(usize),
}

/// Sequence of steps from the root element.
///
/// A non-empty path addresses an attribute; following the value of every
/// step but the last reaches the element owning it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Step>);

impl Path {
    /// The root element itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by one step.
    #[must_use]
    pub fn join(&self, step: Step) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }

    pub fn child(&self, index: usize) -> Self {
        self.join(Step::Child(index))
    }

    pub fn key(&self, index: usize) -> Self {
        self.join(Step::Key(index))
    }

    /// Path of the element owning the addressed attribute.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    pub fn last(&self) -> Option<Step> {
        self.0.last().copied()
    }

    /// Whether `prefix` addresses this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for step in &self.0 {
            match step {
                Step::Child(i) => write!(f, "/{}", i)?,
                Step::Key(i) => write!(f, "/{}@key", i)?,
            }
        }
        Ok(())
    }
}
