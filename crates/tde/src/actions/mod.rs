// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Context actions on document attributes.
//!
//! A [`DataAction`] targets one attribute, addressed by its [`Path`]. The
//! [`ActionManager`] selects candidate actions by the type of the element
//! owning that attribute, with the same exact-then-ancestors policy the
//! element manager uses; each action then decides whether it is enabled.
//! User choices (dimensions, concrete types) come from an [`ActionInput`].

mod builtin;
mod manager;

pub use builtin::{
    builtin_actions, CreateArrayAction, EditKeyAction, MoveDownAction, MoveUpAction,
    NewInstanceAction, RemoveAction, ResetAction,
};
pub use manager::ActionManager;

use crate::editor::Document;
use crate::jobs::CancelToken;
use crate::model::{ModelError, Path};
use crate::types::TypeHandle;

/// Source of the choices an action needs while it runs.
pub trait ActionInput {
    /// Array dimension count; `None` cancels.
    fn dimensions(&mut self) -> Option<u32>;

    /// Pick one of `candidates`; `None` cancels.
    fn choose_type(&mut self, candidates: &[TypeHandle]) -> Option<TypeHandle>;

    /// Whether an array of the wrapper `ty` should hold primitives.
    fn primitive_component(&mut self, _ty: &TypeHandle) -> bool {
        false
    }

    /// Token handed to background searches started by the action.
    fn cancel_token(&self) -> CancelToken {
        CancelToken::new()
    }
}

/// How a performed action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// The user or a cancel token stopped it; nothing was changed.
    Canceled,
}

/// An operation offered on one attribute of a document.
pub trait DataAction: Send + Sync {
    fn label(&self) -> &str;

    /// Whether the action applies to the attribute at `target`.
    fn is_enabled(&self, doc: &Document, target: &Path) -> bool;

    fn perform(
        &self,
        doc: &mut Document,
        target: &Path,
        input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError>;
}

#[cfg(test)]
mod tests;
