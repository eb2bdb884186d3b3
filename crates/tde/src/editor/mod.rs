// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Document editing.
//!
//! A [`Document`] owns one element tree and applies [`Edit`]s to it,
//! recording a [`ModelEvent`](crate::model::ModelEvent) per change. The
//! document also tracks the *current* element, the one whose attributes a
//! viewer shows as [`Row`]s.

mod document;
mod validators;

pub use document::{AttributeRow, Document, Edit, Row};
pub use validators::{
    validator_for, BoundedNumberValidator, FileValidator, InputValidator, NumberValidator,
    RegexValidator, UrlValidator,
};
