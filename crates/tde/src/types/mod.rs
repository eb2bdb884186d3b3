// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-side vocabulary shared by every other module.
//!
//! The host type system is consumed through the [`TypeResolver`] trait. Types
//! are referred to by opaque [`TypeHandle`]s and described for the element
//! model by [`ClassDefinition`]s (handle + [`ElementCategory`] + dimensions).
//!
//! # Features
//!
//! - Eight [`PrimitiveKind`]s with Java names, wrapper names and defaults
//! - [`Scalar`] values with Java-compatible text rendering
//! - [`FieldSignature`] parsing from Java source-like text
//! - Breadth-first ancestor walk ([`ancestors_by_level`])

mod category;
mod class_def;
mod error;
mod primitive;
mod resolver;
mod scalar;
mod signature;

pub use category::ElementCategory;
pub use class_def::{ClassDefinition, Modifiers, TypeHandle, TypeKind};
pub use error::TypeError;
pub use primitive::{PrimitiveKind, OBJECT_TYPE};
pub use resolver::{ancestors_by_level, is_subtype, LevelWalk, Monitor, NullMonitor, TypeResolver};
pub use scalar::{ParseScalarError, Scalar};
pub use signature::{FieldInfo, FieldSignature};
