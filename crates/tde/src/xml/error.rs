// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Marshalling errors.

use crate::model::ModelError;
use std::fmt;
use std::io;

/// Failure while encoding or decoding a data file.
#[derive(Debug)]
pub enum ConversionError {
    /// The document is not well-formed XML.
    Xml(roxmltree::Error),
    /// The root tag names no known type.
    UnknownRootType(String),
    /// A collection or map slot names no known type.
    UnknownType(String),
    /// Well-formed XML that does not describe an element tree.
    Malformed { context: String, reason: String },
    /// An alias that would collide with a reserved tag.
    InvalidAlias(String),
    /// Element construction or value assignment failed.
    Model(ModelError),
    Io(io::Error),
}

impl ConversionError {
    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML parse error: {}", e),
            Self::UnknownRootType(tag) => write!(f, "Unknown root type '{}'", tag),
            Self::UnknownType(tag) => write!(f, "Unknown type '{}'", tag),
            Self::Malformed { context, reason } => write!(f, "Malformed <{}>: {}", context, reason),
            Self::InvalidAlias(alias) => write!(f, "Invalid alias '{}'", alias),
            Self::Model(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for ConversionError {
    fn from(e: roxmltree::Error) -> Self {
        Self::Xml(e)
    }
}

impl From<ModelError> for ConversionError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<io::Error> for ConversionError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
