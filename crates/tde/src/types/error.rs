// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type-system errors.

use std::fmt;

/// Failure reported by a [`TypeResolver`](super::TypeResolver).
///
/// Always recoverable: the caller decides whether to report or abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A referenced type is unknown to the resolver.
    NotFound(String),
    /// Resolver-side failure while inspecting a known type.
    Lookup { type_name: String, reason: String },
    /// A field signature could not be parsed.
    Signature { text: String, reason: String },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "Type not found: {}", name),
            Self::Lookup { type_name, reason } => {
                write!(f, "Type lookup failed for {}: {}", type_name, reason)
            }
            Self::Signature { text, reason } => {
                write!(f, "Invalid signature '{}': {}", text, reason)
            }
        }
    }
}

impl std::error::Error for TypeError {}
