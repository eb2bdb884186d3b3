// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Short tag names for common types.

use super::error::ConversionError;
use super::naming::{is_xml_name, ARRAY_SUFFIX, NULL_TAG};
use crate::types::PrimitiveKind;
use std::collections::HashMap;

/// Entry type of map elements, written as `<entry>`.
pub const MAP_ENTRY_TYPE: &str = "java.util.Map$Entry";

const DEFAULT_ALIASES: [(&str, &str); 21] = [
    ("string", "java.lang.String"),
    ("string-buffer", "java.lang.StringBuffer"),
    ("string-builder", "java.lang.StringBuilder"),
    ("date", "java.util.Date"),
    ("big-int", "java.math.BigInteger"),
    ("big-decimal", "java.math.BigDecimal"),
    ("url", "java.net.URL"),
    ("file", "java.io.File"),
    ("entry", MAP_ENTRY_TYPE),
    ("list", "java.util.ArrayList"),
    ("linked-list", "java.util.LinkedList"),
    ("set", "java.util.HashSet"),
    ("tree-set", "java.util.TreeSet"),
    ("sorted-set", "java.util.SortedSet"),
    ("map", "java.util.HashMap"),
    ("linked-hash-map", "java.util.LinkedHashMap"),
    ("tree-map", "java.util.TreeMap"),
    ("sorted-map", "java.util.SortedMap"),
    ("object", "java.lang.Object"),
    ("collection", "java.util.Collection"),
    ("enum", "java.lang.Enum"),
];

/// Bidirectional alias table (`alias <-> qualified type name`).
///
/// The eight wrapper classes are aliased by their primitive name
/// (`int` for `java.lang.Integer`).
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    by_alias: HashMap<String, String>,
    by_type: HashMap<String, String>,
}

impl AliasTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the wrapper and JDK aliases.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for kind in PrimitiveKind::ALL {
            table.insert(kind.name(), kind.wrapper_name());
        }
        for (alias, ty) in DEFAULT_ALIASES {
            table.insert(alias, ty);
        }
        table
    }

    /// Register `alias` for `type_name`, replacing earlier aliases of both.
    ///
    /// The alias must be a valid tag name. `null` and anything containing
    /// the array suffix are reserved.
    pub fn add(&mut self, alias: &str, type_name: &str) -> Result<(), ConversionError> {
        if !is_xml_name(alias) || alias == NULL_TAG || alias.contains(ARRAY_SUFFIX) {
            return Err(ConversionError::InvalidAlias(alias.to_string()));
        }
        if let Some(old) = self.by_type.remove(type_name) {
            self.by_alias.remove(&old);
        }
        if let Some(old) = self.by_alias.remove(alias) {
            self.by_type.remove(&old);
        }
        self.insert(alias, type_name);
        Ok(())
    }

    fn insert(&mut self, alias: &str, type_name: &str) {
        self.by_alias.insert(alias.to_string(), type_name.to_string());
        self.by_type.insert(type_name.to_string(), alias.to_string());
    }

    pub fn alias_of(&self, type_name: &str) -> Option<&str> {
        self.by_type.get(type_name).map(String::as_str)
    }

    pub fn type_of(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}
