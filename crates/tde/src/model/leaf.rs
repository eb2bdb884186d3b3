// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf codecs: text form of value elements.

use super::{LeafKind, ModelError, ValueElement, DATE_FORMAT};
use crate::types::{ParseScalarError, Scalar};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Accepts any fractional-second precision, including none.
const DATE_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f UTC";

/// Render/parse capability of one leaf kind.
pub trait LeafCodec: Send + Sync {
    /// Text written to data files and shown in the editor.
    fn render(&self, value: &ValueElement) -> String {
        value.value().render()
    }

    /// Parse `text` into a scalar suitable for `value`.
    fn parse(&self, value: &ValueElement, text: &str) -> Result<Scalar, ParseScalarError>;

    /// Whether the editor may change the value in place.
    fn is_editable(&self, _value: &ValueElement) -> bool {
        true
    }
}

/// Codec for primitive and wrapper leaves.
pub struct PrimitiveCodec;

impl LeafCodec for PrimitiveCodec {
    fn parse(&self, value: &ValueElement, text: &str) -> Result<Scalar, ParseScalarError> {
        match value.leaf() {
            LeafKind::Primitive(kind) | LeafKind::Wrapper(kind) => kind.parse(text),
            _ => Err(ParseScalarError::new("primitive", text)),
        }
    }
}

/// Codec for strings and string-constructed types; accepts any text.
pub struct TextCodec;

impl LeafCodec for TextCodec {
    fn parse(&self, _value: &ValueElement, text: &str) -> Result<Scalar, ParseScalarError> {
        Ok(Scalar::Text(text.to_string()))
    }
}

/// Codec for dates in [`DATE_FORMAT`].
pub struct DateCodec;

impl LeafCodec for DateCodec {
    fn parse(&self, _value: &ValueElement, text: &str) -> Result<Scalar, ParseScalarError> {
        chrono::NaiveDateTime::parse_from_str(text.trim(), DATE_PARSE_FORMAT)
            .map(|dt| Scalar::Text(dt.format(DATE_FORMAT).to_string()))
            .map_err(|_| ParseScalarError::new("date", text))
    }
}

/// Codec for enum constants.
pub struct EnumCodec;

impl LeafCodec for EnumCodec {
    fn parse(&self, value: &ValueElement, text: &str) -> Result<Scalar, ParseScalarError> {
        let name = text.trim();
        if value.constants().iter().any(|c| c == name) {
            Ok(Scalar::Text(name.to_string()))
        } else {
            Err(ParseScalarError::new(value.ty().name(), text))
        }
    }
}

/// Registry of leaf codecs keyed by [`LeafKind::codec_key`].
#[derive(Clone)]
pub struct LeafCodecs {
    codecs: HashMap<String, Arc<dyn LeafCodec>>,
}

impl LeafCodecs {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Registry with the codecs of every built-in leaf kind.
    pub fn builtin() -> Self {
        let mut codecs = Self::new();
        let primitive: Arc<dyn LeafCodec> = Arc::new(PrimitiveCodec);
        let text: Arc<dyn LeafCodec> = Arc::new(TextCodec);
        codecs.register("primitive", primitive.clone());
        codecs.register("wrapper", primitive);
        codecs.register("text", text.clone());
        codecs.register("parsed", text);
        codecs.register("date", Arc::new(DateCodec));
        codecs.register("enum", Arc::new(EnumCodec));
        codecs
    }

    /// Register (or replace) the codec for `key`.
    pub fn register(&mut self, key: impl Into<String>, codec: Arc<dyn LeafCodec>) {
        self.codecs.insert(key.into(), codec);
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn LeafCodec>> {
        self.codecs.get(key)
    }

    fn codec_for(&self, value: &ValueElement) -> Result<&Arc<dyn LeafCodec>, ModelError> {
        let key = value.leaf().codec_key();
        self.get(key)
            .ok_or_else(|| ModelError::Unsupported(format!("no leaf codec for '{}'", key)))
    }

    /// Render `value`; falls back to the scalar's own text without a codec.
    pub fn render(&self, value: &ValueElement) -> String {
        match self.codec_for(value) {
            Ok(codec) => codec.render(value),
            Err(_) => value.value().render(),
        }
    }

    /// Parse `text` and store it in `value`, returning the previous scalar.
    pub fn parse_into(&self, value: &mut ValueElement, text: &str) -> Result<Scalar, ModelError> {
        let scalar = self.codec_for(value)?.parse(value, text)?;
        value.set(scalar)
    }

    pub fn is_editable(&self, value: &ValueElement) -> bool {
        self.codec_for(value).is_ok_and(|c| c.is_editable(value))
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for LeafCodecs {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for LeafCodecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("LeafCodecs").field("keys", &keys).finish()
    }
}
