// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element tree <-> XML document.

use super::alias::{AliasTable, MAP_ENTRY_TYPE};
use super::convert::converter_for;
use super::error::ConversionError;
use super::naming::{
    escape_name, parse_tag, type_tag, BASE64_ENCODING, ENCODING_ATTRIBUTE, NULL_TAG,
};
use super::writer::{is_xml_char, WriterOptions, XmlWriter};
use crate::manager::ElementManager;
use crate::model::{Element, LeafCodecs, ModelError, ValueElement};
use crate::types::{ClassDefinition, ElementCategory, PrimitiveKind};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;

/// Encodes and decodes element trees.
///
/// Borrows the registries of an initialized application; cheap to create.
pub struct Marshaller<'a> {
    manager: &'a ElementManager,
    codecs: &'a LeafCodecs,
    aliases: &'a AliasTable,
    options: WriterOptions,
}

impl<'a> Marshaller<'a> {
    pub fn new(
        manager: &'a ElementManager,
        codecs: &'a LeafCodecs,
        aliases: &'a AliasTable,
    ) -> Self {
        Self {
            manager,
            codecs,
            aliases,
            options: WriterOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn manager(&self) -> &ElementManager {
        self.manager
    }

    pub fn codecs(&self) -> &LeafCodecs {
        self.codecs
    }

    pub fn aliases(&self) -> &AliasTable {
        self.aliases
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    /// Encode `root` as a document whose root tag is the root's type tag.
    pub fn to_xml(&self, root: &Element) -> Result<String, ConversionError> {
        crate::trace_fn!("Marshaller::to_xml");
        let mut w = XmlWriter::new(self.options);
        self.encode_node(&mut w, &self.tag_of(root.ty()), &[], root)?;
        Ok(w.finish())
    }

    pub fn write_file(
        &self,
        root: &Element,
        path: impl AsRef<Path>,
    ) -> Result<(), ConversionError> {
        let xml = self.to_xml(root)?;
        fs::write(path.as_ref(), xml)?;
        log::debug!("[xml] wrote {}", path.as_ref().display());
        Ok(())
    }

    pub fn tag_of(&self, def: &ClassDefinition) -> String {
        type_tag(def, self.aliases)
    }

    pub(crate) fn entry_tag(&self) -> String {
        match self.aliases.alias_of(MAP_ENTRY_TYPE) {
            Some(alias) => alias.to_string(),
            None => escape_name(MAP_ENTRY_TYPE),
        }
    }

    /// Write `element` as one node named `tag`.
    ///
    /// Text holding characters XML 1.0 cannot carry is written as base64
    /// and flagged with `encoding="base64"`.
    pub(crate) fn encode_node(
        &self,
        w: &mut XmlWriter,
        tag: &str,
        attributes: &[(&str, &str)],
        element: &Element,
    ) -> Result<(), ConversionError> {
        let converter = converter_for(element.kind());
        match converter.compact(element, self) {
            Some(text) if text.chars().all(is_xml_char) => w.text_element(tag, attributes, &text),
            Some(text) => {
                let mut flagged = attributes.to_vec();
                flagged.push((ENCODING_ATTRIBUTE, BASE64_ENCODING));
                w.text_element(tag, &flagged, &STANDARD.encode(text.as_bytes()));
            }
            None => {
                w.start(tag, attributes);
                converter.encode_children(element, w, self)?;
                w.end();
            }
        }
        Ok(())
    }

    /// Collection slot: the value under its type tag, or the null placeholder.
    pub(crate) fn encode_slot(
        &self,
        w: &mut XmlWriter,
        value: Option<&Element>,
    ) -> Result<(), ConversionError> {
        match value {
            Some(value) => self.encode_node(w, &self.tag_of(value.ty()), &[], value),
            None => {
                w.empty_element(NULL_TAG);
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    /// Decode a document; an unknown root tag is an error.
    pub fn from_xml(&self, text: &str) -> Result<Element, ConversionError> {
        crate::trace_fn!("Marshaller::from_xml");
        let doc = Document::parse(text)?;
        let root = doc.root_element();
        let tag = root.tag_name().name();
        let element = self
            .allocate_tag(tag)?
            .ok_or_else(|| ConversionError::UnknownRootType(tag.to_string()))?;
        self.fill_node(element, root)
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Element, ConversionError> {
        let text = fs::read_to_string(path.as_ref())?;
        log::debug!("[xml] reading {}", path.as_ref().display());
        self.from_xml(&text)
    }

    /// Empty element for the type named by `tag`; `None` if the type is unknown.
    pub fn allocate_tag(&self, tag: &str) -> Result<Option<Element>, ConversionError> {
        let parsed = parse_tag(tag, self.aliases);
        let resolved = self
            .manager
            .resolver()
            .resolve_type(&parsed.name)
            .map_err(|e| ModelError::technical(&parsed.name, e))?;
        let Some(handle) = resolved else {
            return Ok(None);
        };
        let element = if parsed.is_array() {
            self.manager.create_array(&handle, parsed.primitive, parsed.dimensions)?
        } else {
            self.manager.create(&handle)?
        };
        Ok(Some(element))
    }

    /// Empty element for a declared type.
    pub fn allocate(&self, def: &ClassDefinition) -> Result<Element, ConversionError> {
        if def.category().is_primitive() {
            let kind = PrimitiveKind::from_wrapper(def.name())
                .ok_or_else(|| ConversionError::malformed(def.name(), "not a primitive type"))?;
            return Ok(ValueElement::primitive(kind).into());
        }
        let element = if def.is_array() {
            self.manager.create_array(
                def.handle(),
                def.category() == ElementCategory::PrimitiveArray,
                def.dimensions(),
            )?
        } else {
            self.manager.create(def.handle())?
        };
        Ok(element)
    }

    /// Fill `element` from `node` with the converter of its kind.
    pub(crate) fn fill_node(
        &self,
        mut element: Element,
        node: Node<'_, '_>,
    ) -> Result<Element, ConversionError> {
        converter_for(element.kind()).fill(&mut element, node, self)?;
        Ok(element)
    }

    /// Decode one collection slot. Primitive slots ignore the tag; other
    /// slots must name a known type.
    pub(crate) fn decode_slot(
        &self,
        node: Node<'_, '_>,
        value_type: &ClassDefinition,
    ) -> Result<Option<Element>, ConversionError> {
        let tag = node.tag_name().name();
        if tag == NULL_TAG {
            return Ok(None);
        }
        let element = if value_type.category().is_primitive() {
            self.allocate(value_type)?
        } else {
            self.allocate_tag(tag)?
                .ok_or_else(|| ConversionError::UnknownType(tag.to_string()))?
        };
        self.fill_node(element, node).map(Some)
    }
}
