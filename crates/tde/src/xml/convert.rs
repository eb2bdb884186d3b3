// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! One converter per element kind.
//!
//! Decoding is construct-then-fill: the [`Marshaller`] allocates the target
//! element from the tag (or the declared type) first, then hands it to the
//! converter of its kind together with the XML node.

use super::alias::MAP_ENTRY_TYPE;
use super::error::ConversionError;
use super::marshal::Marshaller;
use super::naming::{
    escape_name, unescape_name, BASE64_ENCODING, CLASS_ATTRIBUTE, DEFINED_IN_ATTRIBUTE,
    ENCODING_ATTRIBUTE,
};
use super::writer::{is_xml_char, XmlWriter};
use crate::model::{AttributeState, Element, ElementKind, ValueElement};
use crate::types::{PrimitiveKind, Scalar};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use roxmltree::Node;

pub trait NodeConverter: Send + Sync {
    /// Single text form of `element`, written instead of child nodes.
    fn compact(&self, _element: &Element, _m: &Marshaller<'_>) -> Option<String> {
        None
    }

    /// Write the child nodes of `element`; its own tag is already open.
    fn encode_children(
        &self,
        element: &Element,
        w: &mut XmlWriter,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError>;

    /// Populate the freshly allocated `element` from `node`.
    fn fill(
        &self,
        element: &mut Element,
        node: Node<'_, '_>,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError>;
}

/// Converter dispatched on the runtime kind of an element.
pub fn converter_for(kind: ElementKind) -> &'static dyn NodeConverter {
    match kind {
        ElementKind::Structure => &StructureConverter,
        ElementKind::Indexed => &IndexedConverter,
        ElementKind::Keyed => &KeyedConverter,
        ElementKind::Bag => &BagConverter,
        ElementKind::Value => &ValueConverter,
    }
}

fn element_children<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

// ---------------------------------------------------------------------------
// Structures
// ---------------------------------------------------------------------------

/// Structures write one node per set attribute, named after the field.
/// Unset attributes are omitted.
pub struct StructureConverter;

impl NodeConverter for StructureConverter {
    fn encode_children(
        &self,
        element: &Element,
        w: &mut XmlWriter,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        let attributes = element.children();
        for (index, attr) in attributes.iter().enumerate() {
            let Some(value) = attr.value() else {
                continue;
            };
            let name = attr.name();
            let hidden = attributes[..index].iter().any(|a| a.name() == name);
            let class_tag = (value.ty() != attr.lower_bound()).then(|| m.tag_of(value.ty()));

            let mut xml_attributes = Vec::new();
            if let Some(tag) = class_tag.as_deref() {
                xml_attributes.push((CLASS_ATTRIBUTE, tag));
            }
            if hidden {
                xml_attributes.push((DEFINED_IN_ATTRIBUTE, attr.declaring_type()));
            }
            m.encode_node(w, &escape_name(&name), &xml_attributes, value)?;
        }
        Ok(())
    }

    fn fill(
        &self,
        element: &mut Element,
        node: Node<'_, '_>,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        for attr in element.children_mut() {
            attr.set_state(AttributeState::Added);
        }
        for child in element_children(node) {
            let name = unescape_name(child.tag_name().name());
            let defined_in = child.attribute(DEFINED_IN_ATTRIBUTE);
            let Some(index) = element.children().iter().position(|a| {
                a.name() == name.as_str() && defined_in.map_or(true, |d| a.declaring_type() == d)
            }) else {
                log::debug!("[xml] skipping unknown field <{}> of {}", name, element.ty());
                continue;
            };

            let lower_bound = element.children()[index].lower_bound().clone();
            let concrete = child.attribute(CLASS_ATTRIBUTE).filter(|c| !c.is_empty());
            let allocated = match concrete {
                Some(tag) => m.allocate_tag(tag)?,
                None => Some(m.allocate(&lower_bound)?),
            };
            let value = match allocated {
                Some(value) if m.manager().is_assignable(value.ty(), &lower_bound)? => {
                    Some(m.fill_node(value, child)?)
                }
                Some(value) => {
                    log::debug!(
                        "[xml] skipping field <{}>: {} is not assignable to {}",
                        name,
                        value.ty(),
                        lower_bound
                    );
                    None
                }
                None => {
                    log::debug!("[xml] skipping field <{}>: unknown type {:?}", name, concrete);
                    None
                }
            };
            if let Some(attr) = element.child_mut(index) {
                if value.is_some() {
                    attr.set_value(value);
                }
                attr.set_state(AttributeState::Defined);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

fn encode_slots(
    element: &Element,
    w: &mut XmlWriter,
    m: &Marshaller<'_>,
) -> Result<(), ConversionError> {
    for attr in element.children() {
        m.encode_slot(w, attr.value())?;
    }
    Ok(())
}

fn fill_slots(
    element: &mut Element,
    node: Node<'_, '_>,
    m: &Marshaller<'_>,
) -> Result<(), ConversionError> {
    let value_type = match element {
        Element::Indexed(e) => e.value_type().clone(),
        Element::Bag(e) => e.value_type().clone(),
        other => {
            return Err(ConversionError::malformed(
                other.ty().to_string(),
                "not a positional collection",
            ))
        }
    };
    for child in element_children(node) {
        let value = m.decode_slot(child, &value_type)?;
        let index = element.push_slot()?;
        if let Some(slot) = element.child_mut(index) {
            slot.set_value(value);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompactForm {
    Chars,
    Bytes,
}

/// `char[]` and `byte[]` travel as one text run.
fn compact_form(element: &Element) -> Option<CompactForm> {
    let array = element.as_indexed()?;
    if array.ty().dimensions() != 1 || !array.value_type().category().is_primitive() {
        return None;
    }
    match PrimitiveKind::from_wrapper(array.value_type().name())? {
        PrimitiveKind::Char => Some(CompactForm::Chars),
        PrimitiveKind::Byte => Some(CompactForm::Bytes),
        _ => None,
    }
}

fn slot_scalars(element: &Element) -> Option<Vec<&Scalar>> {
    element
        .children()
        .iter()
        .map(|a| a.value().and_then(Element::as_value).map(ValueElement::value))
        .collect()
}

/// Arrays and lists: one node per slot, `<null/>` for unset slots.
pub struct IndexedConverter;

impl NodeConverter for IndexedConverter {
    fn compact(&self, element: &Element, _m: &Marshaller<'_>) -> Option<String> {
        let form = compact_form(element)?;
        let scalars = slot_scalars(element)?;
        match form {
            CompactForm::Chars => scalars
                .into_iter()
                .map(|s| match s {
                    Scalar::Char(c) if is_xml_char(*c) => Some(*c),
                    _ => None,
                })
                .collect(),
            CompactForm::Bytes => {
                let bytes: Option<Vec<u8>> = scalars
                    .into_iter()
                    .map(|s| match s {
                        Scalar::Byte(b) => Some(b.to_be_bytes()[0]),
                        _ => None,
                    })
                    .collect();
                bytes.map(|b| STANDARD.encode(b))
            }
        }
    }

    fn encode_children(
        &self,
        element: &Element,
        w: &mut XmlWriter,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        encode_slots(element, w, m)
    }

    fn fill(
        &self,
        element: &mut Element,
        node: Node<'_, '_>,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        let has_children = element_children(node).next().is_some();
        match compact_form(element) {
            Some(form) if !has_children => fill_compact(element, form, node.text().unwrap_or("")),
            _ => fill_slots(element, node, m),
        }
    }
}

fn fill_compact(
    element: &mut Element,
    form: CompactForm,
    text: &str,
) -> Result<(), ConversionError> {
    let scalars: Vec<Scalar> = match form {
        CompactForm::Chars => text.chars().map(Scalar::Char).collect(),
        CompactForm::Bytes => STANDARD
            .decode(text.trim())
            .map_err(|e| ConversionError::malformed(element.ty().to_string(), e.to_string()))?
            .into_iter()
            .map(|b| Scalar::Byte(i8::from_be_bytes([b])))
            .collect(),
    };
    let kind = match form {
        CompactForm::Chars => PrimitiveKind::Char,
        CompactForm::Bytes => PrimitiveKind::Byte,
    };
    for scalar in scalars {
        let mut value = ValueElement::primitive(kind);
        value.set(scalar)?;
        let index = element.push_slot()?;
        if let Some(slot) = element.child_mut(index) {
            slot.set_value(Some(value.into()));
        }
    }
    Ok(())
}

/// Sets and plain collections.
pub struct BagConverter;

impl NodeConverter for BagConverter {
    fn encode_children(
        &self,
        element: &Element,
        w: &mut XmlWriter,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        encode_slots(element, w, m)
    }

    fn fill(
        &self,
        element: &mut Element,
        node: Node<'_, '_>,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        fill_slots(element, node, m)
    }
}

/// Maps: one `<entry>` per slot holding the key node then the value node.
pub struct KeyedConverter;

impl NodeConverter for KeyedConverter {
    fn encode_children(
        &self,
        element: &Element,
        w: &mut XmlWriter,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        let entry_tag = m.entry_tag();
        for attr in element.children() {
            w.start(&entry_tag, &[]);
            m.encode_slot(w, attr.key().and_then(|k| k.value()))?;
            m.encode_slot(w, attr.value())?;
            w.end();
        }
        Ok(())
    }

    fn fill(
        &self,
        element: &mut Element,
        node: Node<'_, '_>,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        let (key_type, value_type) = match element.as_keyed() {
            Some(map) => (map.key_type().clone(), map.value_type().clone()),
            None => return Err(ConversionError::malformed(element.ty().to_string(), "not a map")),
        };
        for entry in element_children(node) {
            let parts: Vec<_> = element_children(entry).collect();
            let [key_node, value_node] = parts[..] else {
                return Err(ConversionError::malformed(
                    MAP_ENTRY_TYPE,
                    format!("expected a key and a value, found {} nodes", parts.len()),
                ));
            };
            let key = m.decode_slot(key_node, &key_type)?;
            let value = m.decode_slot(value_node, &value_type)?;
            let index = element.push_slot()?;
            if let Some(slot) = element.child_mut(index) {
                if let Some(key_slot) = slot.key_mut() {
                    key_slot.set_value(key);
                }
                slot.set_value(value);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

/// Value leaves: the codec-rendered text.
pub struct ValueConverter;

impl NodeConverter for ValueConverter {
    fn compact(&self, element: &Element, m: &Marshaller<'_>) -> Option<String> {
        element.as_value().map(|v| m.codecs().render(v))
    }

    fn encode_children(
        &self,
        _element: &Element,
        _w: &mut XmlWriter,
        _m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        Ok(())
    }

    fn fill(
        &self,
        element: &mut Element,
        node: Node<'_, '_>,
        m: &Marshaller<'_>,
    ) -> Result<(), ConversionError> {
        if element_children(node).next().is_some() {
            return Err(ConversionError::malformed(
                node.tag_name().name(),
                "value nodes hold text only",
            ));
        }
        let context = element.ty().to_string();
        let text = leaf_text(node, &context)?;
        let value = element
            .as_value_mut()
            .ok_or_else(|| ConversionError::malformed(context, "not a value"))?;
        m.codecs().parse_into(value, &text)?;
        Ok(())
    }
}

/// Text of a leaf node, undoing the base64 form.
fn leaf_text(node: Node<'_, '_>, context: &str) -> Result<String, ConversionError> {
    let text = node.text().unwrap_or("");
    match node.attribute(ENCODING_ATTRIBUTE) {
        None => Ok(text.to_string()),
        Some(BASE64_ENCODING) => {
            let bytes = STANDARD
                .decode(text.trim())
                .map_err(|e| ConversionError::malformed(context, e.to_string()))?;
            String::from_utf8(bytes).map_err(|e| ConversionError::malformed(context, e.to_string()))
        }
        Some(other) => Err(ConversionError::malformed(
            context,
            format!("unknown text encoding '{}'", other),
        )),
    }
}
