// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Encoding and decoding tests.

use super::*;
use crate::catalog::{TypeCatalog, TypeDecl};
use crate::manager::ElementManager;
use crate::model::{AttributeState, Element, LeafCodecs};
use crate::types::Scalar;
use std::sync::Arc;

struct Fixture {
    manager: ElementManager,
    codecs: LeafCodecs,
    aliases: AliasTable,
}

impl Fixture {
    fn new() -> Self {
        let mut c = TypeCatalog::with_jdk();
        c.insert(TypeDecl::class("com.acme.Line").field("qty", "int").field("product", "String"));
        c.insert(
            TypeDecl::class("com.acme.Order")
                .field("paid", "boolean")
                .field("label", "String")
                .field("lines", "java.util.List")
                .field("code", "byte[]")
                .field("initials", "char[]")
                .field("tags", "java.util.Map")
                .field("owner", "Object")
                .field("first", "com.acme.Line"),
        );
        c.insert(TypeDecl::class("com.acme.Base").field("id", "int"));
        c.insert(
            TypeDecl::class("com.acme.Derived")
                .extends("com.acme.Base")
                .field("id", "String"),
        );
        Self {
            manager: ElementManager::with_builtins(Arc::new(c)),
            codecs: LeafCodecs::builtin(),
            aliases: AliasTable::with_defaults(),
        }
    }

    fn marshaller(&self) -> Marshaller<'_> {
        Marshaller::new(&self.manager, &self.codecs, &self.aliases)
    }

    fn create(&self, name: &str) -> Element {
        let ty = self.manager.resolve(name).expect("resolve");
        self.manager.create(&ty).expect("create")
    }

    fn value(&self, name: &str, text: &str) -> Element {
        let mut element = self.create(name);
        let value = element.as_value_mut().expect("leaf");
        self.codecs.parse_into(value, text).expect("parse");
        element
    }

    fn array(&self, wrapper: &str, primitive: bool, dims: u32) -> Element {
        let ty = self.manager.resolve(wrapper).expect("resolve");
        self.manager.create_array(&ty, primitive, dims).expect("array")
    }

    fn push(&self, collection: &mut Element, value: Option<Element>) {
        let index = self.manager.extend(collection).expect("extend");
        collection.child_mut(index).expect("slot").set_value(value);
    }
}

fn set(structure: &mut Element, name: &str, value: Element) {
    let index = structure.as_structure().and_then(|s| s.index_of(name)).expect("field");
    structure.child_mut(index).expect("attr").set_value(Some(value));
}

fn field<'e>(structure: &'e Element, name: &str) -> Option<&'e Element> {
    structure.as_structure()?.attribute(name)?.value()
}

fn scalar(element: Option<&Element>) -> Scalar {
    element.and_then(Element::as_value).expect("leaf").value().clone()
}

#[test]
fn test_structure_omits_unset_fields() {
    let f = Fixture::new();
    let mut order = f.create("com.acme.Order");
    set(&mut order, "label", f.value("java.lang.String", "first"));

    let xml = f.marshaller().to_xml(&order).expect("encode");
    assert_eq!(
        xml,
        "<com.acme.Order>\n  <paid>false</paid>\n  <label>first</label>\n</com.acme.Order>\n"
    );
}

#[test]
fn test_polymorphic_field_and_null_slots() {
    let f = Fixture::new();
    let mut line = f.create("com.acme.Line");
    f.codecs
        .parse_into(field_mut(&mut line, "qty"), "2")
        .expect("qty");

    let mut lines = f.create("java.util.ArrayList");
    f.push(&mut lines, Some(line));
    f.push(&mut lines, None);

    let mut order = f.create("com.acme.Order");
    set(&mut order, "lines", lines);

    let m = f.marshaller();
    let xml = m.to_xml(&order).expect("encode");
    assert!(xml.contains("<lines class=\"list\">"), "{}", xml);
    assert!(xml.contains("<com.acme.Line>\n      <qty>2</qty>\n    </com.acme.Line>"), "{}", xml);
    assert!(xml.contains("<null/>"), "{}", xml);

    let decoded = m.from_xml(&xml).expect("decode");
    let lines = field(&decoded, "lines").expect("lines");
    assert_eq!(lines.ty().name(), "java.util.ArrayList");
    assert_eq!(lines.child_count(), 2);
    assert!(!lines.child(1).expect("slot").is_set());
    let line = lines.child(0).and_then(|a| a.value()).expect("line");
    assert_eq!(scalar(field(line, "qty")), Scalar::Int(2));
    assert!(field(line, "product").is_none());
}

fn field_mut<'e>(structure: &'e mut Element, name: &str) -> &'e mut crate::model::ValueElement {
    let index = structure.as_structure().and_then(|s| s.index_of(name)).expect("field");
    structure
        .child_mut(index)
        .and_then(|a| a.value_mut())
        .and_then(Element::as_value_mut)
        .expect("primitive")
}

#[test]
fn test_char_and_byte_arrays_are_compact() {
    let f = Fixture::new();
    let mut code = f.array("java.lang.Byte", true, 1);
    let mut initials = f.array("java.lang.Character", true, 1);
    for text in ["1", "2", "3"] {
        f.push(&mut code, Some(f.value_of_primitive("byte", text)));
    }
    for text in ["a", "b"] {
        f.push(&mut initials, Some(f.value_of_primitive("char", text)));
    }
    let mut order = f.create("com.acme.Order");
    set(&mut order, "code", code);
    set(&mut order, "initials", initials);

    let m = f.marshaller();
    let xml = m.to_xml(&order).expect("encode");
    assert!(xml.contains("<code>AQID</code>"), "{}", xml);
    assert!(xml.contains("<initials>ab</initials>"), "{}", xml);

    let decoded = m.from_xml(&xml).expect("decode");
    let code = field(&decoded, "code").expect("code");
    let bytes: Vec<Scalar> = code.children().iter().map(|a| scalar(a.value())).collect();
    assert_eq!(bytes, vec![Scalar::Byte(1), Scalar::Byte(2), Scalar::Byte(3)]);
    let initials = field(&decoded, "initials").expect("initials");
    assert_eq!(initials.child_count(), 2);
    assert_eq!(scalar(initials.child(1).and_then(|a| a.value())), Scalar::Char('b'));
}

impl Fixture {
    fn value_of_primitive(&self, primitive: &str, text: &str) -> Element {
        let kind = crate::types::PrimitiveKind::from_name(primitive).expect("kind");
        let mut value = crate::model::ValueElement::primitive(kind);
        self.codecs.parse_into(&mut value, text).expect("parse");
        value.into()
    }
}

#[test]
fn test_char_array_with_nul_falls_back_to_slots() {
    let f = Fixture::new();
    let mut chars = f.array("java.lang.Character", true, 1);
    f.push(&mut chars, Some(f.value_of_primitive("char", "a")));
    f.manager.extend(&mut chars).expect("extend");

    let m = f.marshaller();
    let xml = m.to_xml(&chars).expect("encode");
    assert_eq!(xml, "<char-array>\n  <char>a</char>\n  <char/>\n</char-array>\n");

    let decoded = m.from_xml(&xml).expect("decode");
    assert_eq!(decoded.child_count(), 2);
    assert_eq!(scalar(decoded.child(1).and_then(|a| a.value())), Scalar::Char('\0'));
}

#[test]
fn test_nested_primitive_arrays() {
    let f = Fixture::new();
    let mut matrix = f.array("java.lang.Integer", true, 2);
    let mut row = f.array("java.lang.Integer", true, 1);
    f.manager.extend(&mut row).expect("extend");
    f.push(&mut row, Some(f.value_of_primitive("int", "7")));
    f.push(&mut matrix, Some(row));
    f.push(&mut matrix, None);

    let m = f.marshaller();
    let xml = m.to_xml(&matrix).expect("encode");
    assert!(xml.starts_with("<int-array-array>"), "{}", xml);
    assert!(
        xml.contains("<int-array>\n    <int>0</int>\n    <int>7</int>\n  </int-array>"),
        "{}",
        xml
    );

    let decoded = m.from_xml(&xml).expect("decode");
    assert_eq!(decoded.ty(), matrix.ty());
    assert_eq!(decoded.child_count(), 2);
    let row = decoded.child(0).and_then(|a| a.value()).expect("row");
    assert_eq!(scalar(row.child(1).and_then(|a| a.value())), Scalar::Int(7));
    assert!(!decoded.child(1).expect("slot").is_set());
}

#[test]
fn test_map_entries() {
    let f = Fixture::new();
    let mut tags = f.create("java.util.HashMap");
    for (key, value) in [("k", Some("7")), ("n", None)] {
        let index = f.manager.extend(&mut tags).expect("extend");
        let entry = tags.child_mut(index).expect("entry");
        entry
            .key_mut()
            .expect("key")
            .set_value(Some(f.value("java.lang.String", key)));
        entry.set_value(value.map(|v| f.value("java.lang.Integer", v)));
    }
    let mut order = f.create("com.acme.Order");
    set(&mut order, "tags", tags);

    let m = f.marshaller();
    let xml = m.to_xml(&order).expect("encode");
    assert!(xml.contains("<tags class=\"map\">"), "{}", xml);
    assert!(
        xml.contains("<entry>\n      <string>k</string>\n      <int>7</int>\n    </entry>"),
        "{}",
        xml
    );
    assert!(
        xml.contains("<entry>\n      <string>n</string>\n      <null/>\n    </entry>"),
        "{}",
        xml
    );

    let decoded = m.from_xml(&xml).expect("decode");
    let tags = field(&decoded, "tags").expect("tags");
    let names: Vec<String> = tags.children().iter().map(|a| a.name().into_owned()).collect();
    assert_eq!(names, vec!["k", "n"]);
    assert_eq!(scalar(tags.child(0).and_then(|a| a.value())), Scalar::Int(7));
    assert!(!tags.child(1).expect("entry").is_set());
}

#[test]
fn test_object_field_keeps_concrete_type() {
    let f = Fixture::new();
    let mut order = f.create("com.acme.Order");
    set(&mut order, "owner", f.value("java.lang.String", "s & t"));

    let m = f.marshaller();
    let xml = m.to_xml(&order).expect("encode");
    assert!(xml.contains("<owner class=\"string\">s &amp; t</owner>"), "{}", xml);

    let decoded = m.from_xml(&xml).expect("decode");
    let owner = field(&decoded, "owner").expect("owner");
    assert_eq!(owner.ty().name(), "java.lang.String");
    assert_eq!(scalar(Some(owner)), Scalar::Text("s & t".into()));
}

#[test]
fn test_unknown_fields_skipped_and_missing_fields_added() {
    let f = Fixture::new();
    let xml = "<com.acme.Line><qty>5</qty><removed>x</removed></com.acme.Line>";
    let line = f.marshaller().from_xml(xml).expect("decode");
    let s = line.as_structure().expect("structure");
    assert_eq!(s.attribute("qty").expect("qty").state(), AttributeState::Defined);
    assert_eq!(scalar(field(&line, "qty")), Scalar::Int(5));
    let product = s.attribute("product").expect("product");
    assert_eq!(product.state(), AttributeState::Added);
    assert!(!product.is_set());
}

#[test]
fn test_unknown_concrete_type_skips_field() {
    let f = Fixture::new();
    let xml = "<com.acme.Order><owner class=\"com.acme.Gone\"/><label>x</label></com.acme.Order>";
    let order = f.marshaller().from_xml(xml).expect("decode");
    assert!(field(&order, "owner").is_none());
    assert_eq!(scalar(field(&order, "label")), Scalar::Text("x".into()));
}

#[test]
fn test_hard_failures() {
    let f = Fixture::new();
    let m = f.marshaller();
    assert!(matches!(
        m.from_xml("<com.acme.Gone/>"),
        Err(ConversionError::UnknownRootType(ref t)) if t == "com.acme.Gone"
    ));
    assert!(matches!(
        m.from_xml("<list><com.acme.Gone/></list>"),
        Err(ConversionError::UnknownType(_))
    ));
    assert!(matches!(
        m.from_xml("<map><entry><string>a</string></entry></map>"),
        Err(ConversionError::Malformed { .. })
    ));
    assert!(matches!(m.from_xml("<list>"), Err(ConversionError::Xml(_))));
    assert!(matches!(
        m.from_xml("<byte-array>not base64!</byte-array>"),
        Err(ConversionError::Malformed { .. })
    ));
    assert!(matches!(
        m.from_xml("<int>abc</int>"),
        Err(ConversionError::Model(_))
    ));
}

#[test]
fn test_hidden_fields_carry_declaring_type() {
    let f = Fixture::new();
    let mut derived = f.create("com.acme.Derived");
    derived
        .child_mut(0)
        .expect("id")
        .set_value(Some(f.value("java.lang.String", "x")));
    f.codecs
        .parse_into(
            derived
                .child_mut(1)
                .and_then(|a| a.value_mut())
                .and_then(Element::as_value_mut)
                .expect("base id"),
            "3",
        )
        .expect("parse");

    let m = f.marshaller();
    let xml = m.to_xml(&derived).expect("encode");
    assert!(xml.contains("<id>x</id>"), "{}", xml);
    assert!(xml.contains("<id defined-in=\"com.acme.Base\">3</id>"), "{}", xml);

    let decoded = m.from_xml(&xml).expect("decode");
    assert_eq!(scalar(decoded.child(0).and_then(|a| a.value())), Scalar::Text("x".into()));
    assert_eq!(scalar(decoded.child(1).and_then(|a| a.value())), Scalar::Int(3));
}

#[test]
fn test_file_roundtrip() {
    let f = Fixture::new();
    let mut order = f.create("com.acme.Order");
    set(&mut order, "label", f.value("java.lang.String", "saved"));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("order.xml");
    let m = f.marshaller().with_options(WriterOptions::default().with_declaration(true));
    m.write_file(&order, &path).expect("write");
    let text = std::fs::read_to_string(&path).expect("read");
    assert!(text.starts_with("<?xml"));

    let decoded = m.read_file(&path).expect("decode");
    assert_eq!(scalar(field(&decoded, "label")), Scalar::Text("saved".into()));
}

#[test]
fn test_non_xml_text_travels_as_base64() {
    let f = Fixture::new();
    let mut order = f.create("com.acme.Order");
    set(&mut order, "label", f.value("java.lang.String", "a\u{1}b"));
    set(&mut order, "owner", f.value("java.lang.String", "end\u{FFFF}"));

    let m = f.marshaller();
    let xml = m.to_xml(&order).expect("encode");
    assert!(xml.contains("<label encoding=\"base64\">YQFi</label>"), "{}", xml);
    assert!(xml.contains("<owner class=\"string\" encoding=\"base64\">"), "{}", xml);

    let decoded = m.from_xml(&xml).expect("decode");
    assert_eq!(scalar(field(&decoded, "label")), Scalar::Text("a\u{1}b".into()));
    assert_eq!(scalar(field(&decoded, "owner")), Scalar::Text("end\u{FFFF}".into()));
    assert_eq!(m.to_xml(&decoded).expect("re-encode"), xml);
}

#[test]
fn test_control_chars_in_char_values() {
    let f = Fixture::new();
    let mut initials = f.array("java.lang.Character", true, 1);
    f.push(&mut initials, Some(f.value_of_primitive("char", "a")));
    f.push(&mut initials, Some(f.value_of_primitive("char", "\u{1}")));
    let mut order = f.create("com.acme.Order");
    set(&mut order, "initials", initials);
    set(&mut order, "owner", f.value("java.lang.Character", "\u{1}"));

    let m = f.marshaller();
    let xml = m.to_xml(&order).expect("encode");
    assert!(xml.contains("<char>a</char>"), "{}", xml);
    assert!(xml.contains("<char encoding=\"base64\">AQ==</char>"), "{}", xml);

    let decoded = m.from_xml(&xml).expect("decode");
    let initials = field(&decoded, "initials").expect("initials");
    let chars: Vec<Scalar> = initials.children().iter().map(|a| scalar(a.value())).collect();
    assert_eq!(chars, vec![Scalar::Char('a'), Scalar::Char('\u{1}')]);
    let owner = field(&decoded, "owner").expect("owner");
    assert_eq!(owner.ty().name(), "java.lang.Character");
    assert_eq!(scalar(Some(owner)), Scalar::Char('\u{1}'));
}

#[test]
fn test_unknown_text_encoding_rejected() {
    let f = Fixture::new();
    let xml = "<com.acme.Line><product encoding=\"rot13\">x</product></com.acme.Line>";
    assert!(matches!(
        f.marshaller().from_xml(xml),
        Err(ConversionError::Malformed { .. })
    ));
}

#[test]
fn test_unassignable_concrete_type_skips_field() {
    let f = Fixture::new();
    let xml = "<com.acme.Order>\
        <first class=\"string\">x</first>\
        <lines class=\"int\">3</lines>\
        <label>kept</label>\
        </com.acme.Order>";
    let order = f.marshaller().from_xml(xml).expect("decode");
    assert!(field(&order, "first").is_none());
    assert!(field(&order, "lines").is_none());
    assert_eq!(scalar(field(&order, "label")), Scalar::Text("kept".into()));

    let xml = "<com.acme.Order><first><qty>4</qty></first></com.acme.Order>";
    let order = f.marshaller().from_xml(xml).expect("decode");
    let first = field(&order, "first").expect("first");
    assert_eq!(first.ty().name(), "com.acme.Line");
    assert_eq!(scalar(field(first, "qty")), Scalar::Int(4));
}
