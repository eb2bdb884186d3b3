// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JDK types known to every catalog built with [`TypeCatalog::with_jdk`].
//!
//! Only the hierarchy matters here: the built-in descriptors give all of
//! these types dedicated factories, so none of their fields are declared.
//!
//! [`TypeCatalog::with_jdk`]: super::TypeCatalog::with_jdk

use super::TypeDecl;
use crate::types::PrimitiveKind;

const SERIALIZABLE: &str = "java.io.Serializable";
const COMPARABLE: &str = "java.lang.Comparable";
const CHAR_SEQUENCE: &str = "java.lang.CharSequence";

pub(super) fn declarations() -> Vec<TypeDecl> {
    let mut decls = vec![
        TypeDecl::class("java.lang.Object"),
        TypeDecl::interface(SERIALIZABLE),
        TypeDecl::interface("java.lang.Cloneable"),
        TypeDecl::interface(COMPARABLE).type_param("T"),
        TypeDecl::interface(CHAR_SEQUENCE),
        TypeDecl::interface("java.lang.Iterable").type_param("T"),
        TypeDecl::abstract_class("java.lang.Number").implements(SERIALIZABLE),
        TypeDecl::abstract_class("java.lang.Enum")
            .type_param("E")
            .implements(COMPARABLE)
            .implements(SERIALIZABLE),
        TypeDecl::final_class("java.lang.String")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE)
            .implements(CHAR_SEQUENCE),
        TypeDecl::final_class("java.lang.StringBuilder")
            .implements(SERIALIZABLE)
            .implements(CHAR_SEQUENCE),
        TypeDecl::final_class("java.lang.StringBuffer")
            .implements(SERIALIZABLE)
            .implements(CHAR_SEQUENCE),
        TypeDecl::class("java.util.Date")
            .implements(SERIALIZABLE)
            .implements("java.lang.Cloneable")
            .implements(COMPARABLE),
        TypeDecl::class("java.math.BigInteger")
            .extends("java.lang.Number")
            .implements(COMPARABLE),
        TypeDecl::class("java.math.BigDecimal")
            .extends("java.lang.Number")
            .implements(COMPARABLE),
        TypeDecl::final_class("java.net.URL").implements(SERIALIZABLE),
        TypeDecl::class("java.io.File")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE),
        // collections
        TypeDecl::interface("java.util.Collection")
            .type_param("E")
            .implements("java.lang.Iterable"),
        TypeDecl::interface("java.util.List")
            .type_param("E")
            .implements("java.util.Collection"),
        TypeDecl::interface("java.util.Set")
            .type_param("E")
            .implements("java.util.Collection"),
        TypeDecl::interface("java.util.SortedSet")
            .type_param("E")
            .implements("java.util.Set"),
        TypeDecl::interface("java.util.Map")
            .type_param("K")
            .type_param("V"),
        TypeDecl::interface("java.util.SortedMap")
            .type_param("K")
            .type_param("V")
            .implements("java.util.Map"),
        TypeDecl::interface("java.util.Map$Entry")
            .type_param("K")
            .type_param("V"),
        TypeDecl::abstract_class("java.util.AbstractCollection")
            .type_param("E")
            .implements("java.util.Collection"),
        TypeDecl::abstract_class("java.util.AbstractList")
            .type_param("E")
            .extends("java.util.AbstractCollection")
            .implements("java.util.List"),
        TypeDecl::class("java.util.ArrayList")
            .type_param("E")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements(SERIALIZABLE),
        TypeDecl::class("java.util.LinkedList")
            .type_param("E")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements(SERIALIZABLE),
        TypeDecl::abstract_class("java.util.AbstractSet")
            .type_param("E")
            .extends("java.util.AbstractCollection")
            .implements("java.util.Set"),
        TypeDecl::class("java.util.HashSet")
            .type_param("E")
            .extends("java.util.AbstractSet")
            .implements("java.util.Set")
            .implements(SERIALIZABLE),
        TypeDecl::class("java.util.TreeSet")
            .type_param("E")
            .extends("java.util.AbstractSet")
            .implements("java.util.SortedSet")
            .implements(SERIALIZABLE),
        TypeDecl::abstract_class("java.util.AbstractMap")
            .type_param("K")
            .type_param("V")
            .implements("java.util.Map"),
        TypeDecl::class("java.util.HashMap")
            .type_param("K")
            .type_param("V")
            .extends("java.util.AbstractMap")
            .implements("java.util.Map")
            .implements(SERIALIZABLE),
        TypeDecl::class("java.util.LinkedHashMap")
            .type_param("K")
            .type_param("V")
            .extends("java.util.HashMap")
            .implements("java.util.Map"),
        TypeDecl::class("java.util.TreeMap")
            .type_param("K")
            .type_param("V")
            .extends("java.util.AbstractMap")
            .implements("java.util.SortedMap")
            .implements(SERIALIZABLE),
    ];

    for kind in PrimitiveKind::ALL {
        let wrapper = TypeDecl::final_class(kind.wrapper_name()).implements(COMPARABLE);
        decls.push(match kind {
            PrimitiveKind::Boolean | PrimitiveKind::Char => wrapper.implements(SERIALIZABLE),
            _ => wrapper.extends("java.lang.Number"),
        });
    }
    decls
}
