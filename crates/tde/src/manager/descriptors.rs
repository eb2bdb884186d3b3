// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element descriptors: bundles of registrations applied to a manager.

use super::factory::{
    BagFactory, DateFactory, EnumFactory, ListFactory, MapFactory, ParsedFactory, TextFactory,
    WrapperFactory,
};
use super::{CollectionExtender, ElementManager, StructureFactory};
use crate::types::{ElementCategory, PrimitiveKind, OBJECT_TYPE};
use std::sync::Arc;

/// A set of factory, category and extender registrations.
pub trait ElementDescriptor: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    fn register(&self, manager: &mut ElementManager);
}

/// Strings, wrappers, enums, dates, string-based types and plain classes.
pub struct BaseDescriptor;

const TEXT_TYPES: [&str; 3] = [
    "java.lang.String",
    "java.lang.StringBuilder",
    "java.lang.StringBuffer",
];

const PARSED_TYPES: [&str; 4] = [
    "java.net.URL",
    "java.math.BigInteger",
    "java.math.BigDecimal",
    "java.io.File",
];

impl ElementDescriptor for BaseDescriptor {
    fn name(&self) -> &str {
        "base"
    }

    fn register(&self, manager: &mut ElementManager) {
        let text = Arc::new(TextFactory);
        for name in TEXT_TYPES {
            manager.register_type_factory(name, text.clone());
            manager.register_type_category(name, ElementCategory::Value);
        }

        let wrapper = Arc::new(WrapperFactory);
        for kind in PrimitiveKind::ALL {
            manager.register_type_factory(kind.wrapper_name(), wrapper.clone());
            manager.register_type_category(kind.wrapper_name(), ElementCategory::Value);
        }

        manager.register_supertype_factory("java.lang.Enum", Arc::new(EnumFactory));
        manager.register_supertype_category("java.lang.Enum", ElementCategory::Value);

        manager.register_type_factory("java.util.Date", Arc::new(DateFactory));
        manager.register_type_category("java.util.Date", ElementCategory::Value);

        let parsed = Arc::new(ParsedFactory);
        for name in PARSED_TYPES {
            manager.register_type_factory(name, parsed.clone());
            manager.register_type_category(name, ElementCategory::Value);
        }

        manager.register_supertype_factory(OBJECT_TYPE, Arc::new(StructureFactory));
    }
}

/// `java.util` lists, sets, collections and maps.
///
/// Bound both exactly (the interfaces themselves get dedicated factories)
/// and as supertypes (implementations classify and build the same way).
pub struct CollectionDescriptor;

impl ElementDescriptor for CollectionDescriptor {
    fn name(&self) -> &str {
        "collection"
    }

    fn register(&self, manager: &mut ElementManager) {
        let extender = Arc::new(CollectionExtender);
        let bindings: [(&str, Arc<dyn super::ElementFactory>); 4] = [
            ("java.util.List", Arc::new(ListFactory)),
            ("java.util.Set", Arc::new(BagFactory)),
            ("java.util.Map", Arc::new(MapFactory)),
            ("java.util.Collection", Arc::new(BagFactory)),
        ];
        for (name, factory) in bindings {
            manager.register_type_factory(name, factory.clone());
            manager.register_supertype_factory(name, factory);
            manager.register_type_category(name, ElementCategory::Collection);
            manager.register_supertype_category(name, ElementCategory::Collection);
            manager.register_supertype_extender(name, extender.clone());
        }
    }
}
