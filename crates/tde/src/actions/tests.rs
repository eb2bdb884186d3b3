// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Action lookup and built-in action tests.

use super::*;
use crate::catalog::{TypeCatalog, TypeDecl};
use crate::context::{ActionEntry, AppContext, BuiltinComponents, ComponentRegistry, Components};
use crate::editor::{Document, Edit};
use crate::model::{Element, ElementKind};
use crate::types::{ElementCategory, FieldInfo, Monitor, TypeError, TypeResolver};
use std::sync::Arc;

const SHAPE: usize = 0;
const ITEMS: usize = 1;
const DATA: usize = 2;
const TAGS: usize = 3;
const COUNT: usize = 4;

fn catalog() -> TypeCatalog {
    let mut c = TypeCatalog::with_jdk();
    c.insert(TypeDecl::abstract_class("com.acme.Shape").field("name", "String"));
    c.insert(TypeDecl::class("com.acme.Circle").extends("com.acme.Shape").field("r", "double"));
    c.insert(TypeDecl::class("com.acme.Square").extends("com.acme.Shape").field("side", "double"));
    c.insert(
        TypeDecl::class("com.acme.Drawing")
            .field("shape", "com.acme.Shape")
            .field("items", "java.util.List")
            .field("data", "Object")
            .field("tags", "java.util.Map")
            .field("count", "int"),
    );
    c
}

fn document() -> Document {
    let ctx = Arc::new(AppContext::builtin(Arc::new(catalog())));
    Document::create(ctx, "com.acme.Drawing").unwrap()
}

/// Replays canned answers.
#[derive(Default)]
struct Script {
    dimensions: Option<u32>,
    pick: Option<&'static str>,
    primitive: bool,
    offered: Vec<String>,
    token: crate::jobs::CancelToken,
}

impl ActionInput for Script {
    fn dimensions(&mut self) -> Option<u32> {
        self.dimensions
    }

    fn choose_type(&mut self, candidates: &[TypeHandle]) -> Option<TypeHandle> {
        self.offered = candidates.iter().map(|t| t.name().to_string()).collect();
        let pick = self.pick?;
        candidates.iter().find(|t| t.name() == pick).cloned()
    }

    fn primitive_component(&mut self, _ty: &TypeHandle) -> bool {
        self.primitive
    }

    fn cancel_token(&self) -> crate::jobs::CancelToken {
        self.token.clone()
    }
}

fn labels(actions: &[Arc<dyn DataAction>]) -> Vec<&str> {
    actions.iter().map(|a| a.label()).collect()
}

fn enabled(doc: &Document, target: &Path) -> Vec<String> {
    let actions = doc.context().actions().enabled_for(doc, target).unwrap();
    labels(&actions).into_iter().map(String::from).collect()
}

fn perform(doc: &mut Document, label: &str, target: &Path, input: &mut Script) -> ActionOutcome {
    let actions = doc.context().actions().enabled_for(doc, target).unwrap();
    let action = actions
        .into_iter()
        .find(|a| a.label() == label)
        .unwrap_or_else(|| panic!("{} not enabled at {}", label, target));
    action.perform(doc, target, input).unwrap()
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

struct Named(&'static str);

impl DataAction for Named {
    fn label(&self) -> &str {
        self.0
    }

    fn is_enabled(&self, _doc: &Document, _target: &Path) -> bool {
        true
    }

    fn perform(
        &self,
        _doc: &mut Document,
        _target: &Path,
        _input: &mut dyn ActionInput,
    ) -> Result<ActionOutcome, ModelError> {
        Ok(ActionOutcome::Applied)
    }
}

#[test]
fn test_lookup_order_and_dedup() {
    let c = catalog();
    let shared: Arc<dyn DataAction> = Arc::new(Named("shared"));
    let mut actions = ActionManager::new();
    actions.register(OBJECT, false, Arc::new(Named("object")));
    actions.register("com.acme.Shape", false, Arc::new(Named("shape")));
    actions.register("com.acme.Shape", false, shared.clone());
    actions.register("com.acme.Circle", true, Arc::new(Named("circle")));
    actions.register("com.acme.Circle", true, shared);

    let circle = c.resolve_type("com.acme.Circle").unwrap().unwrap();
    let found = actions.actions_for(&c, &circle).unwrap();
    assert_eq!(labels(&found), vec!["circle", "shared", "shape", "object"]);

    // Concrete-only bindings do not reach descendants.
    let square = c.resolve_type("com.acme.Square").unwrap().unwrap();
    let found = actions.actions_for(&c, &square).unwrap();
    assert_eq!(labels(&found), vec!["shape", "shared", "object"]);
}

const OBJECT: &str = crate::types::OBJECT_TYPE;

#[test]
fn test_interfaces_get_object_actions() {
    let c = catalog();
    let mut actions = ActionManager::new();
    actions.register(OBJECT, false, Arc::new(Named("object")));
    let list = c.resolve_type("java.util.List").unwrap().unwrap();
    assert_eq!(labels(&actions.actions_for(&c, &list).unwrap()), vec!["object"]);
}

#[test]
fn test_registry_entries_reach_manager() {
    struct Extra;
    impl ComponentRegistry for Extra {
        fn actions(&self) -> Vec<ActionEntry> {
            vec![ActionEntry::new("com.acme.Drawing", true, Arc::new(Named("inspect")))]
        }
    }
    let components = Components::new().with(BuiltinComponents).with(Extra);
    let ctx = Arc::new(AppContext::initialize(Arc::new(catalog()), &components));
    let doc = Document::create(ctx, "com.acme.Drawing").unwrap();
    assert!(enabled(&doc, &Path::root().child(COUNT)).contains(&"inspect".to_string()));
}

// ---------------------------------------------------------------------------
// Built-ins
// ---------------------------------------------------------------------------

#[test]
fn test_enabled_sets() {
    let doc = document();
    // Primitive: nothing to reset or instantiate.
    assert!(enabled(&doc, &Path::root().child(COUNT)).is_empty());
    let data = enabled(&doc, &Path::root().child(DATA));
    assert_eq!(data, vec!["New instance", "Create array"]);
    let shape = enabled(&doc, &Path::root().child(SHAPE));
    assert_eq!(shape, vec!["New instance"]);
}

#[test]
fn test_new_instance_picks_subtype() {
    let mut doc = document();
    let target = Path::root().child(SHAPE);
    let mut input = Script {
        pick: Some("com.acme.Circle"),
        ..Script::default()
    };
    assert_eq!(perform(&mut doc, "New instance", &target, &mut input), ActionOutcome::Applied);
    assert_eq!(input.offered, vec!["com.acme.Circle", "com.acme.Square"]);
    assert_eq!(doc.current(), &target);
    let shape = doc.attribute(&target).unwrap().value().unwrap();
    assert_eq!(shape.ty().name(), "com.acme.Circle");
    assert!(enabled(&doc, &target).contains(&"Reset".to_string()));
}

#[test]
fn test_cancel_leaves_document_untouched() {
    let mut doc = document();
    let target = Path::root().child(SHAPE);
    let seq = doc.last_seq();

    let mut declined = Script::default();
    assert_eq!(perform(&mut doc, "New instance", &target, &mut declined), ActionOutcome::Canceled);

    let mut canceled = Script {
        pick: Some("com.acme.Circle"),
        ..Script::default()
    };
    canceled.token.cancel();
    assert_eq!(perform(&mut doc, "New instance", &target, &mut canceled), ActionOutcome::Canceled);
    assert!(canceled.offered.is_empty());

    assert_eq!(doc.last_seq(), seq);
    assert!(!doc.attribute(&target).unwrap().is_set());
}

#[test]
fn test_new_instance_uses_dedicated_factory() {
    let mut doc = document();
    let items = Path::root().child(ITEMS);
    let mut input = Script::default();
    assert_eq!(perform(&mut doc, "New instance", &items, &mut input), ActionOutcome::Applied);
    assert!(input.offered.is_empty());
    assert_eq!(doc.current(), &items);

    // List slots are Object: the concrete type has to be picked.
    doc.apply(Edit::Extend { element: items.clone() }).unwrap();
    let slot = items.child(0);
    let mut input = Script {
        pick: Some("java.lang.String"),
        ..Script::default()
    };
    perform(&mut doc, "New instance", &slot, &mut input);
    assert!(input.offered.contains(&"com.acme.Circle".to_string()));
    assert!(!input.offered.contains(&"com.acme.Shape".to_string()));
    let value = doc.attribute(&slot).unwrap().value().unwrap();
    assert_eq!(value.kind(), ElementKind::Value);
    // Leaves are edited in place, not entered.
    assert_eq!(doc.current(), &items);
}

#[test]
fn test_create_primitive_array() {
    let mut doc = document();
    let target = Path::root().child(DATA);
    let mut input = Script {
        dimensions: Some(2),
        pick: Some("java.lang.Integer"),
        primitive: true,
        ..Script::default()
    };
    assert_eq!(perform(&mut doc, "Create array", &target, &mut input), ActionOutcome::Applied);
    let array = doc.attribute(&target).unwrap().value().unwrap();
    assert_eq!(array.ty().category(), ElementCategory::PrimitiveArray);
    assert_eq!(array.ty().dimensions(), 2);
    assert_eq!(doc.current(), &target);

    let mut zero = Script {
        dimensions: Some(0),
        ..Script::default()
    };
    let action = CreateArrayAction;
    assert!(matches!(
        action.perform(&mut doc, &Path::root().child(DATA), &mut zero),
        Err(ModelError::InvalidDimensions(0))
    ));
}

#[test]
fn test_move_and_remove_bounds() {
    let mut doc = document();
    let items = Path::root().child(ITEMS);
    let list = doc.context().manager().create_by_name("java.util.ArrayList").unwrap();
    doc.apply(Edit::SetValue {
        path: items.clone(),
        value: Some(list),
    })
    .unwrap();
    doc.apply(Edit::Extend { element: items.clone() }).unwrap();
    doc.apply(Edit::Extend { element: items.clone() }).unwrap();

    let first = enabled(&doc, &items.child(0));
    assert!(first.contains(&"Move down".to_string()));
    assert!(!first.contains(&"Move up".to_string()));
    let last = enabled(&doc, &items.child(1));
    assert!(last.contains(&"Move up".to_string()));
    assert!(!last.contains(&"Move down".to_string()));

    perform(&mut doc, "Remove", &items.child(0), &mut Script::default());
    assert_eq!(doc.root().element_at(&items).map(Element::child_count), Some(1));
}

#[test]
fn test_edit_key_creates_and_enters_key() {
    let mut doc = document();
    let tags = Path::root().child(TAGS);
    let map = doc.context().manager().create_by_name("java.util.HashMap").unwrap();
    doc.apply(Edit::SetValue {
        path: tags.clone(),
        value: Some(map),
    })
    .unwrap();
    doc.apply(Edit::Extend { element: tags.clone() }).unwrap();

    let entry = tags.child(0);
    assert!(enabled(&doc, &entry).contains(&"Edit key".to_string()));
    let mut input = Script {
        pick: Some("com.acme.Circle"),
        ..Script::default()
    };
    assert_eq!(perform(&mut doc, "Edit key", &entry, &mut input), ActionOutcome::Applied);
    assert_eq!(doc.current(), &tags.key(0));
    assert_eq!(doc.current_element().ty().name(), "com.acme.Circle");
}

/// Catalog whose subtype enumeration panics.
struct BrokenSearch(TypeCatalog);

impl TypeResolver for BrokenSearch {
    fn resolve_type(&self, name: &str) -> Result<Option<TypeHandle>, TypeError> {
        self.0.resolve_type(name)
    }

    fn fields_of(&self, ty: &TypeHandle) -> Result<Vec<FieldInfo>, TypeError> {
        self.0.fields_of(ty)
    }

    fn superclass_of(&self, ty: &TypeHandle) -> Result<Option<TypeHandle>, TypeError> {
        self.0.superclass_of(ty)
    }

    fn interfaces_of(&self, ty: &TypeHandle) -> Result<Vec<TypeHandle>, TypeError> {
        self.0.interfaces_of(ty)
    }

    fn subtypes_of(
        &self,
        _ty: &TypeHandle,
        _monitor: &dyn Monitor,
    ) -> Result<Vec<TypeHandle>, TypeError> {
        panic!("index corrupted")
    }

    fn enum_constants(&self, ty: &TypeHandle) -> Result<Vec<String>, TypeError> {
        self.0.enum_constants(ty)
    }

    fn qualify(
        &self,
        declaring: &TypeHandle,
        name: &str,
    ) -> Result<Option<TypeHandle>, TypeError> {
        self.0.qualify(declaring, name)
    }
}

#[test]
fn test_search_panic_is_a_technical_error() {
    let ctx = Arc::new(AppContext::builtin(Arc::new(BrokenSearch(catalog()))));
    let mut doc = Document::create(ctx, "com.acme.Drawing").unwrap();
    let target = Path::root().child(SHAPE);
    let seq = doc.last_seq();

    let actions = doc.context().actions().enabled_for(&doc, &target).unwrap();
    let new_instance = actions.iter().find(|a| a.label() == "New instance").unwrap();
    let mut input = Script {
        pick: Some("com.acme.Circle"),
        ..Script::default()
    };
    let err = new_instance.perform(&mut doc, &target, &mut input).unwrap_err();
    assert!(err.is_technical(), "{}", err);
    assert!(err.to_string().contains("index corrupted"));
    assert_eq!(doc.last_seq(), seq);

    let data = Path::root().child(DATA);
    let actions = doc.context().actions().enabled_for(&doc, &data).unwrap();
    let create_array = actions.iter().find(|a| a.label() == "Create array").unwrap();
    let mut input = Script {
        dimensions: Some(1),
        ..Script::default()
    };
    let err = create_array.perform(&mut doc, &data, &mut input).unwrap_err();
    assert!(err.is_technical());
}
