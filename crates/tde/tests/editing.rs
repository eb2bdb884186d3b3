// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! End-to-end editing: YAML catalog, document edits, actions, files.

#![cfg(feature = "catalog-loaders")]

use std::sync::Arc;
use tde::actions::{ActionInput, ActionOutcome};
use tde::catalog::{TypeCatalog, YamlCatalogLoader};
use tde::editor::Row;
use tde::model::{ModelEvent, Path};
use tde::{AppContext, AttributeState, Document, Edit, TypeHandle};

const SHAPES_V1: &str = r#"
types:
  - name: com.acme.Shape
    abstract: true
    fields:
      - { name: label, type: String }
  - name: com.acme.Circle
    superclass: com.acme.Shape
    fields:
      - { name: radius, type: double }
  - name: com.acme.Board
    fields:
      - { name: shapes, type: "java.util.List<com.acme.Shape>" }
"#;

const SHAPES_V2: &str = r#"
types:
  - name: com.acme.Shape
    abstract: true
    fields:
      - { name: label, type: String }
  - name: com.acme.Circle
    superclass: com.acme.Shape
    fields:
      - { name: radius, type: double }
      - { name: filled, type: boolean }
  - name: com.acme.Board
    fields:
      - { name: shapes, type: "java.util.List<com.acme.Shape>" }
"#;

fn context(yaml: &str) -> Arc<AppContext> {
    let mut catalog = TypeCatalog::with_jdk();
    let doc = YamlCatalogLoader::parse_yaml(yaml).unwrap();
    YamlCatalogLoader::apply(&doc, &mut catalog).unwrap();
    Arc::new(AppContext::builtin(Arc::new(catalog)))
}

/// Always picks `com.acme.Circle`.
struct PickCircle;

impl ActionInput for PickCircle {
    fn dimensions(&mut self) -> Option<u32> {
        None
    }

    fn choose_type(&mut self, candidates: &[TypeHandle]) -> Option<TypeHandle> {
        candidates.iter().find(|t| t.name() == "com.acme.Circle").cloned()
    }
}

fn run(doc: &mut Document, label: &str, target: &Path) -> ActionOutcome {
    let ctx = doc.context().clone();
    let action = ctx
        .actions()
        .enabled_for(doc, target)
        .unwrap()
        .into_iter()
        .find(|a| a.label() == label)
        .unwrap_or_else(|| panic!("{} not enabled at {}", label, target));
    action.perform(doc, target, &mut PickCircle).unwrap()
}

/// Board with one circle labeled "sun" and radius 2.5.
fn board(ctx: &Arc<AppContext>) -> Document {
    let mut doc = Document::create(ctx.clone(), "com.acme.Board").unwrap();
    let shapes = Path::root().child(0);
    assert_eq!(run(&mut doc, "New instance", &shapes), ActionOutcome::Applied);
    assert_eq!(doc.current(), &shapes);
    assert_eq!(doc.rows(), vec![Row::Insert]);

    doc.apply(Edit::Extend {
        element: shapes.clone(),
    })
    .unwrap();
    let slot = shapes.child(0);
    assert_eq!(run(&mut doc, "New instance", &slot), ActionOutcome::Applied);
    assert_eq!(doc.current(), &slot);

    for (name, text) in [("label", "sun"), ("radius", "2.5")] {
        doc.apply(Edit::SetText {
            path: slot.child(field_index(&doc, name)),
            text: text.to_string(),
        })
        .unwrap();
    }
    doc
}

/// Index of field `name` in the current element.
fn field_index(doc: &Document, name: &str) -> usize {
    doc.current_element()
        .as_structure()
        .and_then(|s| s.index_of(name))
        .unwrap_or_else(|| panic!("no field {}", name))
}

#[test]
fn build_save_and_reopen() {
    let ctx = context(SHAPES_V1);
    let mut doc = board(&ctx);
    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("<shapes>"), "{}", xml);
    assert!(xml.contains("<label>sun</label>"), "{}", xml);
    assert!(xml.contains("<com.acme.Circle>"), "{}", xml);
    assert!(xml.contains("<radius>2.5</radius>"), "{}", xml);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("board.xml");
    assert!(doc.is_dirty());
    doc.save(&file).unwrap();
    assert!(!doc.is_dirty());

    let reopened = Document::open(ctx, &file).unwrap();
    assert_eq!(reopened.to_xml().unwrap(), xml);
    assert!(reopened.attributes_in_state(AttributeState::Added).is_empty());
}

#[test]
fn new_fields_load_as_added() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("board.xml");
    board(&context(SHAPES_V1)).save(&file).unwrap();

    let mut reopened = Document::open(context(SHAPES_V2), &file).unwrap();
    let circle = Path::root().child(0).child(0);
    reopened.step_to(circle.clone()).unwrap();
    let added = reopened.attributes_in_state(AttributeState::Added);
    assert_eq!(added, vec![circle.child(field_index(&reopened, "filled"))]);
    let filled = reopened.attribute(&added[0]).unwrap();
    assert_eq!(filled.name(), "filled");
    assert_eq!(filled.value_label(), "false");
}

#[test]
fn events_track_every_change() {
    let ctx = context(SHAPES_V1);
    let mut doc = board(&ctx);
    let mark = doc.last_seq();
    let slot = Path::root().child(0).child(0);

    assert_eq!(run(&mut doc, "Remove", &slot), ActionOutcome::Applied);
    let events: Vec<ModelEvent> = doc.events_since(mark).iter().map(|s| s.event.clone()).collect();
    assert_eq!(
        events,
        vec![
            ModelEvent::AttributeRemoved {
                element: Path::root().child(0),
                index: 0,
            },
            ModelEvent::CurrentChanged {
                path: Path::root().child(0),
            },
        ]
    );
    assert_eq!(doc.current(), &Path::root().child(0));
}
