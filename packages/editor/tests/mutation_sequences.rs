//! Tests for longer mutation sequences
//!
//! This tests:
//! - Undo/redo across mixed structural edits
//! - Batched mutations
//! - Template integrity after operations

use pagecraft_document::{BlockKind, Template, TemplateType};
use pagecraft_editor::{BlockPatch, Builder, DragPayload, HoverEvent};
use pagecraft_registry::BuiltinRegistry;
use serde_json::json;
use std::sync::Arc;

fn builder() -> Builder {
    Builder::new(
        Template::blank("category", "Category", TemplateType::Category),
        Arc::new(BuiltinRegistry::new()),
    )
    .unwrap()
}

#[test]
fn test_undo_every_step_back_to_blank() {
    let mut b = builder();
    let blank = b.template().clone();
    let mut snapshots = vec![blank.clone()];

    let sid = b.add_section(None).created_id().unwrap().to_string();
    snapshots.push(b.template().clone());
    let bid = b
        .add_block_from_type(&sid, BlockKind::ArticleList, None)
        .created_id()
        .unwrap()
        .to_string();
    snapshots.push(b.template().clone());
    b.duplicate_block(&sid, &bid);
    snapshots.push(b.template().clone());
    b.duplicate_section(&sid);
    snapshots.push(b.template().clone());
    b.move_section(0, 1);
    snapshots.push(b.template().clone());
    b.delete_section(&sid);
    snapshots.push(b.template().clone());

    // Walk back through every snapshot, then forward again
    for expected in snapshots.iter().rev().skip(1) {
        assert!(b.undo());
        assert_eq!(b.template(), expected);
    }
    assert!(!b.undo());

    for expected in snapshots.iter().skip(1) {
        assert!(b.redo());
        assert_eq!(b.template(), expected);
    }
    assert!(!b.redo());
}

#[test]
fn test_new_mutation_clears_redo() {
    let mut b = builder();
    b.add_section(None);
    b.add_section(None);
    b.undo();
    assert!(b.can_redo());

    b.add_section(Some(0));
    assert!(!b.can_redo());
}

#[test]
fn test_edit_in_batch_after_undo_is_not_lost_to_redo() {
    let mut b = builder();
    b.add_section(None);
    b.add_section(None);
    b.undo();
    assert!(b.can_redo());

    b.begin_batch("Add hero");
    let sid = b.add_section(None).created_id().unwrap().to_string();
    assert!(!b.can_redo());
    assert!(!b.redo());
    b.end_batch();

    assert_eq!(b.template().sections.len(), 2);
    assert!(b.template().section(&sid).is_some());

    b.undo();
    assert!(b.template().section(&sid).is_none());
    assert!(b.redo());
    assert!(b.template().section(&sid).is_some());
}

#[test]
fn test_redo_closes_open_batch() {
    let mut b = builder();
    b.add_section(None);
    b.begin_batch("Add two");
    b.add_section(None);
    b.add_section(None);

    assert!(!b.redo());
    assert_eq!(b.undo_description(), Some("Add two"));
    assert!(b.undo());
    assert_eq!(b.template().sections.len(), 1);
}

#[test]
fn test_batched_drop_and_config_edit() {
    let mut b = builder();
    let sid = b.add_section(None).created_id().unwrap().to_string();
    let before = b.template().clone();

    b.begin_batch("Add configured grid");
    b.start_drag(DragPayload::decode("article-grid"));
    b.drag_over(&HoverEvent::section(&sid));
    let bid = b.drop().created_id().unwrap().to_string();
    b.update_block(
        &sid,
        &bid,
        BlockPatch {
            merge_config: json!({ "limit": 9 }).as_object().cloned(),
            ..Default::default()
        },
    );
    b.end_batch();

    assert_eq!(b.template().block(&bid).unwrap().config.get("limit"), Some(&json!(9)));
    assert!(b.undo());
    assert_eq!(b.template(), &before);
    assert!(b.redo());
    assert!(b.template().block(&bid).is_some());
}

#[test]
fn test_history_depth_is_bounded() {
    let mut b = builder().with_history_depth(3);
    for _ in 0..6 {
        b.add_section(None);
    }

    let mut undone = 0;
    while b.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(b.template().sections.len(), 3);
}

#[test]
fn test_relocate_then_undo_restores_original_id() {
    let mut b = builder();
    let a = b.add_section(None).created_id().unwrap().to_string();
    let c = b.add_section(None).created_id().unwrap().to_string();
    let bid = b
        .add_block_from_type(&a, BlockKind::MostRead, None)
        .created_id()
        .unwrap()
        .to_string();

    b.start_drag(DragPayload::decode(&format!("block:{}", bid)));
    b.drag_over(&HoverEvent::section(&c));
    assert!(b.drop().is_applied());
    assert!(b.template().block(&bid).is_none());

    b.undo();
    assert_eq!(b.template().find_block(&bid), Some((0, 0)));
    assert!(b.template().validate().is_ok());
}
