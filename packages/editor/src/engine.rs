//! # Builder Editing Engine
//!
//! Owns the live template plus the transient editor state (selection, hover,
//! drag mode, drop target). Every document change goes through
//! [`Builder::apply`]; the typed helpers are thin wrappers around it.
//!
//! ## Modes
//!
//! ```text
//!            start_drag(payload)
//!   Idle ───────────────────────▶ Dragging(payload)
//!    ▲                                 │
//!    └──────── end_drag / drop ────────┘   (drop target always cleared)
//! ```

use crate::drop_target::{resolve_drop_target, DragPayload, HoverEvent};
use crate::mutations::{Effect, Mutation, MutationError};
use crate::patch::{BlockPatch, SectionPatch, TemplatePatch};
use crate::undo_stack::UndoStack;
use crate::{DropTarget, EditorError, ElementRef};
use pagecraft_common::{FileSystem, RealFileSystem};
use pagecraft_document::{codec, BlockKind, IdGenerator, Template};
use pagecraft_registry::BlockRegistry;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    Dragging(DragPayload),
}

/// Result of a mutation request
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Applied { version: u64, effect: Effect },
    Noop { reason: MutationError },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    /// Id of the section or block the mutation created
    pub fn created_id(&self) -> Option<&str> {
        match self {
            MutationOutcome::Applied { effect, .. } => effect.created_id(),
            MutationOutcome::Noop { .. } => None,
        }
    }

    pub fn noop_reason(&self) -> Option<&MutationError> {
        match self {
            MutationOutcome::Noop { reason } => Some(reason),
            MutationOutcome::Applied { .. } => None,
        }
    }
}

/// The single in-memory editing session
pub struct Builder {
    template: Template,
    ids: IdGenerator,
    registry: Arc<dyn BlockRegistry>,
    selection: Option<ElementRef>,
    hover: Option<ElementRef>,
    mode: EditorMode,
    drop_target: Option<DropTarget>,
    /// Increments on each applied mutation, undo and redo
    version: u64,
    saved_version: u64,
    history: UndoStack,
}

impl Builder {
    /// Start a session on `template`. Fails if the template breaks the
    /// identity invariant.
    pub fn new(template: Template, registry: Arc<dyn BlockRegistry>) -> Result<Self, EditorError> {
        template.validate()?;
        let ids = template.id_generator();
        Ok(Self {
            template,
            ids,
            registry,
            selection: None,
            hover: None,
            mode: EditorMode::Idle,
            drop_target: None,
            version: 0,
            saved_version: 0,
            history: UndoStack::new(),
        })
    }

    /// Start a session from persisted content.
    ///
    /// Malformed content is not an error: it means there is no template, and
    /// the caller shows the empty state or falls back to a blank template.
    pub fn from_persisted(payload: &str, registry: Arc<dyn BlockRegistry>) -> Option<Self> {
        let template = codec::parse_persisted(payload)?;
        match Self::new(template, registry) {
            Ok(builder) => Some(builder),
            Err(e) => {
                tracing::warn!("Persisted template rejected: {}", e);
                None
            }
        }
    }

    /// Load a template file for editing. A missing or malformed file is
    /// [`EditorError::NoTemplate`].
    pub fn open(path: &Path, registry: Arc<dyn BlockRegistry>) -> Result<Self, EditorError> {
        Self::open_with(&RealFileSystem, path, registry)
    }

    pub fn open_with(
        fs: &dyn FileSystem,
        path: &Path,
        registry: Arc<dyn BlockRegistry>,
    ) -> Result<Self, EditorError> {
        let template = fs
            .read(path)?
            .and_then(|payload| codec::parse_persisted(&payload))
            .ok_or_else(|| EditorError::NoTemplate(path.display().to_string()))?;
        tracing::info!("Opened template {} from {}", template.id, path.display());
        Self::new(template, registry)
    }

    /// Write the template to `path` and mark the current version saved
    pub fn save(&mut self, path: &Path) -> Result<(), EditorError> {
        self.save_with(&RealFileSystem, path)
    }

    /// A failed write leaves the session dirty
    pub fn save_with(&mut self, fs: &dyn FileSystem, path: &Path) -> Result<(), EditorError> {
        fs.write(path, &codec::to_json_pretty(&self.template)?)?;
        self.mark_saved();
        tracing::info!("Saved template {} (v{})", self.template.id, self.version);
        Ok(())
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = UndoStack::with_max_levels(depth);
        self
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(codec::to_json(&self.template)?)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn into_template(self) -> Template {
        self.template
    }

    pub fn registry(&self) -> &dyn BlockRegistry {
        self.registry.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    /// Record that the current version has been persisted
    pub fn mark_saved(&mut self) {
        self.saved_version = self.version;
    }

    pub fn selection(&self) -> Option<&ElementRef> {
        self.selection.as_ref()
    }

    pub fn hover(&self) -> Option<&ElementRef> {
        self.hover.as_ref()
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.mode, EditorMode::Dragging(_))
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.drop_target.as_ref()
    }

    // ---- mutation entry point ----

    /// Apply a mutation atomically; missing ids and other invalid requests
    /// are absorbed as [`MutationOutcome::Noop`].
    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        let before = self.template.clone();

        match mutation.apply(&mut self.template, &mut self.ids, self.registry.as_ref()) {
            Ok(effect) => {
                self.version += 1;
                self.history.record(before, &self.template, mutation.describe());
                self.apply_transient_effects(&effect);
                tracing::debug!("{} applied (v{})", mutation.describe(), self.version);
                MutationOutcome::Applied {
                    version: self.version,
                    effect,
                }
            }
            Err(reason) => {
                tracing::debug!("{} ignored: {}", mutation.describe(), reason);
                MutationOutcome::Noop { reason }
            }
        }
    }

    /// Keep selection, hover and drop target consistent with a structural change
    fn apply_transient_effects(&mut self, effect: &Effect) {
        match effect {
            Effect::SectionAdded { section_id, .. } => {
                self.selection = Some(ElementRef::section(section_id.clone()));
            }
            Effect::SectionRemoved { section_id, .. } => {
                let gone = |r: &ElementRef| r.section_id() == section_id;
                clear_if(&mut self.selection, gone);
                clear_if(&mut self.hover, gone);
                if self.drop_target.as_ref().is_some_and(|t| &t.section_id == section_id) {
                    self.drop_target = None;
                }
            }
            Effect::BlockRemoved { block_id, .. } => {
                let gone = |r: &ElementRef| r.is_block(block_id);
                clear_if(&mut self.selection, gone);
                clear_if(&mut self.hover, gone);
            }
            Effect::BlockRelocated {
                old_block_id,
                section_id,
                block_id,
                ..
            } => {
                if self.selection.as_ref().is_some_and(|r| r.is_block(old_block_id)) {
                    self.selection = Some(ElementRef::block(section_id.clone(), block_id.clone()));
                }
                clear_if(&mut self.hover, |r| r.is_block(old_block_id));
            }
            _ => {}
        }
    }

    // ---- sections ----

    pub fn add_section(&mut self, position: Option<usize>) -> MutationOutcome {
        self.apply(Mutation::AddSection { position })
    }

    pub fn delete_section(&mut self, section_id: &str) -> MutationOutcome {
        self.apply(Mutation::DeleteSection {
            section_id: section_id.to_string(),
        })
    }

    pub fn duplicate_section(&mut self, section_id: &str) -> MutationOutcome {
        self.apply(Mutation::DuplicateSection {
            section_id: section_id.to_string(),
        })
    }

    pub fn move_section(&mut self, from: usize, to: usize) -> MutationOutcome {
        self.apply(Mutation::MoveSection { from, to })
    }

    /// No-op for the first section
    pub fn move_section_up(&mut self, index: usize) -> MutationOutcome {
        match index.checked_sub(1) {
            Some(to) => self.move_section(index, to),
            None => MutationOutcome::Noop {
                reason: MutationError::NoChange,
            },
        }
    }

    /// No-op for the last section
    pub fn move_section_down(&mut self, index: usize) -> MutationOutcome {
        match index.checked_add(1) {
            Some(to) => self.move_section(index, to),
            None => MutationOutcome::Noop {
                reason: MutationError::IndexOutOfRange {
                    index,
                    len: self.template.sections.len(),
                },
            },
        }
    }

    pub fn update_section(&mut self, section_id: &str, patch: SectionPatch) -> MutationOutcome {
        self.apply(Mutation::UpdateSection {
            section_id: section_id.to_string(),
            patch,
        })
    }

    // ---- blocks ----

    pub fn add_block_from_type(
        &mut self,
        section_id: &str,
        kind: BlockKind,
        index: Option<usize>,
    ) -> MutationOutcome {
        self.apply(Mutation::AddBlock {
            section_id: section_id.to_string(),
            block_kind: kind,
            index,
        })
    }

    pub fn delete_block(&mut self, section_id: &str, block_id: &str) -> MutationOutcome {
        self.apply(Mutation::DeleteBlock {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })
    }

    pub fn duplicate_block(&mut self, section_id: &str, block_id: &str) -> MutationOutcome {
        self.apply(Mutation::DuplicateBlock {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })
    }

    pub fn move_block(&mut self, section_id: &str, from: usize, to: usize) -> MutationOutcome {
        self.apply(Mutation::MoveBlock {
            section_id: section_id.to_string(),
            from,
            to,
        })
    }

    pub fn relocate_block(&mut self, block_id: &str, target: DropTarget) -> MutationOutcome {
        self.apply(Mutation::RelocateBlock {
            block_id: block_id.to_string(),
            section_id: target.section_id,
            index: target.index,
        })
    }

    pub fn update_block(&mut self, section_id: &str, block_id: &str, patch: BlockPatch) -> MutationOutcome {
        self.apply(Mutation::UpdateBlock {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
            patch,
        })
    }

    pub fn update_template(&mut self, patch: TemplatePatch) -> MutationOutcome {
        self.apply(Mutation::UpdateTemplate { patch })
    }

    // ---- selection & hover ----

    /// Unknown ids are accepted; they simply match nothing on the canvas
    pub fn select_element(&mut self, element: Option<ElementRef>) {
        self.selection = element;
    }

    pub fn hover_element(&mut self, element: Option<ElementRef>) {
        self.hover = element;
    }

    // ---- drag & drop ----

    pub fn start_drag(&mut self, payload: DragPayload) {
        tracing::debug!("Drag started: {}", payload.encode());
        self.mode = EditorMode::Dragging(payload);
        self.drop_target = None;
    }

    /// Phase two of the drag protocol: recompute the candidate target.
    /// Ignored while idle.
    pub fn drag_over(&mut self, hover: &HoverEvent) {
        if !self.is_dragging() {
            return;
        }
        let target = resolve_drop_target(&self.template, hover);
        self.update_drop_target(target);
    }

    pub fn update_drop_target(&mut self, target: Option<DropTarget>) {
        self.drop_target = target;
    }

    /// Leave drag mode without mutating; clears the drop target
    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Drag ended");
        }
        self.mode = EditorMode::Idle;
        self.drop_target = None;
    }

    /// Complete the drag at the recorded target.
    ///
    /// Without a target (or outside a drag) nothing is mutated. Drag state is
    /// cleared in every case.
    pub fn drop(&mut self) -> MutationOutcome {
        let mode = std::mem::take(&mut self.mode);
        let target = self.drop_target.take();
        self.end_drag();

        let (EditorMode::Dragging(payload), Some(target)) = (mode, target) else {
            tracing::debug!("Drop without target ignored");
            return MutationOutcome::Noop {
                reason: MutationError::NoDropTarget,
            };
        };

        match payload {
            DragPayload::NewBlock { block_kind } => {
                self.add_block_from_type(&target.section_id, block_kind, Some(target.index))
            }
            DragPayload::ExistingBlock { block_id } => self.relocate_block(&block_id, target),
        }
    }

    // ---- history ----

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label for the undo button, e.g. "Add section"
    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    /// Undo the last step. An open batch is closed first.
    pub fn undo(&mut self) -> bool {
        self.history.end_batch();
        match self.history.undo() {
            Some(template) => {
                self.restore(template);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone step. An open batch is closed first.
    pub fn redo(&mut self) -> bool {
        self.history.end_batch();
        match self.history.redo() {
            Some(template) => {
                self.restore(template);
                true
            }
            None => false,
        }
    }

    /// Group following mutations into a single undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch(&self.template, description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    fn restore(&mut self, template: Template) {
        self.template = template;
        self.version += 1;
        self.drop_target = None;
    }
}

fn clear_if(slot: &mut Option<ElementRef>, pred: impl Fn(&ElementRef) -> bool) {
    if slot.as_ref().is_some_and(|r| pred(r)) {
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::TemplateType;
    use pagecraft_registry::BuiltinRegistry;

    fn builder() -> Builder {
        Builder::new(
            Template::blank("home", "Home", TemplateType::Home),
            Arc::new(BuiltinRegistry::new()),
        )
        .unwrap()
    }

    fn section_ids(b: &Builder) -> Vec<String> {
        b.template().sections.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_add_section_selects_it() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        assert_eq!(b.selection(), Some(&ElementRef::section(sid)));
        assert_eq!(b.version(), 1);
        assert!(b.is_dirty());
    }

    #[test]
    fn test_delete_section_clears_selection_and_hover() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        let bid = b
            .add_block_from_type(&sid, BlockKind::ArticleList, None)
            .created_id()
            .unwrap()
            .to_string();
        b.select_element(Some(ElementRef::block(&sid, &bid)));
        b.hover_element(Some(ElementRef::section(&sid)));

        assert!(b.delete_section(&sid).is_applied());
        assert!(b.selection().is_none());
        assert!(b.hover().is_none());
    }

    #[test]
    fn test_noop_leaves_transient_state_untouched() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        b.hover_element(Some(ElementRef::section("ghost")));
        let version = b.version();

        let outcome = b.delete_block(&sid, "missing");
        assert_eq!(
            outcome.noop_reason(),
            Some(&MutationError::BlockNotFound("missing".to_string()))
        );
        assert_eq!(b.version(), version);
        assert_eq!(b.selection(), Some(&ElementRef::section(&sid)));
        assert_eq!(b.hover(), Some(&ElementRef::section("ghost")));
    }

    #[test]
    fn test_move_section_up_down_boundaries() {
        let mut b = builder();
        b.add_section(None);
        b.add_section(None);
        let order = section_ids(&b);

        assert!(!b.move_section_up(0).is_applied());
        assert!(!b.move_section_down(1).is_applied());
        assert_eq!(section_ids(&b), order);

        assert!(b.move_section_down(0).is_applied());
        assert_eq!(section_ids(&b), vec![order[1].clone(), order[0].clone()]);
    }

    #[test]
    fn test_move_section_down_at_max_index_is_noop() {
        let mut b = builder();
        b.add_section(None);
        let version = b.version();

        let outcome = b.move_section_down(usize::MAX);
        assert!(matches!(
            outcome.noop_reason(),
            Some(MutationError::IndexOutOfRange { index: usize::MAX, len: 1 })
        ));
        assert_eq!(b.version(), version);
    }

    #[test]
    fn test_end_drag_clears_target_without_mutation() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        let before = b.template().clone();

        b.start_drag(DragPayload::decode("article-grid"));
        b.drag_over(&HoverEvent::section(&sid));
        assert!(b.drop_target().is_some());

        b.end_drag();
        assert_eq!(b.mode(), &EditorMode::Idle);
        assert!(b.drop_target().is_none());
        assert_eq!(b.template(), &before);
    }

    #[test]
    fn test_drag_over_while_idle_is_ignored() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        b.drag_over(&HoverEvent::section(sid));
        assert!(b.drop_target().is_none());
    }

    #[test]
    fn test_drop_places_block_at_target() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        b.add_block_from_type(&sid, BlockKind::ArticleList, None);

        b.start_drag(DragPayload::NewBlock {
            block_kind: BlockKind::BigHero,
        });
        b.drag_over(&HoverEvent::slot(&sid, 0));
        let outcome = b.drop();

        assert!(outcome.is_applied());
        assert!(!b.is_dragging());
        assert!(b.drop_target().is_none());
        let first = &b.template().sections[0].blocks[0];
        assert_eq!(first.kind, BlockKind::BigHero);
        assert_eq!(Some(first.id.as_str()), outcome.created_id());
    }

    #[test]
    fn test_drop_without_target_is_noop() {
        let mut b = builder();
        b.add_section(None);
        let before = b.template().clone();

        b.start_drag(DragPayload::decode("most-read"));
        b.drag_over(&HoverEvent::section("outside"));
        let outcome = b.drop();

        assert_eq!(outcome.noop_reason(), Some(&MutationError::NoDropTarget));
        assert_eq!(b.template(), &before);
        assert_eq!(b.mode(), &EditorMode::Idle);
    }

    #[test]
    fn test_drop_relocates_existing_block_and_follows_selection() {
        let mut b = builder();
        let a = b.add_section(None).created_id().unwrap().to_string();
        let c = b.add_section(None).created_id().unwrap().to_string();
        let bid = b
            .add_block_from_type(&a, BlockKind::VideoGallery, None)
            .created_id()
            .unwrap()
            .to_string();
        b.select_element(Some(ElementRef::block(&a, &bid)));

        b.start_drag(DragPayload::decode(&format!("block:{}", bid)));
        b.drag_over(&HoverEvent::section(&c));
        let outcome = b.drop();

        let new_id = outcome.created_id().unwrap().to_string();
        assert_ne!(new_id, bid);
        assert!(b.template().sections[0].blocks.is_empty());
        assert_eq!(b.selection(), Some(&ElementRef::block(&c, &new_id)));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        let after_section = b.template().clone();
        b.add_block_from_type(&sid, BlockKind::ArticleGrid, None);
        let after_block = b.template().clone();
        assert_eq!(b.undo_description(), Some("Add block"));

        assert!(b.undo());
        assert_eq!(b.redo_description(), Some("Add block"));
        assert_eq!(b.template(), &after_section);
        assert!(b.redo());
        assert_eq!(b.template(), &after_block);
        assert!(!b.redo());
    }

    #[test]
    fn test_ids_not_reused_after_undo() {
        let mut b = builder();
        let first = b.add_section(None).created_id().unwrap().to_string();
        b.undo();
        let second = b.add_section(None).created_id().unwrap().to_string();
        assert_ne!(first, second);
    }

    #[test]
    fn test_noops_are_not_recorded_in_history() {
        let mut b = builder();
        b.delete_section("missing");
        b.move_section(0, 1);
        assert!(!b.can_undo());
        assert!(!b.is_dirty());
    }

    #[test]
    fn test_batch_is_one_undo_step() {
        let mut b = builder();
        b.begin_batch("Scaffold");
        let sid = b.add_section(None).created_id().unwrap().to_string();
        b.add_block_from_type(&sid, BlockKind::BigHero, None);
        b.add_block_from_type(&sid, BlockKind::ArticleGrid, None);
        b.end_batch();

        assert!(b.undo());
        assert!(b.template().sections.is_empty());
        assert!(!b.can_undo());
    }

    #[test]
    fn test_mark_saved() {
        let mut b = builder();
        b.add_section(None);
        b.mark_saved();
        assert!(!b.is_dirty());
        b.add_section(None);
        assert!(b.is_dirty());
    }

    #[test]
    fn test_from_persisted_rejects_duplicate_ids() {
        let payload = r#"{"id":"t","type":"page","sections":[
            {"id":"s1","blocks":[]},{"id":"s1","blocks":[]}
        ]}"#;
        assert!(Builder::from_persisted(payload, Arc::new(BuiltinRegistry::new())).is_none());
    }
}
