//! # Pagecraft Editor
//!
//! Editing engine for page templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ bridge: stored JSON → Template              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Builder + mutations                 │
//! │  - Apply mutations atomically               │
//! │  - Selection, hover, drag state             │
//! │  - Drop-target resolution                   │
//! │  - Snapshot undo/redo                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ canvas: sections + resolved block configs   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Template is source of truth**: the canvas frame is a derived view
//! 2. **All-or-nothing mutations**: invalid requests are no-ops, never partial
//! 3. **Ids are minted, never reused**: copies and relocations get fresh ids
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Builder, DragPayload, HoverEvent};
//!
//! let mut builder = Builder::new(template, registry)?;
//! let section_id = builder.add_section(None).created_id().unwrap().to_string();
//!
//! builder.start_drag(DragPayload::decode("article-grid"));
//! builder.drag_over(&HoverEvent::section(&section_id));
//! builder.drop();
//!
//! let frame = pagecraft_editor::canvas::render(&builder);
//! ```

pub mod canvas;
mod drop_target;
mod engine;
mod errors;
mod mutations;
mod patch;
mod selection;
mod undo_stack;

pub use drop_target::{resolve_drop_target, DragPayload, HoverEvent};
pub use engine::{Builder, EditorMode, MutationOutcome};
pub use errors::EditorError;
pub use mutations::{Effect, Mutation, MutationError};
pub use patch::{BlockPatch, SectionPatch, TemplatePatch};
pub use selection::{DropTarget, ElementRef};
pub use undo_stack::{HistoryEntry, UndoStack};
