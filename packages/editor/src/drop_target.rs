//! Drag-and-drop protocol.
//!
//! A drag is three phases, independent of any windowing or browser API:
//!
//! ```text
//! begin(payload) → hover(HoverEvent)* → drop() | end()
//! ```
//!
//! Hover events are turned into a [`DropTarget`] by
//! [`resolve_drop_target`]; the payload is only read when the drop happens.

use crate::DropTarget;
use pagecraft_document::{BlockKind, Template};
use serde::{Deserialize, Serialize};

const EXISTING_BLOCK_PREFIX: &str = "block:";

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DragPayload {
    /// A block kind picked from the palette
    NewBlock { block_kind: BlockKind },
    /// An existing block being relocated
    ExistingBlock { block_id: String },
}

impl DragPayload {
    /// Decode the single-string wire form: `block:<id>` relocates an existing
    /// block, anything else names a block kind.
    pub fn decode(raw: &str) -> Self {
        match raw.strip_prefix(EXISTING_BLOCK_PREFIX) {
            Some(block_id) => DragPayload::ExistingBlock {
                block_id: block_id.to_string(),
            },
            None => DragPayload::NewBlock {
                block_kind: BlockKind::from(raw),
            },
        }
    }

    pub fn encode(&self) -> String {
        match self {
            DragPayload::NewBlock { block_kind } => block_kind.to_string(),
            DragPayload::ExistingBlock { block_id } => format!("{}{}", EXISTING_BLOCK_PREFIX, block_id),
        }
    }
}

/// Pointer position during a drag, in document terms
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverEvent {
    pub section_id: String,
    /// Explicit insertion slot between blocks, when the pointer is over one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Block under the pointer, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over_block: Option<String>,
}

impl HoverEvent {
    pub fn section(section_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            ..Default::default()
        }
    }

    pub fn slot(section_id: impl Into<String>, index: usize) -> Self {
        Self {
            section_id: section_id.into(),
            index: Some(index),
            over_block: None,
        }
    }

    pub fn over_block(section_id: impl Into<String>, block_id: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            index: None,
            over_block: Some(block_id.into()),
        }
    }
}

/// Compute where a drop at `hover` would insert.
///
/// - unknown section: no target
/// - explicit slot: that slot, clamped to the block count
/// - section body or an existing block: append at the end
///
/// Hovering a block is deliberately not split into before/after.
pub fn resolve_drop_target(template: &Template, hover: &HoverEvent) -> Option<DropTarget> {
    let section = template.section(&hover.section_id)?;
    let len = section.blocks.len();

    let index = match hover.index {
        Some(index) if hover.over_block.is_none() => index.min(len),
        _ => len,
    };

    Some(DropTarget {
        section_id: section.id.clone(),
        index,
    })
}
