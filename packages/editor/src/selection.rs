//! Transient editor state. Never persisted, cleared when the session ends.

use serde::{Deserialize, Serialize};

/// Reference to a section, or to a block within its owning section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ElementRef {
    Section { section_id: String },
    Block { section_id: String, block_id: String },
}

impl ElementRef {
    pub fn section(section_id: impl Into<String>) -> Self {
        ElementRef::Section {
            section_id: section_id.into(),
        }
    }

    pub fn block(section_id: impl Into<String>, block_id: impl Into<String>) -> Self {
        ElementRef::Block {
            section_id: section_id.into(),
            block_id: block_id.into(),
        }
    }

    /// Section the referenced element lives in
    pub fn section_id(&self) -> &str {
        match self {
            ElementRef::Section { section_id } | ElementRef::Block { section_id, .. } => section_id,
        }
    }

    pub fn block_id(&self) -> Option<&str> {
        match self {
            ElementRef::Section { .. } => None,
            ElementRef::Block { block_id, .. } => Some(block_id),
        }
    }

    pub fn is_section(&self, id: &str) -> bool {
        matches!(self, ElementRef::Section { section_id } if section_id == id)
    }

    pub fn is_block(&self, id: &str) -> bool {
        self.block_id() == Some(id)
    }
}

/// Where a dragged block would land
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropTarget {
    pub section_id: String,
    pub index: usize,
}
