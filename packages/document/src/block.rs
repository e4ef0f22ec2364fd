use crate::BlockKind;
use pagecraft_common::IdGenerator;
use serde::{Deserialize, Serialize};

/// Number of grid columns a full-width block spans
pub const FULL_WIDTH_COLUMNS: u8 = 12;

/// Override configuration of a block; shape depends on kind/variant and is
/// opaque to the document model.
pub type BlockConfig = serde_json::Map<String, serde_json::Value>;

/// Placement of a block inside its section's grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridArea {
    #[serde(default = "full_width")]
    pub col_span: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u8>,
}

fn full_width() -> u8 {
    FULL_WIDTH_COLUMNS
}

impl Default for GridArea {
    fn default() -> Self {
        Self {
            col_span: FULL_WIDTH_COLUMNS,
            row_span: None,
        }
    }
}

/// A single content unit within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub variant: String,
    #[serde(default)]
    pub grid_area: GridArea,
    #[serde(default)]
    pub config: BlockConfig,
}

impl Block {
    /// Copy of this block under a freshly minted id
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Block {
        Block {
            id: ids.new_id("block"),
            ..self.clone()
        }
    }
}

/// Create a block of the given kind and variant.
///
/// The block spans the full grid width and carries no overrides, so the
/// variant's defaults apply unchanged.
pub fn new_block_from_type(
    ids: &mut IdGenerator,
    kind: BlockKind,
    variant: impl Into<String>,
) -> Block {
    Block {
        id: ids.new_id("block"),
        kind,
        variant: variant.into(),
        grid_area: GridArea::default(),
        config: BlockConfig::new(),
    }
}
