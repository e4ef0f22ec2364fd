use crate::layout::{Background, ContainerWidth, GridLayout, Responsive, SectionHeader, SectionLayout};
use crate::Block;
use pagecraft_common::IdGenerator;
use serde::{Deserialize, Serialize};

/// An ordered container of blocks within a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    /// Ordering hint for external consumers. The authoritative position is
    /// the index in `Template::sections`.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub container: ContainerWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<SectionHeader>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Responsive<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Responsive<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<SectionLayout>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// Deep copy with a fresh id for the section and for every block in it
    pub fn duplicate(&self, ids: &mut IdGenerator) -> Section {
        Section {
            id: ids.new_id("section"),
            blocks: self.blocks.iter().map(|b| b.duplicate(ids)).collect(),
            ..self.clone()
        }
    }
}

/// Create an empty section with default container and no cosmetic options
pub fn new_section(ids: &mut IdGenerator) -> Section {
    Section {
        id: ids.new_id("section"),
        name: String::new(),
        localized_name: None,
        order: 0,
        container: ContainerWidth::default(),
        header: None,
        background: None,
        grid: None,
        padding: None,
        margin: None,
        layout: None,
        blocks: Vec::new(),
    }
}
