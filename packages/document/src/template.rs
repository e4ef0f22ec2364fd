use crate::layout::{Region, TemplateLayout};
use crate::visitor::{walk_template, Visitor};
use crate::{Block, DocumentError, DocumentResult, Section};
use pagecraft_common::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Schema version written into new templates
pub const TEMPLATE_VERSION: &str = "1.0";

/// Regions every new template starts with, and whether they are on
pub const DEFAULT_REGIONS: [(&str, bool); 4] = [
    ("header", true),
    ("breaking-news", true),
    ("sidebar", false),
    ("footer", true),
];

/// Kind of page a template lays out. Unknown names from persisted content are
/// kept verbatim as [`TemplateType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateType {
    Home,
    Category,
    Article,
    Page,
    Tag,
    Search,
    Custom(String),
}

impl TemplateType {
    pub const BUILTIN: [TemplateType; 6] = [
        TemplateType::Home,
        TemplateType::Category,
        TemplateType::Article,
        TemplateType::Page,
        TemplateType::Tag,
        TemplateType::Search,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TemplateType::Home => "home",
            TemplateType::Category => "category",
            TemplateType::Article => "article",
            TemplateType::Page => "page",
            TemplateType::Tag => "tag",
            TemplateType::Search => "search",
            TemplateType::Custom(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, TemplateType::Custom(_))
    }
}

impl From<&str> for TemplateType {
    fn from(s: &str) -> Self {
        match s {
            "home" => TemplateType::Home,
            "category" => TemplateType::Category,
            "article" => TemplateType::Article,
            "page" => TemplateType::Page,
            "tag" => TemplateType::Tag,
            "search" => TemplateType::Search,
            other => TemplateType::Custom(other.to_string()),
        }
    }
}

impl From<String> for TemplateType {
    fn from(s: String) -> Self {
        match TemplateType::from(s.as_str()) {
            TemplateType::Custom(_) => TemplateType::Custom(s),
            template_type => template_type,
        }
    }
}

impl From<TemplateType> for String {
    fn from(template_type: TemplateType) -> Self {
        match template_type {
            TemplateType::Custom(name) => name,
            template_type => template_type.as_str().to_string(),
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root builder document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub layout: TemplateLayout,
    #[serde(default)]
    pub regions: BTreeMap<String, Region>,
    /// Editor/display toggles, opaque to the builder
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
    pub sections: Vec<Section>,
}

fn default_version() -> String {
    TEMPLATE_VERSION.to_string()
}

impl Template {
    /// An empty template with the default regions
    pub fn blank(id: impl Into<String>, name: impl Into<String>, template_type: TemplateType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            localized_name: None,
            template_type,
            version: default_version(),
            layout: TemplateLayout::default(),
            regions: DEFAULT_REGIONS
                .iter()
                .map(|(name, enabled)| (name.to_string(), Region { enabled: *enabled }))
                .collect(),
            settings: serde_json::Map::new(),
            sections: Vec::new(),
        }
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Locate a block anywhere in the template as `(section index, block index)`
    pub fn find_block(&self, block_id: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, section)| {
            section.block_index(block_id).map(|bi| (si, bi))
        })
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.find_block(block_id)
            .map(|(si, bi)| &self.sections[si].blocks[bi])
    }

    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Id generator that continues past every id already in this template
    pub fn id_generator(&self) -> IdGenerator {
        struct Observe<'a>(&'a mut IdGenerator);

        impl Visitor for Observe<'_> {
            fn visit_section(&mut self, section: &Section) {
                self.0.observe(&section.id);
                crate::visitor::walk_section(self, section);
            }

            fn visit_block(&mut self, _section: &Section, block: &Block) {
                self.0.observe(&block.id);
            }
        }

        let mut ids = IdGenerator::new(&self.id);
        walk_template(&mut Observe(&mut ids), self);
        ids
    }

    /// Check the identity invariant: section ids unique among sections,
    /// block ids unique among blocks.
    pub fn validate(&self) -> DocumentResult<()> {
        let mut sections = HashSet::new();
        let mut blocks = HashSet::new();

        for section in &self.sections {
            if !sections.insert(section.id.as_str()) {
                return Err(DocumentError::DuplicateId {
                    kind: "section",
                    id: section.id.clone(),
                });
            }
            for block in &section.blocks {
                if !blocks.insert(block.id.as_str()) {
                    return Err(DocumentError::DuplicateId {
                        kind: "block",
                        id: block.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
