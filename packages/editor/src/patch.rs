//! Property edits issued by the settings panels.
//!
//! Every field is optional; an absent field leaves the property alone. For
//! optional properties, an explicit `null` clears the value.

use pagecraft_document::{
    Background, BlockConfig, ContainerWidth, GridArea, GridLayout, Region, Responsive,
    SectionHeader, SectionLayout, Section, Template, TemplateLayout,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerWidth>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub header: Option<Option<SectionHeader>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub background: Option<Option<Background>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub grid: Option<Option<GridLayout>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub padding: Option<Option<Responsive<String>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub margin: Option<Option<Responsive<String>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub layout: Option<Option<SectionLayout>>,
}

impl SectionPatch {
    pub fn apply_to(&self, section: &mut Section) {
        if let Some(name) = &self.name {
            section.name = name.clone();
        }
        if let Some(localized_name) = &self.localized_name {
            section.localized_name = localized_name.clone();
        }
        if let Some(container) = self.container {
            section.container = container;
        }
        if let Some(header) = &self.header {
            section.header = header.clone();
        }
        if let Some(background) = &self.background {
            section.background = background.clone();
        }
        if let Some(grid) = &self.grid {
            section.grid = grid.clone();
        }
        if let Some(padding) = &self.padding {
            section.padding = padding.clone();
        }
        if let Some(margin) = &self.margin {
            section.margin = margin.clone();
        }
        if let Some(layout) = &self.layout {
            section.layout = layout.clone();
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<GridArea>,
    /// Replace the whole override object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<BlockConfig>,
    /// Set individual override keys; a `null` value removes the override so
    /// the variant default shows through again
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_config: Option<BlockConfig>,
}

impl BlockPatch {
    pub fn apply_to(&self, block: &mut pagecraft_document::Block) {
        if let Some(variant) = &self.variant {
            block.variant = variant.clone();
        }
        if let Some(grid_area) = &self.grid_area {
            block.grid_area = grid_area.clone();
        }
        if let Some(config) = &self.config {
            block.config = config.clone();
        }
        if let Some(merge) = &self.merge_config {
            merge_bag(&mut block.config, merge);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<TemplateLayout>,
    /// Regions to set; regions not named here are left alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeMap<String, Region>>,
    /// Settings to set; a `null` value removes the setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TemplatePatch {
    pub fn apply_to(&self, template: &mut Template) {
        if let Some(name) = &self.name {
            template.name = name.clone();
        }
        if let Some(localized_name) = &self.localized_name {
            template.localized_name = localized_name.clone();
        }
        if let Some(layout) = &self.layout {
            template.layout = layout.clone();
        }
        if let Some(regions) = &self.regions {
            for (name, region) in regions {
                template.regions.insert(name.clone(), region.clone());
            }
        }
        if let Some(settings) = &self.settings {
            merge_bag(&mut template.settings, settings);
        }
    }
}

fn merge_bag(target: &mut serde_json::Map<String, serde_json::Value>, changes: &serde_json::Map<String, serde_json::Value>) {
    for (key, value) in changes {
        if value.is_null() {
            target.remove(key);
        } else {
            target.insert(key.clone(), value.clone());
        }
    }
}
