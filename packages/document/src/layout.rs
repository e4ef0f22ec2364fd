//! Layout sub-schemas shared by templates and sections.

use serde::{Deserialize, Serialize};

/// A value per responsive breakpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Responsive<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<T>,
}

impl<T> Responsive<T> {
    pub fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            desktop: Some(value.clone()),
            tablet: Some(value.clone()),
            mobile: Some(value),
        }
    }
}

/// Page-level layout of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    #[default]
    FullWidth,
    SidebarLeft,
    SidebarRight,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLayout {
    #[serde(rename = "type", default)]
    pub kind: LayoutKind,
    /// Sidebar width in pixels; only meaningful for the sidebar layouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_width: Option<u32>,
}

/// Named page region (header, footer, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub enabled: bool,
}

/// Width class of a section's content container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerWidth {
    Full,
    #[default]
    Normal,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowMoreLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub url: String,
}

/// Title bar rendered above a section's blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeader {
    pub enabled: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_title: Option<String>,
    /// Visual style name understood by the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_more: Option<ShowMoreLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Background {
    Color {
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    Gradient {
        from: String,
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle: Option<i32>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        url: String,
        /// CSS `background-size` style value (`cover`, `contain`, ...)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fit: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<String>,
        #[serde(default)]
        fixed: bool,
    },
}

/// Column grid of a section, per breakpoint
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    #[serde(default)]
    pub columns: Responsive<u8>,
    #[serde(default)]
    pub gap: Responsive<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionLayoutKind {
    #[default]
    Default,
    SidebarLeft,
    SidebarRight,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayout {
    #[serde(default)]
    pub variant: SectionLayoutKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_width: Option<u32>,
}
