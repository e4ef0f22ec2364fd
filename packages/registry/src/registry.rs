use pagecraft_document::{BlockConfig, BlockKind};
use serde::Serialize;

/// Display metadata for a block kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMeta {
    pub display_name: String,
    pub localized_name: String,
}

/// A named preset of a block kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDef {
    pub name: String,
    pub display_name: String,
    pub default_config: BlockConfig,
}

/// Read-only catalog of block kinds and variants.
///
/// Lookups never fail hard: a missing kind or variant is `None` and callers
/// degrade to a placeholder.
pub trait BlockRegistry: Send + Sync {
    fn block_meta(&self, kind: &BlockKind) -> Option<&BlockMeta>;

    /// Variants of a kind; the first one is the default
    fn variants(&self, kind: &BlockKind) -> &[VariantDef];

    fn variant(&self, kind: &BlockKind, variant: &str) -> Option<&VariantDef> {
        self.variants(kind).iter().find(|v| v.name == variant)
    }

    /// Variant given to newly placed blocks of this kind
    fn default_variant(&self, kind: &BlockKind) -> Option<&str> {
        self.variants(kind).first().map(|v| v.name.as_str())
    }

    /// Kinds available in the palette, in palette order
    fn kinds(&self) -> Vec<BlockKind>;
}
