//! Effective block configuration.
//!
//! `effective = variant default ⊕ overrides`, a shallow key-by-key merge in
//! which the override always wins. Keys found only on one side are kept.
//! Renderers only ever see the merged result.

use crate::{placeholder, BlockRegistry, Placeholder};
use pagecraft_document::{Block, BlockConfig, BlockKind};
use serde::Serialize;

/// Merge `overrides` over the registry default for `(kind, variant)`.
///
/// Without a registry entry the overrides are returned alone; the caller is
/// expected to draw a placeholder.
pub fn resolve(
    registry: &dyn BlockRegistry,
    kind: &BlockKind,
    variant: &str,
    overrides: &BlockConfig,
) -> BlockConfig {
    let Some(def) = registry.variant(kind, variant) else {
        tracing::debug!("No registry entry for {}/{}, using overrides only", kind, variant);
        return overrides.clone();
    };

    let mut config = def.default_config.clone();
    for (key, value) in overrides {
        config.insert(key.clone(), value.clone());
    }
    config
}

/// A block together with the configuration handed to its renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBlock {
    pub block_id: String,
    pub kind: BlockKind,
    pub variant: String,
    pub config: BlockConfig,
    /// Set when the registry has no entry and a generic placeholder is drawn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
}

pub fn resolve_block(registry: &dyn BlockRegistry, block: &Block) -> ResolvedBlock {
    let known = registry.variant(&block.kind, &block.variant).is_some();
    ResolvedBlock {
        block_id: block.id.clone(),
        kind: block.kind.clone(),
        variant: block.variant.clone(),
        config: resolve(registry, &block.kind, &block.variant, &block.config),
        placeholder: (!known).then(|| placeholder(&block.kind, &block.variant)),
    }
}
