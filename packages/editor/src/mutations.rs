//! # Template Mutations
//!
//! Semantic operations on a builder template.
//!
//! ## Semantics
//!
//! - Every mutation either applies completely or is a no-op; a no-op carries
//!   the [`MutationError`] that explains it and leaves the template untouched.
//! - Order is array position. Inserting or moving never renumbers siblings.
//! - New elements always get a freshly minted id. Duplicates and relocated
//!   blocks are new elements; in-place reordering keeps ids.

use crate::patch::{BlockPatch, SectionPatch, TemplatePatch};
use pagecraft_document::{new_block_from_type, new_section, Block, BlockKind, IdGenerator, Template};
use pagecraft_registry::BlockRegistry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a new empty section (default: at the end)
    AddSection {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<usize>,
    },

    /// Remove a section and all its blocks
    DeleteSection { section_id: String },

    /// Deep-copy a section right after the original
    DuplicateSection { section_id: String },

    /// Reorder sections by array index
    MoveSection { from: usize, to: usize },

    /// Place a new block of the registry's default variant
    AddBlock {
        section_id: String,
        block_kind: BlockKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    DeleteBlock { section_id: String, block_id: String },

    /// Copy a block right after the original, within the same section
    DuplicateBlock { section_id: String, block_id: String },

    /// Reorder blocks within one section
    MoveBlock { section_id: String, from: usize, to: usize },

    /// Move a block to another slot, possibly in another section
    RelocateBlock {
        block_id: String,
        section_id: String,
        index: usize,
    },

    UpdateSection { section_id: String, patch: SectionPatch },

    UpdateBlock {
        section_id: String,
        block_id: String,
        patch: BlockPatch,
    },

    UpdateTemplate { patch: TemplatePatch },
}

/// Why a mutation did not apply
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No registry entry for block kind: {0}")]
    UnknownBlockKind(BlockKind),

    #[error("Unknown variant {variant} for block kind {kind}")]
    UnknownVariant { kind: BlockKind, variant: String },

    #[error("Mutation would not change the template")]
    NoChange,

    #[error("Drop has no target")]
    NoDropTarget,
}

/// Structural change made by an applied mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SectionAdded { section_id: String, index: usize },
    SectionRemoved { section_id: String, block_ids: Vec<String> },
    SectionDuplicated { source_id: String, section_id: String },
    SectionMoved { section_id: String, from: usize, to: usize },
    BlockAdded { section_id: String, block_id: String, index: usize },
    BlockRemoved { section_id: String, block_id: String },
    BlockDuplicated { section_id: String, source_id: String, block_id: String },
    BlockMoved { section_id: String, from: usize, to: usize },
    BlockRelocated {
        old_block_id: String,
        section_id: String,
        block_id: String,
        index: usize,
    },
    SectionUpdated { section_id: String },
    BlockUpdated { section_id: String, block_id: String },
    TemplateUpdated,
}

impl Effect {
    /// Id of the element this mutation created, if any
    pub fn created_id(&self) -> Option<&str> {
        match self {
            Effect::SectionAdded { section_id, .. } | Effect::SectionDuplicated { section_id, .. } => {
                Some(section_id)
            }
            Effect::BlockAdded { block_id, .. }
            | Effect::BlockDuplicated { block_id, .. }
            | Effect::BlockRelocated { block_id, .. } => Some(block_id),
            _ => None,
        }
    }
}

impl Mutation {
    /// Apply to the template, minting ids from `ids`.
    ///
    /// Validation happens before anything is touched, so an `Err` always
    /// means the template is unchanged.
    pub fn apply(
        &self,
        template: &mut Template,
        ids: &mut IdGenerator,
        registry: &dyn BlockRegistry,
    ) -> Result<Effect, MutationError> {
        match self {
            Mutation::AddSection { position } => Ok(Self::apply_add_section(template, ids, *position)),
            Mutation::DeleteSection { section_id } => Self::apply_delete_section(template, section_id),
            Mutation::DuplicateSection { section_id } => {
                Self::apply_duplicate_section(template, ids, section_id)
            }
            Mutation::MoveSection { from, to } => {
                let section_id = move_within(&mut template.sections, *from, *to)?.id.clone();
                Ok(Effect::SectionMoved {
                    section_id,
                    from: *from,
                    to: *to,
                })
            }
            Mutation::AddBlock {
                section_id,
                block_kind,
                index,
            } => Self::apply_add_block(template, ids, registry, section_id, block_kind, *index),
            Mutation::DeleteBlock { section_id, block_id } => {
                Self::apply_delete_block(template, section_id, block_id)
            }
            Mutation::DuplicateBlock { section_id, block_id } => {
                Self::apply_duplicate_block(template, ids, section_id, block_id)
            }
            Mutation::MoveBlock { section_id, from, to } => {
                let section = template
                    .section_mut(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                move_within(&mut section.blocks, *from, *to)?;
                Ok(Effect::BlockMoved {
                    section_id: section_id.clone(),
                    from: *from,
                    to: *to,
                })
            }
            Mutation::RelocateBlock {
                block_id,
                section_id,
                index,
            } => Self::apply_relocate_block(template, ids, block_id, section_id, *index),
            Mutation::UpdateSection { section_id, patch } => {
                let section = template
                    .section_mut(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                let mut updated = section.clone();
                patch.apply_to(&mut updated);
                if updated == *section {
                    return Err(MutationError::NoChange);
                }
                *section = updated;
                Ok(Effect::SectionUpdated {
                    section_id: section_id.clone(),
                })
            }
            Mutation::UpdateBlock {
                section_id,
                block_id,
                patch,
            } => Self::apply_update_block(template, registry, section_id, block_id, patch),
            Mutation::UpdateTemplate { patch } => {
                // Compare header fields only; sections are set aside meanwhile
                let sections = std::mem::take(&mut template.sections);
                let mut updated = template.clone();
                patch.apply_to(&mut updated);
                let changed = updated != *template;
                if changed {
                    *template = updated;
                }
                template.sections = sections;

                if changed {
                    Ok(Effect::TemplateUpdated)
                } else {
                    Err(MutationError::NoChange)
                }
            }
        }
    }

    fn apply_add_section(template: &mut Template, ids: &mut IdGenerator, position: Option<usize>) -> Effect {
        let len = template.sections.len();
        let index = position.map_or(len, |p| p.min(len));
        let section = new_section(ids);
        let section_id = section.id.clone();
        template.sections.insert(index, section);
        Effect::SectionAdded { section_id, index }
    }

    fn apply_delete_section(template: &mut Template, section_id: &str) -> Result<Effect, MutationError> {
        let index = template
            .section_index(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let removed = template.sections.remove(index);
        Ok(Effect::SectionRemoved {
            section_id: removed.id,
            block_ids: removed.blocks.into_iter().map(|b| b.id).collect(),
        })
    }

    fn apply_duplicate_section(
        template: &mut Template,
        ids: &mut IdGenerator,
        section_id: &str,
    ) -> Result<Effect, MutationError> {
        let index = template
            .section_index(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let copy = template.sections[index].duplicate(ids);
        let new_id = copy.id.clone();
        template.sections.insert(index + 1, copy);
        Ok(Effect::SectionDuplicated {
            source_id: section_id.to_string(),
            section_id: new_id,
        })
    }

    fn apply_add_block(
        template: &mut Template,
        ids: &mut IdGenerator,
        registry: &dyn BlockRegistry,
        section_id: &str,
        kind: &BlockKind,
        index: Option<usize>,
    ) -> Result<Effect, MutationError> {
        let section = template
            .section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let variant = registry
            .default_variant(kind)
            .ok_or_else(|| MutationError::UnknownBlockKind(kind.clone()))?;

        let len = section.blocks.len();
        let index = index.map_or(len, |i| i.min(len));
        let block = new_block_from_type(ids, kind.clone(), variant);
        let block_id = block.id.clone();
        section.blocks.insert(index, block);

        Ok(Effect::BlockAdded {
            section_id: section_id.to_string(),
            block_id,
            index,
        })
    }

    fn apply_delete_block(template: &mut Template, section_id: &str, block_id: &str) -> Result<Effect, MutationError> {
        let section = template
            .section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let index = section
            .block_index(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        section.blocks.remove(index);
        Ok(Effect::BlockRemoved {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })
    }

    fn apply_duplicate_block(
        template: &mut Template,
        ids: &mut IdGenerator,
        section_id: &str,
        block_id: &str,
    ) -> Result<Effect, MutationError> {
        let section = template
            .section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let index = section
            .block_index(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        let copy = section.blocks[index].duplicate(ids);
        let new_id = copy.id.clone();
        section.blocks.insert(index + 1, copy);
        Ok(Effect::BlockDuplicated {
            section_id: section_id.to_string(),
            source_id: block_id.to_string(),
            block_id: new_id,
        })
    }

    fn apply_relocate_block(
        template: &mut Template,
        ids: &mut IdGenerator,
        block_id: &str,
        target_section_id: &str,
        index: usize,
    ) -> Result<Effect, MutationError> {
        let (from_section, from_index) = template
            .find_block(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;
        let to_section = template
            .section_index(target_section_id)
            .ok_or_else(|| MutationError::SectionNotFound(target_section_id.to_string()))?;

        // The slot is expressed against the target's current block list
        let mut index = index.min(template.sections[to_section].blocks.len());
        if from_section == to_section {
            if index == from_index || index == from_index + 1 {
                return Err(MutationError::NoChange);
            }
            if from_index < index {
                index -= 1;
            }
        }

        let removed = template.sections[from_section].blocks.remove(from_index);
        let relocated = Block {
            id: ids.new_id("block"),
            ..removed
        };
        let new_id = relocated.id.clone();
        template.sections[to_section].blocks.insert(index, relocated);

        Ok(Effect::BlockRelocated {
            old_block_id: block_id.to_string(),
            section_id: target_section_id.to_string(),
            block_id: new_id,
            index,
        })
    }

    fn apply_update_block(
        template: &mut Template,
        registry: &dyn BlockRegistry,
        section_id: &str,
        block_id: &str,
        patch: &BlockPatch,
    ) -> Result<Effect, MutationError> {
        let section = template
            .section_mut(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let block = section
            .block_mut(block_id)
            .ok_or_else(|| MutationError::BlockNotFound(block_id.to_string()))?;

        if let Some(variant) = &patch.variant {
            if registry.variant(&block.kind, variant).is_none() {
                return Err(MutationError::UnknownVariant {
                    kind: block.kind.clone(),
                    variant: variant.clone(),
                });
            }
        }

        let mut updated = block.clone();
        patch.apply_to(&mut updated);
        if updated == *block {
            return Err(MutationError::NoChange);
        }
        *block = updated;

        Ok(Effect::BlockUpdated {
            section_id: section_id.to_string(),
            block_id: block_id.to_string(),
        })
    }

    /// Short human-readable label, used for undo history entries
    pub fn describe(&self) -> &'static str {
        match self {
            Mutation::AddSection { .. } => "Add section",
            Mutation::DeleteSection { .. } => "Delete section",
            Mutation::DuplicateSection { .. } => "Duplicate section",
            Mutation::MoveSection { .. } => "Move section",
            Mutation::AddBlock { .. } => "Add block",
            Mutation::DeleteBlock { .. } => "Delete block",
            Mutation::DuplicateBlock { .. } => "Duplicate block",
            Mutation::MoveBlock { .. } => "Move block",
            Mutation::RelocateBlock { .. } => "Relocate block",
            Mutation::UpdateSection { .. } => "Edit section",
            Mutation::UpdateBlock { .. } => "Edit block",
            Mutation::UpdateTemplate { .. } => "Edit template",
        }
    }
}

/// Remove the item at `from` and reinsert it at `to`
fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<&T, MutationError> {
    let len = items.len();
    if from >= len {
        return Err(MutationError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(MutationError::IndexOutOfRange { index: to, len });
    }
    if from == to {
        return Err(MutationError::NoChange);
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(&items[to])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_document::TemplateType;
    use pagecraft_registry::BuiltinRegistry;
    use serde_json::json;

    struct Fixture {
        template: Template,
        ids: IdGenerator,
        registry: BuiltinRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let template = Template::blank("home", "Home", TemplateType::Home);
            let ids = template.id_generator();
            Self {
                template,
                ids,
                registry: BuiltinRegistry::new(),
            }
        }

        fn apply(&mut self, mutation: Mutation) -> Result<Effect, MutationError> {
            mutation.apply(&mut self.template, &mut self.ids, &self.registry)
        }

        fn add_section(&mut self) -> String {
            let effect = self.apply(Mutation::AddSection { position: None }).unwrap();
            effect.created_id().unwrap().to_string()
        }

        fn add_block(&mut self, section_id: &str, kind: BlockKind) -> String {
            let effect = self
                .apply(Mutation::AddBlock {
                    section_id: section_id.to_string(),
                    block_kind: kind,
                    index: None,
                })
                .unwrap();
            effect.created_id().unwrap().to_string()
        }

        fn block_ids(&self, section: usize) -> Vec<String> {
            self.template.sections[section].blocks.iter().map(|b| b.id.clone()).collect()
        }
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::AddBlock {
            section_id: "s1".to_string(),
            block_kind: BlockKind::ArticleGrid,
            index: Some(2),
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(
            json,
            json!({ "op": "addBlock", "sectionId": "s1", "blockKind": "article-grid", "index": 2 })
        );

        let deserialized: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_add_section_position_is_clamped() {
        let mut fx = Fixture::new();
        let first = fx.add_section();
        let effect = fx.apply(Mutation::AddSection { position: Some(0) }).unwrap();
        let front = effect.created_id().unwrap().to_string();
        let effect = fx.apply(Mutation::AddSection { position: Some(99) }).unwrap();

        assert!(matches!(effect, Effect::SectionAdded { index: 2, .. }));
        assert_eq!(fx.template.sections[0].id, front);
        assert_eq!(fx.template.sections[1].id, first);
    }

    #[test]
    fn test_delete_section_reports_removed_blocks() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        let b1 = fx.add_block(&sid, BlockKind::ArticleList);
        let b2 = fx.add_block(&sid, BlockKind::MostRead);

        let effect = fx.apply(Mutation::DeleteSection { section_id: sid.clone() }).unwrap();
        assert_eq!(
            effect,
            Effect::SectionRemoved {
                section_id: sid,
                block_ids: vec![b1, b2],
            }
        );
        assert!(fx.template.sections.is_empty());
    }

    #[test]
    fn test_missing_ids_are_rejected_without_change() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        fx.add_block(&sid, BlockKind::BigHero);
        let before = fx.template.clone();

        let attempts = vec![
            Mutation::DeleteSection { section_id: "nope".to_string() },
            Mutation::DuplicateSection { section_id: "nope".to_string() },
            Mutation::MoveSection { from: 0, to: 4 },
            Mutation::AddBlock {
                section_id: "nope".to_string(),
                block_kind: BlockKind::ArticleGrid,
                index: None,
            },
            Mutation::DeleteBlock { section_id: sid.clone(), block_id: "nope".to_string() },
            Mutation::DuplicateBlock { section_id: "nope".to_string(), block_id: "nope".to_string() },
            Mutation::MoveBlock { section_id: sid.clone(), from: 0, to: 0 },
            Mutation::RelocateBlock {
                block_id: "nope".to_string(),
                section_id: sid.clone(),
                index: 0,
            },
            Mutation::UpdateSection { section_id: sid.clone(), patch: SectionPatch::default() },
        ];

        for mutation in attempts {
            assert!(fx.apply(mutation.clone()).is_err(), "{mutation:?} should not apply");
            assert_eq!(fx.template, before);
        }
    }

    #[test]
    fn test_add_block_uses_default_variant() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        let bid = fx.add_block(&sid, BlockKind::ArticleGrid);

        let block = fx.template.block(&bid).unwrap();
        assert_eq!(block.variant, "grid-3");
        assert!(block.config.is_empty());
    }

    #[test]
    fn test_add_unknown_kind_is_rejected() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        let result = fx.apply(Mutation::AddBlock {
            section_id: sid,
            block_kind: BlockKind::Custom("weather".to_string()),
            index: None,
        });
        assert!(matches!(result, Err(MutationError::UnknownBlockKind(_))));
    }

    #[test]
    fn test_move_block_within_section() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        let a = fx.add_block(&sid, BlockKind::ArticleList);
        let b = fx.add_block(&sid, BlockKind::ArticleGrid);
        let c = fx.add_block(&sid, BlockKind::MostRead);

        fx.apply(Mutation::MoveBlock { section_id: sid, from: 2, to: 0 }).unwrap();
        assert_eq!(fx.block_ids(0), vec![c, a, b]);
    }

    #[test]
    fn test_relocate_block_across_sections_mints_fresh_id() {
        let mut fx = Fixture::new();
        let left = fx.add_section();
        let right = fx.add_section();
        let moving = fx.add_block(&left, BlockKind::VideoGallery);
        let staying = fx.add_block(&right, BlockKind::ArticleList);

        let effect = fx
            .apply(Mutation::RelocateBlock {
                block_id: moving.clone(),
                section_id: right.clone(),
                index: 0,
            })
            .unwrap();

        let new_id = effect.created_id().unwrap().to_string();
        assert_ne!(new_id, moving);
        assert!(fx.template.sections[0].blocks.is_empty());
        assert_eq!(fx.block_ids(1), vec![new_id.clone(), staying]);
        assert_eq!(fx.template.block(&new_id).unwrap().kind, BlockKind::VideoGallery);
    }

    #[test]
    fn test_relocate_within_section_adjusts_slot() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        let a = fx.add_block(&sid, BlockKind::ArticleList);
        let b = fx.add_block(&sid, BlockKind::ArticleGrid);
        let c = fx.add_block(&sid, BlockKind::MostRead);

        // Slot 3 is "after c" in the list as it was when the drag started
        let effect = fx
            .apply(Mutation::RelocateBlock {
                block_id: a.clone(),
                section_id: sid.clone(),
                index: 3,
            })
            .unwrap();
        let moved = effect.created_id().unwrap().to_string();
        assert_eq!(fx.block_ids(0), vec![b.clone(), c.clone(), moved.clone()]);

        // Dropping right before or after itself changes nothing
        for slot in [2, 3] {
            let result = fx.apply(Mutation::RelocateBlock {
                block_id: moved.clone(),
                section_id: sid.clone(),
                index: slot,
            });
            assert_eq!(result, Err(MutationError::NoChange));
        }
    }

    #[test]
    fn test_update_block_rejects_unknown_variant() {
        let mut fx = Fixture::new();
        let sid = fx.add_section();
        let bid = fx.add_block(&sid, BlockKind::ArticleGrid);

        let result = fx.apply(Mutation::UpdateBlock {
            section_id: sid.clone(),
            block_id: bid.clone(),
            patch: BlockPatch {
                variant: Some("hexagon".to_string()),
                ..Default::default()
            },
        });
        assert!(matches!(result, Err(MutationError::UnknownVariant { .. })));

        fx.apply(Mutation::UpdateBlock {
            section_id: sid,
            block_id: bid.clone(),
            patch: BlockPatch {
                variant: Some("mosaic".to_string()),
                ..Default::default()
            },
        })
        .unwrap();
        assert_eq!(fx.template.block(&bid).unwrap().variant, "mosaic");
    }

    #[test]
    fn test_update_template_keeps_sections() {
        let mut fx = Fixture::new();
        fx.add_section();

        let patch = TemplatePatch {
            name: Some("Front page".to_string()),
            ..Default::default()
        };
        fx.apply(Mutation::UpdateTemplate { patch: patch.clone() }).unwrap();
        assert_eq!(fx.template.name, "Front page");
        assert_eq!(fx.template.sections.len(), 1);

        assert_eq!(fx.apply(Mutation::UpdateTemplate { patch }), Err(MutationError::NoChange));
        assert_eq!(fx.template.sections.len(), 1);
    }
}
