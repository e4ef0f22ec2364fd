//! Canvas view model.
//!
//! A read-only projection of the builder state that a renderer can draw
//! directly: sections in order, each block with its effective configuration
//! and the editor indicators that apply to it.

use crate::Builder;
use pagecraft_document::{ContainerWidth, Section};
use pagecraft_registry::{resolve_block, ResolvedBlock};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasFrame {
    pub template_id: String,
    pub version: u64,
    pub dragging: bool,
    pub sections: Vec<CanvasSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSection {
    pub section_id: String,
    pub name: String,
    pub container: ContainerWidth,
    pub selected: bool,
    pub hovered: bool,
    /// Slot where the drop indicator is drawn while dragging over this section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_indicator_at: Option<usize>,
    pub blocks: Vec<CanvasBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBlock {
    #[serde(flatten)]
    pub resolved: ResolvedBlock,
    pub selected: bool,
    pub hovered: bool,
}

pub fn render(builder: &Builder) -> CanvasFrame {
    let template = builder.template();
    CanvasFrame {
        template_id: template.id.clone(),
        version: builder.version(),
        dragging: builder.is_dragging(),
        sections: template
            .sections
            .iter()
            .map(|section| render_section(builder, section))
            .collect(),
    }
}

fn render_section(builder: &Builder, section: &Section) -> CanvasSection {
    let selected = builder.selection().is_some_and(|r| r.is_section(&section.id));
    let hovered = builder.hover().is_some_and(|r| r.is_section(&section.id));
    let drop_indicator_at = builder
        .drop_target()
        .filter(|t| t.section_id == section.id)
        .map(|t| t.index);

    let blocks = section
        .blocks
        .iter()
        .map(|block| CanvasBlock {
            resolved: resolve_block(builder.registry(), block),
            selected: builder.selection().is_some_and(|r| r.is_block(&block.id)),
            hovered: builder.hover().is_some_and(|r| r.is_block(&block.id)),
        })
        .collect();

    CanvasSection {
        section_id: section.id.clone(),
        name: section.name.clone(),
        container: section.container,
        selected,
        hovered,
        drop_indicator_at,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DragPayload, ElementRef, HoverEvent};
    use pagecraft_document::{BlockKind, Template, TemplateType};
    use pagecraft_registry::BuiltinRegistry;
    use serde_json::json;
    use std::sync::Arc;

    fn builder() -> Builder {
        Builder::new(
            Template::blank("home", "Home", TemplateType::Home),
            Arc::new(BuiltinRegistry::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_render_resolves_block_config() {
        let mut b = builder();
        let sid = b.add_section(None).created_id().unwrap().to_string();
        b.add_block_from_type(&sid, BlockKind::ArticleGrid, None);

        let frame = render(&b);
        let block = &frame.sections[0].blocks[0];
        assert_eq!(block.resolved.variant, "grid-3");
        assert!(block.resolved.placeholder.is_none());
        assert!(!block.resolved.config.is_empty());
    }

    #[test]
    fn test_unknown_kind_renders_placeholder() {
        let payload = json!({
            "id": "t", "name": "T", "type": "page",
            "sections": [{ "id": "s1", "name": "S", "blocks": [
                { "id": "b1", "type": "weather", "variant": "today", "config": { "city": "Oslo" } }
            ]}]
        })
        .to_string();
        let b = Builder::from_persisted(&payload, Arc::new(BuiltinRegistry::new())).unwrap();

        let block = &render(&b).sections[0].blocks[0];
        let placeholder = block.resolved.placeholder.as_ref().unwrap();
        assert_eq!(placeholder.label, "weather/today");
        assert_eq!(block.resolved.config.get("city"), Some(&json!("Oslo")));
    }

    #[test]
    fn test_indicator_flags() {
        let mut b = builder();
        let s1 = b.add_section(None).created_id().unwrap().to_string();
        let s2 = b.add_section(None).created_id().unwrap().to_string();
        let bid = b
            .add_block_from_type(&s1, BlockKind::MostRead, None)
            .created_id()
            .unwrap()
            .to_string();

        b.select_element(Some(ElementRef::block(&s1, &bid)));
        b.hover_element(Some(ElementRef::section(&s2)));
        b.start_drag(DragPayload::decode("newsletter"));
        b.drag_over(&HoverEvent::section(&s2));

        let frame = render(&b);
        assert!(frame.dragging);
        assert!(frame.sections[0].blocks[0].selected);
        assert!(!frame.sections[0].selected);
        assert!(frame.sections[1].hovered);
        assert_eq!(frame.sections[0].drop_indicator_at, None);
        assert_eq!(frame.sections[1].drop_indicator_at, Some(0));
    }
}
