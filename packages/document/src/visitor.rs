use crate::{Block, Section, Template};

/// Visitor pattern for walking a template immutably
///
/// Default implementations walk the whole tree in document order.
/// Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_template(&mut self, template: &Template) {
        walk_template(self, template);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_block(&mut self, _section: &Section, _block: &Block) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template<V: Visitor>(visitor: &mut V, template: &Template) {
    for section in &template.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for block in &section.blocks {
        visitor.visit_block(section, block);
    }
}

/// All ids in document order, sections before their blocks
pub fn collect_ids(template: &Template) -> Vec<String> {
    struct Ids(Vec<String>);

    impl Visitor for Ids {
        fn visit_section(&mut self, section: &Section) {
            self.0.push(section.id.clone());
            walk_section(self, section);
        }

        fn visit_block(&mut self, _section: &Section, block: &Block) {
            self.0.push(block.id.clone());
        }
    }

    let mut ids = Ids(Vec::new());
    ids.visit_template(template);
    ids.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_block_from_type, new_section, BlockKind, TemplateType};

    #[test]
    fn test_collect_ids_in_document_order() {
        let mut template = Template::blank("t", "T", TemplateType::Page);
        let mut ids = template.id_generator();
        let mut section = new_section(&mut ids);
        section.blocks.push(new_block_from_type(&mut ids, BlockKind::HtmlEmbed, "raw"));
        template.sections.push(section);
        template.sections.push(new_section(&mut ids));

        let collected = collect_ids(&template);
        assert_eq!(
            collected,
            vec![
                template.sections[0].id.clone(),
                template.sections[0].blocks[0].id.clone(),
                template.sections[1].id.clone(),
            ]
        );
    }
}
