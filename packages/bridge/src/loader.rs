use crate::{BridgeResult, ContentStore};
use pagecraft_document::{codec, Template};

/// Outcome of loading a page's builder content
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedTemplate {
    Loaded(Template),
    /// Missing, empty or malformed content; the UI shows its empty state
    NoTemplate,
}

impl LoadedTemplate {
    pub fn into_template(self) -> Option<Template> {
        match self {
            LoadedTemplate::Loaded(template) => Some(template),
            LoadedTemplate::NoTemplate => None,
        }
    }
}

/// Load a page's template. Only store failures are errors.
pub async fn load_template(store: &dyn ContentStore, page_id: &str) -> BridgeResult<LoadedTemplate> {
    let Some(payload) = store.fetch_content(page_id).await? else {
        tracing::info!("Page {} has no builder content", page_id);
        return Ok(LoadedTemplate::NoTemplate);
    };

    Ok(match codec::parse_persisted(&payload) {
        Some(template) => {
            tracing::info!(
                "Loaded template {} for page {} ({} sections)",
                template.id,
                page_id,
                template.sections.len()
            );
            LoadedTemplate::Loaded(template)
        }
        None => LoadedTemplate::NoTemplate,
    })
}

pub async fn save_template(store: &dyn ContentStore, page_id: &str, template: &Template) -> BridgeResult<()> {
    let payload = codec::to_json(template)?;
    store.store_content(page_id, &payload).await?;
    tracing::info!("Saved template {} to page {}", template.id, page_id);
    Ok(())
}
