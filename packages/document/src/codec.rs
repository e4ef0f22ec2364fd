//! JSON form of a template, as stored in a page's `content` field or in the
//! session hand-off store.

use crate::{DocumentError, DocumentResult, Template};

pub fn to_json(template: &Template) -> DocumentResult<String> {
    Ok(serde_json::to_string(template)?)
}

pub fn to_json_pretty(template: &Template) -> DocumentResult<String> {
    Ok(serde_json::to_string_pretty(template)?)
}

/// Strict decode: the payload must be an object with a `sections` array
pub fn from_json(payload: &str) -> DocumentResult<Template> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    if !value.get("sections").is_some_and(|s| s.is_array()) {
        return Err(DocumentError::MissingSections);
    }
    Ok(serde_json::from_value(value)?)
}

/// Lenient decode used when loading persisted content.
///
/// Unparsable input or a payload without a `sections` array means there is
/// no template; callers fall back to a blank one.
pub fn parse_persisted(payload: &str) -> Option<Template> {
    if payload.trim().is_empty() {
        return None;
    }
    match from_json(payload) {
        Ok(template) => Some(template),
        Err(e) => {
            tracing::warn!("Ignoring persisted template: {}", e);
            None
        }
    }
}
