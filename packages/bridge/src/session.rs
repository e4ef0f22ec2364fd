//! Hand-off of the template being edited between the host's page form and
//! the builder screen.

use crate::BridgeResult;
use pagecraft_common::{FileSystem, RealFileSystem};
use pagecraft_document::{codec, Template};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const TEMPLATE_KEY: &str = "builder.template";
pub const PAGE_ID_KEY: &str = "builder.pageId";

/// Session-scoped key/value storage
pub trait SessionTransfer: Send + Sync {
    fn save(&self, key: &str, value: &str) -> BridgeResult<()>;

    fn load(&self, key: &str) -> Option<String>;

    fn remove(&self, key: &str) -> BridgeResult<()>;
}

#[derive(Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionTransfer for MemorySessionStore {
    fn save(&self, key: &str, value: &str) -> BridgeResult<()> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) -> BridgeResult<()> {
        self.values.lock().unwrap_or_else(|e| e.into_inner()).remove(key);
        Ok(())
    }
}

/// One file per key under a session directory
pub struct FileSessionStore {
    dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, Arc::new(RealFileSystem))
    }

    pub fn with_fs(dir: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self { dir: dir.into(), fs }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionTransfer for FileSessionStore {
    fn save(&self, key: &str, value: &str) -> BridgeResult<()> {
        Ok(self.fs.write(&self.path(key), value)?)
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.fs.read(&self.path(key)) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read session key {}: {}", key, e);
                None
            }
        }
    }

    fn remove(&self, key: &str) -> BridgeResult<()> {
        Ok(self.fs.remove(&self.path(key))?)
    }
}

/// What the page form passed to the builder
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub template: Template,
    pub page_id: Option<String>,
}

/// Stash a template (and the page it belongs to) for the builder to pick up
pub fn handoff(store: &dyn SessionTransfer, template: &Template, page_id: Option<&str>) -> BridgeResult<()> {
    store.save(TEMPLATE_KEY, &codec::to_json(template)?)?;
    match page_id {
        Some(id) => store.save(PAGE_ID_KEY, id)?,
        None => store.remove(PAGE_ID_KEY)?,
    }
    tracing::debug!("Handed off template {}", template.id);
    Ok(())
}

/// Take the stashed template, clearing both keys.
///
/// A malformed stash yields `None`, the same as an empty one.
pub fn take_handoff(store: &dyn SessionTransfer) -> Option<Handoff> {
    let payload = store.load(TEMPLATE_KEY)?;
    let page_id = store.load(PAGE_ID_KEY);

    for key in [TEMPLATE_KEY, PAGE_ID_KEY] {
        if let Err(e) = store.remove(key) {
            tracing::warn!("Failed to clear session key {}: {}", key, e);
        }
    }

    let template = codec::parse_persisted(&payload)?;
    Some(Handoff { template, page_id })
}
