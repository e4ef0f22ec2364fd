//! Page content storage.
//!
//! The host stores one serialized template per page in the page's `content`
//! field. The builder only ever reads and writes that string.

use crate::{BridgeError, BridgeResult};
use async_trait::async_trait;
use pagecraft_common::{FileSystem, RealFileSystem};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stored content for a page, `None` if the page has none
    async fn fetch_content(&self, page_id: &str) -> BridgeResult<Option<String>>;

    async fn store_content(&self, page_id: &str, content: &str) -> BridgeResult<()>;
}

/// In-memory store with write counting and failure injection
#[derive(Default)]
pub struct MemoryContentStore {
    pages: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, page_id: impl Into<String>, content: impl Into<String>) -> Self {
        self.pages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(page_id.into(), content.into());
        self
    }

    pub fn content(&self, page_id: &str) -> Option<String> {
        self.pages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(page_id)
            .cloned()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch_content(&self, page_id: &str) -> BridgeResult<Option<String>> {
        Ok(self.content(page_id))
    }

    async fn store_content(&self, page_id: &str, content: &str) -> BridgeResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BridgeError::Store(format!("write to page {} refused", page_id)));
        }
        self.pages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(page_id.to_string(), content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One `<page_id>.json` file per page under a directory
pub struct FileContentStore {
    dir: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl FileContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, Arc::new(RealFileSystem))
    }

    pub fn with_fs(dir: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self { dir: dir.into(), fs }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Page ids become file names, so anything that could escape the store
    /// directory is rejected.
    pub fn page_path(&self, page_id: &str) -> BridgeResult<PathBuf> {
        let valid = !page_id.is_empty()
            && !page_id.starts_with('.')
            && page_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(BridgeError::Store(format!("invalid page id: {:?}", page_id)));
        }
        Ok(self.dir.join(format!("{}.json", page_id)))
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn fetch_content(&self, page_id: &str) -> BridgeResult<Option<String>> {
        let path = self.page_path(page_id)?;
        Ok(self.fs.read(&path)?)
    }

    async fn store_content(&self, page_id: &str, content: &str) -> BridgeResult<()> {
        let path = self.page_path(page_id)?;
        self.fs.write(&path, content)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_common::MockFileSystem;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryContentStore::new().with_page("home", "{}");
        assert_eq!(store.fetch_content("home").await.unwrap().as_deref(), Some("{}"));
        assert!(store.fetch_content("about").await.unwrap().is_none());

        store.store_content("about", "[]").await.unwrap();
        assert_eq!(store.content("about").as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_failing_writes() {
        let store = MemoryContentStore::new().with_page("home", "old");
        store.set_fail_writes(true);

        assert!(matches!(
            store.store_content("home", "new").await,
            Err(BridgeError::Store(_))
        ));
        assert_eq!(store.content("home").as_deref(), Some("old"));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_file_store_uses_page_files() {
        let fs = Arc::new(MockFileSystem::new());
        let store = FileContentStore::with_fs("/store", fs.clone());

        store.store_content("page-7", "{}").await.unwrap();
        assert_eq!(fs.contents(Path::new("/store/page-7.json")).as_deref(), Some("{}"));
        assert_eq!(store.fetch_content("page-7").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_like_ids() {
        let store = FileContentStore::with_fs("/store", Arc::new(MockFileSystem::new()));
        for id in ["", "../etc", "a/b", ".hidden"] {
            assert!(store.fetch_content(id).await.is_err(), "{:?} accepted", id);
        }
    }
}
