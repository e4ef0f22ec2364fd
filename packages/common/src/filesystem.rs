use crate::{CommonError, CommonResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// File system abstraction for the file-backed stores and testing
pub trait FileSystem: Send + Sync {
    /// Read a file, `None` if it does not exist
    fn read(&self, path: &Path) -> CommonResult<Option<String>>;

    /// Write a file, replacing any previous contents
    fn write(&self, path: &Path, contents: &str) -> CommonResult<()>;

    /// Remove a file; removing a missing file is not an error
    fn remove(&self, path: &Path) -> CommonResult<()>;
}

/// Real file system implementation
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written document.
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> CommonResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> CommonResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    fn remove(&self, path: &Path) -> CommonResult<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Mock file system for testing
#[derive(Default)]
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
    fail_writes: AtomicBool,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_file(&self, path: PathBuf, contents: impl Into<String>) {
        self.files().insert(path, contents.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files().get(path).cloned()
    }

    /// Make every following write fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> CommonResult<Option<String>> {
        Ok(self.contents(path))
    }

    fn write(&self, path: &Path, contents: &str) -> CommonResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CommonError::WriteRefused(path.to_path_buf()));
        }
        self.add_file(path.to_path_buf(), contents);
        Ok(())
    }

    fn remove(&self, path: &Path) -> CommonResult<()> {
        self.files().remove(path);
        Ok(())
    }
}
