pub mod apply;
pub mod blocks;
pub mod init;
pub mod inspect;
pub mod new;
pub mod resolve;

pub use apply::{apply, ApplyArgs};
pub use blocks::{blocks, BlocksArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use new::{new, NewArgs};
pub use resolve::{resolve, ResolveArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use pagecraft_bridge::{load_template, FileContentStore, LoadedTemplate};
use pagecraft_document::Template;

fn open_store(config: &Config, cwd: &str) -> FileContentStore {
    FileContentStore::new(config.get_store_dir(cwd))
}

/// Load a page or fail with a readable message
async fn require_template(store: &FileContentStore, page_id: &str) -> Result<Template> {
    match load_template(store, page_id).await? {
        LoadedTemplate::Loaded(template) => Ok(template),
        LoadedTemplate::NoTemplate => Err(anyhow!(
            "Page {} has no builder template (run: pagecraft new {})",
            page_id,
            page_id
        )),
    }
}
