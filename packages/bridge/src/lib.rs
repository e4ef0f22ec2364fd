//! # Pagecraft Bridge
//!
//! Everything between the builder and the host application's storage:
//!
//! - [`ContentStore`]: async read/write of a page's serialized template
//! - [`SessionTransfer`]: hand-off of the template from the page form
//! - [`load_template`] / [`save_template`]: lenient load, strict save
//! - [`AutosaveHandle`]: debounced background saving with a status channel

pub mod autosave;
mod error;
mod loader;
mod session;
mod store;

pub use autosave::{AutosaveHandle, SaveStatus, DEFAULT_DEBOUNCE};
pub use error::{BridgeError, BridgeResult};
pub use loader::{load_template, save_template, LoadedTemplate};
pub use session::{
    handoff, take_handoff, FileSessionStore, Handoff, MemorySessionStore, SessionTransfer,
    PAGE_ID_KEY, TEMPLATE_KEY,
};
pub use store::{ContentStore, FileContentStore, MemoryContentStore};
