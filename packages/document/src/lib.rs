//! # Pagecraft Document Model
//!
//! Typed shape of a builder template:
//!
//! ```text
//! Template
//!  └─ sections: Vec<Section>   (order = array position)
//!      └─ blocks: Vec<Block>   (order = array position)
//! ```
//!
//! Entities are plain data. New sections and blocks must come from
//! [`new_section`] and [`new_block_from_type`], which mint ids through the
//! template's [`IdGenerator`] and fill in the required structural defaults.

mod block;
pub mod codec;
mod error;
mod kind;
mod layout;
mod section;
mod template;
pub mod visitor;

pub use block::{new_block_from_type, Block, BlockConfig, GridArea, FULL_WIDTH_COLUMNS};
pub use error::{DocumentError, DocumentResult};
pub use kind::BlockKind;
pub use layout::{
    Alignment, Background, ContainerWidth, GridLayout, LayoutKind, Region, Responsive,
    SectionHeader, SectionLayout, SectionLayoutKind, ShowMoreLink, TemplateLayout,
};
pub use section::{new_section, Section};
pub use template::{Template, TemplateType, DEFAULT_REGIONS, TEMPLATE_VERSION};

pub use pagecraft_common::IdGenerator;
