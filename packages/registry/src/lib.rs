//! # Block Registry & Configuration Resolver
//!
//! The registry is a read-only catalog of block kinds and their variants.
//! The resolver layers a block's stored overrides over its variant's default
//! configuration; it is the single place where configuration precedence is
//! decided.

mod catalog;
mod placeholder;
mod registry;
pub mod resolver;

pub use catalog::BuiltinRegistry;
pub use placeholder::{placeholder, Placeholder};
pub use registry::{BlockMeta, BlockRegistry, VariantDef};
pub use resolver::{resolve, resolve_block, ResolvedBlock};
