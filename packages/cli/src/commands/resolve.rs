use super::{open_store, require_template};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use pagecraft_editor::{canvas, Builder};
use pagecraft_registry::{resolve_block, BuiltinRegistry};
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Page id
    pub page_id: String,

    /// Only resolve this block
    #[arg(short, long)]
    pub block: Option<String>,
}

/// Print what the renderer would receive: the canvas frame, or the
/// effective configuration of a single block
pub async fn resolve(args: ResolveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);
    let template = require_template(&store, &args.page_id).await?;
    let registry = Arc::new(BuiltinRegistry::new());

    let output = match &args.block {
        Some(block_id) => {
            let block = template
                .block(block_id)
                .ok_or_else(|| anyhow!("Block not found: {}", block_id))?;
            serde_json::to_string_pretty(&resolve_block(registry.as_ref(), block))?
        }
        None => {
            let builder = Builder::new(template, registry)?;
            serde_json::to_string_pretty(&canvas::render(&builder))?
        }
    };

    println!("{}", output);
    Ok(())
}
