use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_registry::{BlockRegistry, BuiltinRegistry};

#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Show each variant's default configuration
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn blocks(args: BlocksArgs) -> Result<()> {
    let registry = BuiltinRegistry::new();

    println!("🧱 {} block types", registry.kinds().len());
    println!();

    for kind in registry.kinds() {
        let display = registry
            .block_meta(&kind)
            .map(|meta| meta.display_name.clone())
            .unwrap_or_else(|| kind.to_string());
        println!("  {} {}", kind.as_str().bright_white().bold(), display.dimmed());

        let default = registry.default_variant(&kind);
        for variant in registry.variants(&kind) {
            let marker = if Some(variant.name.as_str()) == default {
                "*".green()
            } else {
                " ".normal()
            };
            println!("    {} {} ({})", marker, variant.name, variant.display_name);
            if args.verbose {
                println!("        {}", serde_json::Value::Object(variant.default_config.clone()));
            }
        }
    }

    Ok(())
}
