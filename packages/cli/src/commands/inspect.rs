use super::{open_store, require_template};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_document::Template;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page id to inspect
    pub page_id: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub async fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);
    let template = require_template(&store, &args.page_id).await?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&template)?),
        _ => print_outline(&template),
    }
    Ok(())
}

fn print_outline(template: &Template) {
    println!(
        "📄 {} {} ({}, v{})",
        template.name.bright_white().bold(),
        format!("[{}]", template.id).dimmed(),
        template.template_type.as_str(),
        template.version
    );

    let regions: Vec<&str> = template
        .regions
        .iter()
        .filter(|(_, region)| region.enabled)
        .map(|(name, _)| name.as_str())
        .collect();
    println!("   Regions: {}", regions.join(", "));
    println!(
        "   Sections: {}  Blocks: {}",
        template.sections.len(),
        template.block_count()
    );
    println!();

    for (i, section) in template.sections.iter().enumerate() {
        let name = if section.name.is_empty() {
            "(unnamed)"
        } else {
            section.name.as_str()
        };
        println!("  {} {} {}", format!("{}.", i + 1).dimmed(), name.cyan(), section.id.dimmed());
        for block in &section.blocks {
            let overrides = if block.config.is_empty() {
                String::new()
            } else {
                format!(" +{} overrides", block.config.len())
            };
            println!(
                "     {} {}/{} {}{}",
                "•".green(),
                block.kind,
                block.variant,
                block.id.dimmed(),
                overrides.yellow()
            );
        }
    }
}
