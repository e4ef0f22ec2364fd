use super::open_store;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_bridge::{load_template, save_template, LoadedTemplate};
use pagecraft_document::{Template, TemplateType};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Page id (also used as the template id)
    pub page_id: String,

    /// Template type (home, category, article, page, tag, search, or a custom name)
    #[arg(short = 't', long = "type")]
    pub template_type: Option<String>,

    /// Display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Replace an existing template
    #[arg(short, long)]
    pub force: bool,
}

pub async fn new(args: NewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_store(&config, cwd);

    if !args.force {
        if let LoadedTemplate::Loaded(_) = load_template(&store, &args.page_id).await? {
            return Err(anyhow!(
                "Page {} already has a template (use --force to replace it)",
                args.page_id
            ));
        }
    }

    let template_type = match &args.template_type {
        Some(name) => parse_template_type(name)?,
        None => config.default_template_type,
    };
    let name = args.name.unwrap_or_else(|| args.page_id.clone());
    let template = Template::blank(&args.page_id, name, template_type);

    save_template(&store, &args.page_id, &template).await?;
    tracing::info!("Created {} template {}", template.template_type, template.id);
    println!(
        "{} Created {} template for page {}",
        "✓".green(),
        template.template_type.as_str().bright_white(),
        args.page_id.bright_white()
    );
    Ok(())
}

fn parse_template_type(name: &str) -> Result<TemplateType> {
    let name = name.trim();
    if name.is_empty() || name.chars().any(|c| c.is_whitespace()) {
        return Err(anyhow!("Invalid template type: {:?}", name));
    }
    Ok(TemplateType::from(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_type() {
        assert_eq!(parse_template_type("home").unwrap(), TemplateType::Home);
        assert_eq!(
            parse_template_type("landing").unwrap(),
            TemplateType::Custom("landing".to_string())
        );
        assert!(parse_template_type("  ").is_err());
        assert!(parse_template_type("two words").is_err());
    }
}
