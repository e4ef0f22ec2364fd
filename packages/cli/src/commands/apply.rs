use super::{open_store, require_template};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_bridge::AutosaveHandle;
use pagecraft_editor::{Builder, Mutation, MutationOutcome};
use pagecraft_registry::BuiltinRegistry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Page id to edit
    pub page_id: String,

    /// JSON file holding an array of mutations
    pub script: PathBuf,

    /// Apply without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Run a mutation script against a page, saving through the autosaver
pub async fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = Arc::new(open_store(&config, cwd));
    let template = require_template(&store, &args.page_id).await?;

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let mutations: Vec<Mutation> =
        serde_json::from_str(&script).with_context(|| format!("parsing {}", args.script.display()))?;

    let mut builder = Builder::new(template, Arc::new(BuiltinRegistry::new()))?
        .with_history_depth(config.history_depth);
    let autosave = (!args.dry_run)
        .then(|| AutosaveHandle::spawn(store.clone(), args.page_id.clone(), config.autosave_debounce()));

    println!("✏️  {} {} mutations to {}", "Applying".green().bold(), mutations.len(), args.page_id);

    let mut applied = 0;
    for (i, mutation) in mutations.into_iter().enumerate() {
        let description = mutation.describe();
        match builder.apply(mutation) {
            MutationOutcome::Applied { effect, .. } => {
                applied += 1;
                let created = effect
                    .created_id()
                    .map(|id| format!(" → {}", id))
                    .unwrap_or_default();
                println!("   {} {}. {}{}", "✓".green(), i + 1, description, created.dimmed());
                if let Some(autosave) = &autosave {
                    autosave.notify(builder.template().clone());
                }
            }
            MutationOutcome::Noop { reason } => {
                tracing::debug!("Mutation {} skipped: {}", i + 1, reason);
                println!("   {} {}. {}: {}", "–".yellow(), i + 1, description, reason);
            }
        }
    }

    println!();
    match autosave {
        Some(autosave) if applied > 0 => {
            autosave.flush().await?;
            builder.mark_saved();
            tracing::info!("Saved page {} at version {}", args.page_id, builder.version());
            println!("✨ {} {} applied, page saved", "Done".green().bold(), applied);
        }
        _ => println!("✨ {} {} applied, nothing saved", "Done".green().bold(), applied),
    }

    Ok(())
}
