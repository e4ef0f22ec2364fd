mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, blocks, init, inspect, new, resolve, ApplyArgs, BlocksArgs, InitArgs, InspectArgs,
    NewArgs, ResolveArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - page templates from sections and blocks
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// Create a blank template for a page
    New(NewArgs),

    /// Show a page's sections and blocks
    Inspect(InspectArgs),

    /// Print effective block configuration for a page
    Resolve(ResolveArgs),

    /// List block types and their variants
    Blocks(BlocksArgs),

    /// Apply a JSON mutation script to a page
    Apply(ApplyArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(e) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::New(args) => new(args, &cwd).await,
        Command::Inspect(args) => inspect(args, &cwd).await,
        Command::Resolve(args) => resolve(args, &cwd).await,
        Command::Blocks(args) => blocks(args),
        Command::Apply(args) => apply(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
