//! Naman CLI - drive the storefront cart from the command line.
//!
//! Commands:
//! - `naman show` - Print the cart
//! - `naman add` - Add a product line
//! - `naman set` - Set a line's quantity
//! - `naman inc` / `naman dec` - Step a line by one
//! - `naman remove` - Drop a line
//! - `naman clear` - Empty the cart
//! - `naman config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, ConfigArgs, ProductArg, SetArgs};

/// Naman CLI - Manage the storefront cart
#[derive(Parser)]
#[command(name = "naman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory holding the durable cart
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,

    /// Add a product line, merging with an existing one
    Add(AddArgs),

    /// Set a line's quantity
    Set(SetArgs),

    /// Increase a line's quantity by one
    Inc(ProductArg),

    /// Decrease a line's quantity by one, removing it below its minimum
    Dec(ProductArg),

    /// Remove a line
    Remove(ProductArg),

    /// Remove every line
    Clear(ClearArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("NAMAN_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.data_dir.as_deref(), output)?;

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx),
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Set(args) => commands::cart::set(args, &ctx),
        Commands::Inc(args) => commands::cart::increment(args, &ctx),
        Commands::Dec(args) => commands::cart::decrement(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
