//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    let store = &ctx.config.store;
    ctx.output.kv("data_dir", &ctx.data_dir.display().to_string());
    ctx.output.kv("storage_key", &store.storage_key);
    ctx.output.kv(
        "max_meter_order_quantity",
        &store.limits.max_meter_order_quantity.to_string(),
    );
    ctx.output.kv(
        "max_piece_order_quantity",
        &store.limits.max_piece_order_quantity.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(&path, generate_default_config())?;
    ctx.output
        .success(&format!("Created {}", path.display()));

    Ok(())
}
