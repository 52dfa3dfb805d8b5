//! Config command handlers

use crate::cli::ConfigInitArgs;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../turnstile.example.toml");

/// Handle `turnstile config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Refuse to clobber an existing file unless forced
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Config file created at {}", args.output.display());
    println!("  Set per-client quotas and the health backend URL before serving.");

    Ok(())
}
