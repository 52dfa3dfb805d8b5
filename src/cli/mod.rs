//! CLI module for Turnstile
//!
//! Command-line interface definitions and handlers for the Turnstile
//! admission controller.
//!
//! # Commands
//!
//! - `serve` - Start the Turnstile server
//! - `clients` - Inspect configured client quotas (list)
//! - `probe` - One-shot health backend fetch for diagnostics
//! - `config` - Starter-config generation (init)
//! - `completions` - Emit shell completion scripts
//!
//! # Example
//!
//! ```bash
//! # Run with defaults
//! turnstile serve
//!
//! # List configured client quotas
//! turnstile clients list --json
//!
//! # Check what the health backend is reporting right now
//! turnstile probe -c turnstile.toml
//!
//! # Install completions for bash
//! turnstile completions bash > ~/.bash_completion.d/turnstile
//! ```

pub mod clients;
pub mod completions;
pub mod config;
pub mod output;
pub mod probe;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Turnstile - Adaptive QoS Admission Controller
#[derive(Parser, Debug)]
#[command(
    name = "turnstile",
    version,
    about = "Adaptive per-client quota service driven by storage backend health"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Turnstile server
    Serve(ServeArgs),
    /// Inspect client quotas
    #[command(subcommand)]
    Clients(ClientsCommands),
    /// Fetch one health reading from the configured backend
    Probe(ProbeArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Emit shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "turnstile.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "TURNSTILE_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "TURNSTILE_HOST")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TURNSTILE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Ignore any configured health backend and serve unscaled quotas
    #[arg(long)]
    pub no_probe: bool,
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommands {
    /// List configured client quotas
    List(ClientsListArgs),
}

#[derive(Args, Debug)]
pub struct ClientsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "turnstile.toml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "turnstile.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "turnstile.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
