//! Entry point for modelsel, which keeps a node's model selectors in step
//! with its provider selector.
//!
//! This binary loads environment variables, sets up logging, parses CLI
//! arguments via [`cli`], and dispatches to the appropriate subcommand handler.

mod binder;
mod catalog;
mod cli;
mod config;
mod constants;
mod error;
mod extension;
mod loader;
mod widget;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Runs the modelsel CLI.
///
/// Loads `.env` files (silently ignored if absent) so API keys can live
/// there, then parses arguments and dispatches via [`cli::run`].
fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    init_tracing(cli.verbose);
    cli::run(cli)
}

/// Logs to stderr. `RUST_LOG` picks the level, `--verbose` forces `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
