//! Command-line interface definition and dispatch for modelsel.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand is
//! routed to its handler; node simulation and printing live in the
//! [`inspect`] submodule.

mod inspect;

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::binder::BindingSpec;
use crate::catalog::{ProviderCatalog, Variant};
use crate::config::Config;
use crate::constants::PROVIDER_WIDGET;
use crate::loader::{self, LoaderInput};

/// Top-level CLI structure for modelsel.
#[derive(Parser)]
#[command(name = "modelsel", about = "Provider-driven model selectors for editor nodes")]
pub struct Cli {
    /// Log binder decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Node variant (overrides config)
    #[arg(long, global = true, value_enum)]
    pub variant: Option<VariantArg>,
    /// Catalog TOML to use instead of the built-in one (overrides config)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

/// Node variants selectable on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum VariantArg {
    /// Provider + t2t_model + ti2t_model
    ApiLoader,
    /// Provider + model
    ModelSelector,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::ApiLoader => Variant::ApiLoader,
            VariantArg::ModelSelector => Variant::ModelSelector,
        }
    }
}

/// Available subcommands for the modelsel CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// List providers in the active catalog
    Providers,
    /// Show the model selectors a provider produces
    Models {
        /// Provider name (unknown names fall back to the default provider)
        provider: String,
    },
    /// Simulate a node: create it, pick a provider, then switch providers
    Select {
        /// Provider to select after creation
        #[arg(short, long)]
        provider: Option<String>,
        /// Set a widget directly, as WIDGET=VALUE (repeatable)
        #[arg(long = "set", value_name = "WIDGET=VALUE")]
        set: Vec<String>,
        /// Provider to switch to afterwards (repeatable, applied in order)
        #[arg(long = "switch", value_name = "PROVIDER")]
        switch: Vec<String>,
    },
    /// Resolve the API loader configuration for a selection
    Load {
        /// Provider (defaults to the default provider)
        #[arg(short, long)]
        provider: Option<String>,
        /// Text model (defaults to the provider's first)
        #[arg(long)]
        t2t_model: Option<String>,
        /// Vision model (defaults to the provider's first)
        #[arg(long)]
        ti2t_model: Option<String>,
        /// API key (overrides environment and config)
        #[arg(long)]
        api_key: Option<String>,
        /// Endpoint (overrides config and catalog)
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        temperature: Option<f64>,
        #[arg(long)]
        max_tokens: Option<u32>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u32>,
        /// Print the API key unmasked
        #[arg(long)]
        show_key: bool,
    },
    /// Inspect the active catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `catalog` command.
#[derive(Subcommand)]
pub enum CatalogAction {
    /// Print the catalog as TOML
    Show,
}

/// Subcommands for the `config` command.
///
/// Controls reading modelsel's TOML configuration file stored at the XDG
/// config path (`~/.config/modelsel/config.toml`).
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current config
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Command-line values that take precedence over the config file.
struct Overrides {
    variant: Option<Variant>,
    catalog: Option<PathBuf>,
}

/// Loaded config plus the catalog and binding it selects.
struct Workspace {
    config: Config,
    catalog: Rc<ProviderCatalog>,
    spec: BindingSpec,
}

impl Workspace {
    fn load(overrides: &Overrides) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(variant) = overrides.variant {
            config.variant = Some(variant);
        }
        if let Some(ref path) = overrides.catalog {
            config.catalog = Some(path.clone());
        }
        let catalog = config.load_catalog().context("Failed to load provider catalog")?;
        let spec = config.binding_spec(&catalog);
        tracing::debug!(
            variant = ?config.variant(),
            providers = catalog.len(),
            default_provider = %spec.default_provider,
            "workspace loaded"
        );
        Ok(Self {
            config,
            catalog: Rc::new(catalog),
            spec,
        })
    }
}

/// Dispatches the parsed CLI command to its handler.
pub fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        variant: cli.variant.map(Into::into),
        catalog: cli.catalog,
    };
    match cli.command {
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            let config = Config::load()?;
            let path = Config::config_path()?;
            println!("{} {}", "Config path:".bold(), path.display());
            println!();
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Providers => {
            let ws = Workspace::load(&overrides)?;
            inspect::print_providers(&ws.catalog, &ws.spec);
            Ok(())
        }
        Commands::Models { provider } => {
            let ws = Workspace::load(&overrides)?;
            let mut sim = inspect::Simulation::new(&ws.config, &ws.catalog, &ws.spec)?;
            if !ws.catalog.contains(&provider) {
                println!(
                    "{} '{}' is not in the catalog, showing '{}'",
                    "note:".yellow().bold(),
                    provider,
                    ws.spec.default_provider
                );
            }
            sim.set(PROVIDER_WIDGET, &provider)?;
            sim.print_roles();
            Ok(())
        }
        Commands::Select {
            provider,
            set,
            switch,
        } => {
            let ws = Workspace::load(&overrides)?;
            let mut sim = inspect::Simulation::new(&ws.config, &ws.catalog, &ws.spec)?;
            sim.print_step("created");
            if let Some(ref provider) = provider {
                sim.set(PROVIDER_WIDGET, provider)?;
                sim.print_step(&format!("provider = {provider}"));
            }
            for assignment in &set {
                let (widget, value) = assignment
                    .split_once('=')
                    .with_context(|| format!("Expected WIDGET=VALUE, got '{assignment}'"))?;
                sim.set(widget.trim(), value.trim())?;
                sim.print_step(&format!("{} = {}", widget.trim(), value.trim()));
            }
            for next in &switch {
                sim.set(PROVIDER_WIDGET, next)?;
                sim.print_step(&format!("switch to {next}"));
            }
            println!("{}", format!("[{} redraws]", sim.redraws()).dimmed());
            Ok(())
        }
        Commands::Load {
            provider,
            t2t_model,
            ti2t_model,
            api_key,
            base_url,
            temperature,
            max_tokens,
            timeout,
            show_key,
        } => {
            let ws = Workspace::load(&overrides)?;
            let mut sim = inspect::Simulation::new(&ws.config, &ws.catalog, &ws.spec)?;
            if let Some(ref provider) = provider {
                sim.set(PROVIDER_WIDGET, provider)?;
            }
            let selected = sim.selected_models();
            let input = LoaderInput {
                provider: sim.provider(),
                t2t_model: t2t_model
                    .or_else(|| selected.first().cloned())
                    .unwrap_or_default(),
                ti2t_model: ti2t_model
                    .or_else(|| selected.get(1).cloned())
                    .unwrap_or_default(),
                api_key,
                base_url,
                temperature,
                max_tokens,
                timeout,
            };
            let model_config = loader::load_api(&input, &ws.catalog, &ws.config)?;
            let shown = if show_key {
                model_config
            } else {
                model_config.masked()
            };
            println!("{}", serde_json::to_string_pretty(&shown)?);
            Ok(())
        }
        Commands::Catalog {
            action: CatalogAction::Show,
        } => {
            let ws = Workspace::load(&overrides)?;
            let source = match ws.config.catalog {
                Some(ref path) => path.display().to_string(),
                None => format!("built-in ({})", ws.config.variant().node_type()),
            };
            println!("{} {}", "Catalog:".bold(), source);
            println!();
            println!("{}", ws.catalog.to_toml()?);
            Ok(())
        }
    }
}
