//! Deployment cost planner CLI
//!
//! A command-line tool for estimating the monthly cost of deployment
//! topologies from project, flavor catalog and usage pricing snapshots.

mod commands;
mod config;
mod inputs;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{costs, organization, presets, project, Session};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Deployment cost planner CLI
#[derive(Parser)]
#[command(name = "costplan")]
#[command(author, version, about = "Estimate monthly deployment costs", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/costplan/config.toml)
    #[arg(long, global = true, env = "COSTPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides default_format from the configuration)
    #[arg(long, short, global = true)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the monthly cost of a project
    Estimate {
        /// Project document
        #[arg(long, short)]
        project: PathBuf,

        /// Flavor catalog snapshot
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Usage pricing registry
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Show the cost breakdown of one runtime
    Runtime {
        /// Project document
        #[arg(long, short)]
        project: PathBuf,

        /// Runtime ID
        #[arg(long)]
        id: String,

        /// Flavor catalog snapshot
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Roll up the cost of an organization's projects
    Org {
        /// Organization document
        #[arg(long)]
        organization: PathBuf,

        /// JSON array of project documents
        #[arg(long)]
        projects: PathBuf,

        /// Flavor catalog snapshot
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Usage pricing registry
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Upgrade a stored project document to the current format
    Normalize {
        /// Stored project document
        #[arg(long, short)]
        input: PathBuf,

        /// Write the result to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check a project for configuration issues
    Check {
        /// Project document
        #[arg(long, short)]
        project: PathBuf,

        /// Flavor catalog snapshot, enables flavor checks
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Usage pricing registry, enables tier checks
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// List schedule presets
    Presets,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let json = std::env::var("COSTPLAN_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = config::Settings::load(cli.config.as_deref())?;
    let session = Session {
        format: settings.format(cli.format)?,
        currency: settings.currency().to_string(),
    };

    // Execute command
    match cli.command {
        Commands::Estimate {
            project,
            catalog,
            registry,
        } => {
            costs::show_estimate(
                &session,
                &project,
                settings.catalog(catalog).as_deref(),
                settings.registry(registry).as_deref(),
            )?;
        }
        Commands::Runtime {
            project,
            id,
            catalog,
        } => {
            costs::show_runtime(&session, &project, &id, settings.catalog(catalog).as_deref())?;
        }
        Commands::Org {
            organization,
            projects,
            catalog,
            registry,
        } => {
            organization::show_organization(
                &session,
                &organization,
                &projects,
                settings.catalog(catalog).as_deref(),
                settings.registry(registry).as_deref(),
            )?;
        }
        Commands::Normalize { input, output } => {
            project::normalize(&input, output.as_deref())?;
        }
        Commands::Check {
            project,
            catalog,
            registry,
        } => {
            project::check(
                &session,
                &project,
                settings.catalog(catalog).as_deref(),
                settings.registry(registry).as_deref(),
            )?;
        }
        Commands::Presets => {
            presets::list_presets(&session)?;
        }
    }

    Ok(())
}
