//! Configuration management for the CLI
//!
//! Settings come from an optional TOML file, overlaid by `COSTPLAN_*`
//! environment variables. Command-line flags win over both.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Currency used when none is configured
pub const DEFAULT_CURRENCY: &str = "EUR";

/// CLI settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Flavor catalog snapshot used when `--catalog` is not given
    pub catalog_path: Option<PathBuf>,
    /// Usage pricing registry used when `--registry` is not given
    pub registry_path: Option<PathBuf>,
    /// Default output format (table or json)
    pub default_format: Option<String>,
    /// Currency code for displayed amounts
    pub currency: Option<String>,
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        let file = path.map(Path::to_path_buf).or_else(Self::config_path);
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file).required(path.is_some()));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("COSTPLAN"))
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        let home = dirs_next::home_dir()?;
        Some(home.join(".config").join("costplan").join("config.toml"))
    }

    /// Flag value if given, else the configured catalog path
    pub fn catalog(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.catalog_path.clone())
    }

    /// Flag value if given, else the configured registry path
    pub fn registry(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.registry_path.clone())
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    /// Flag value if given, else the configured format, else table
    pub fn format(&self, flag: Option<OutputFormat>) -> Result<OutputFormat> {
        if let Some(format) = flag {
            return Ok(format);
        }
        match self.default_format.as_deref() {
            Some(name) => OutputFormat::from_str(name, true)
                .map_err(|err| anyhow::anyhow!("Invalid default_format `{}`: {}", name, err)),
            None => Ok(OutputFormat::default()),
        }
    }
}
