//! Subcommand implementations

pub mod costs;
pub mod organization;
pub mod presets;
pub mod project;

use crate::output::OutputFormat;

/// Resolved presentation settings shared by every command
#[derive(Debug, Clone)]
pub struct Session {
    pub format: OutputFormat,
    pub currency: String,
}
