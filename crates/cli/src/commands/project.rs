//! Project document maintenance commands

use anyhow::{bail, Context, Result};
use colored::Colorize;
use cost_engine::validation::validate_project;
use cost_engine::EstimateLogger;
use std::fs;
use std::path::Path;

use super::Session;
use crate::inputs::{read_catalog, read_project, read_registry};
use crate::output::{print_json, print_success, OutputFormat};

/// Upgrade a stored project to the current shape
pub fn normalize(input: &Path, output: Option<&Path>) -> Result<()> {
    let project = read_project(input)?;
    EstimateLogger::new(input.display().to_string())
        .log_normalized(&project.id, project.runtimes.len());

    let json = serde_json::to_string_pretty(&project)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_success(&format!("Normalized project written to {}", path.display()));
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Report configuration issues of a project
///
/// Fails when any issue is found so that scripts can gate on the exit code.
pub fn check(
    session: &Session,
    project_path: &Path,
    catalog_path: Option<&Path>,
    registry_path: Option<&Path>,
) -> Result<()> {
    let project = read_project(project_path)?;
    let catalog = read_catalog(catalog_path)?;
    let registry = read_registry(registry_path)?;

    let issues = validate_project(&project, catalog.as_ref(), &registry);
    EstimateLogger::new(project_path.display().to_string()).log_validation(&project.id, &issues);

    match session.format {
        OutputFormat::Json => {
            let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
            print_json(&serde_json::json!({
                "projectId": project.id,
                "issues": messages,
            }))?;
        }
        OutputFormat::Table => {
            if issues.is_empty() {
                print_success(&format!("{}: no configuration issues", project.name));
            } else {
                println!("{}", format!("Configuration issues in {}", project.name).bold());
                for issue in &issues {
                    println!("  {} {}", "✗".red().bold(), issue);
                }
            }
        }
    }

    if !issues.is_empty() {
        bail!("{} configuration issue(s) found", issues.len());
    }
    Ok(())
}
