//! Loading of snapshot documents

use anyhow::{bail, Context, Result};
use cost_engine::migration::{normalize_project, parse_project};
use cost_engine::{InstanceCatalog, Organization, Project, UsagePricingRegistry};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {} file {}", what, path.display()))
}

/// Read and normalize a project document
pub fn read_project(path: &Path) -> Result<Project> {
    let content = read(path, "project")?;
    let project = parse_project(&content)
        .with_context(|| format!("Failed to load project {}", path.display()))?;
    debug!(path = %path.display(), runtimes = project.runtimes.len(), "Loaded project");
    Ok(project)
}

/// Read a JSON array of project documents, normalizing each
pub fn read_projects(path: &Path) -> Result<Vec<Project>> {
    let content = read(path, "projects")?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse projects {}", path.display()))?;
    let Value::Array(documents) = raw else {
        bail!("Projects file {} must contain a JSON array", path.display());
    };

    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| {
            normalize_project(document)
                .with_context(|| format!("Failed to load project #{} of {}", index, path.display()))
        })
        .collect()
}

pub fn read_organization(path: &Path) -> Result<Organization> {
    let content = read(path, "organization")?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse organization {}", path.display()))
}

/// Read the flavor catalog, `None` when no catalog is configured
pub fn read_catalog(path: Option<&Path>) -> Result<Option<InstanceCatalog>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = read(path, "catalog")?;
    let catalog = InstanceCatalog::from_json(&content)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    debug!(path = %path.display(), instance_types = catalog.instances.len(), "Loaded catalog");
    Ok(Some(catalog))
}

/// Read the usage pricing registry, empty when none is configured
pub fn read_registry(path: Option<&Path>) -> Result<UsagePricingRegistry> {
    let Some(path) = path else {
        return Ok(UsagePricingRegistry::new());
    };
    let content = read(path, "registry")?;
    UsagePricingRegistry::from_json(&content)
        .with_context(|| format!("Failed to parse registry {}", path.display()))
}
