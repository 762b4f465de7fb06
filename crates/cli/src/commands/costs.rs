//! Cost-related CLI commands

use anyhow::{Context, Result};
use colored::Colorize;
use cost_engine::calculator::{project_cost, runtime_cost};
use cost_engine::money::HOURS_PER_WEEK;
use cost_engine::scaling::BASELINE_PROFILE_ID;
use cost_engine::{EstimateLogger, ProjectCostSummary, RuntimeCostDetail};
use std::path::Path;
use tabled::Tabled;

use super::Session;
use crate::inputs::{read_catalog, read_project, read_registry};
use crate::output::{
    color_load_level, format_currency, format_range, print_heading, print_json, print_warning,
    render_table, OutputFormat,
};

/// Row for the runtimes table
#[derive(Tabled)]
struct RuntimeRow {
    #[tabled(rename = "Runtime")]
    name: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Scaling h/week")]
    scaling_hours: u32,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Range")]
    range: String,
}

/// Row for the add-ons table
#[derive(Tabled)]
struct AddonRow {
    #[tabled(rename = "Add-on")]
    provider: String,
    #[tabled(rename = "Plan")]
    plan: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

/// Row for the per-profile breakdown
#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "Hours/week")]
    hours: u32,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

/// Show the cost estimate of a project
pub fn show_estimate(
    session: &Session,
    project_path: &Path,
    catalog_path: Option<&Path>,
    registry_path: Option<&Path>,
) -> Result<()> {
    let project = read_project(project_path)?;
    let catalog = read_catalog(catalog_path)?;
    let registry = read_registry(registry_path)?;
    let logger = EstimateLogger::new(project_path.display().to_string());

    let Some(summary) = project_cost(&project, catalog.as_ref(), &registry) else {
        logger.log_catalog_not_ready(&project.id);
        match session.format {
            OutputFormat::Json => print_json(&Option::<ProjectCostSummary>::None)?,
            OutputFormat::Table => {
                print_warning("Flavor catalog not loaded: pass --catalog or set catalog_path")
            }
        }
        return Ok(());
    };
    logger.log_project_estimate(&summary);

    match session.format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => print_summary(&summary, &session.currency),
    }

    Ok(())
}

fn print_summary(summary: &ProjectCostSummary, currency: &str) {
    println!("{}", format!("Cost Estimate: {}", summary.project_name).bold());
    println!("{}", "=".repeat(50));
    println!();

    if !summary.runtimes_detail.is_empty() {
        print_heading("Runtimes");
        let rows: Vec<RuntimeRow> = summary
            .runtimes_detail
            .iter()
            .map(|r| RuntimeRow {
                name: r.runtime_name.clone(),
                baseline: format!("{} x {}", r.base_instances, r.base_flavor_name),
                scaling_hours: r.scaling_hours,
                monthly: format_currency(r.total_monthly_cost, currency),
                range: format_range(r.min_monthly_cost, r.max_monthly_cost, currency),
            })
            .collect();
        println!("{}", render_table(rows));
        println!();
    }

    if !summary.addons_detail.is_empty() {
        print_heading("Add-ons");
        let rows: Vec<AddonRow> = summary
            .addons_detail
            .iter()
            .map(|a| AddonRow {
                provider: a.provider_name.clone(),
                plan: a.plan_name.clone(),
                usage: match a.usage_cost {
                    Some(cost) => format!("~{}", format_currency(cost, currency)),
                    None => "-".to_string(),
                },
                monthly: format_currency(a.monthly_price, currency),
            })
            .collect();
        println!("{}", render_table(rows));
        println!();
    }

    println!(
        "Runtimes:               {}",
        format_currency(summary.runtimes_cost, currency)
    );
    println!(
        "Add-ons:                {}",
        format_currency(summary.addons_cost, currency)
    );
    println!(
        "{}       {}",
        "Total per month:".bold(),
        format_currency(summary.total_monthly_cost, currency)
            .green()
            .bold()
    );
    if summary.min_monthly_cost != summary.max_monthly_cost {
        println!(
            "Range:                  {}",
            format_range(summary.min_monthly_cost, summary.max_monthly_cost, currency).dimmed()
        );
    }
    if summary.addons_detail.iter().any(|a| a.is_estimate) {
        println!("{}", "Usage-based add-ons are estimates.".dimmed());
    }
}

/// Show the cost breakdown of one runtime
pub fn show_runtime(
    session: &Session,
    project_path: &Path,
    runtime_id: &str,
    catalog_path: Option<&Path>,
) -> Result<()> {
    let project = read_project(project_path)?;
    let runtime = project
        .runtimes
        .iter()
        .find(|r| r.id == runtime_id)
        .with_context(|| format!("Runtime {} not found in {}", runtime_id, project_path.display()))?;
    let logger = EstimateLogger::new(project_path.display().to_string());

    let Some(catalog) = read_catalog(catalog_path)? else {
        logger.log_catalog_not_ready(&project.id);
        match session.format {
            OutputFormat::Json => print_json(&Option::<RuntimeCostDetail>::None)?,
            OutputFormat::Table => {
                print_warning("Flavor catalog not loaded: pass --catalog or set catalog_path")
            }
        }
        return Ok(());
    };

    let detail = runtime_cost(runtime, catalog.flavors_for(&runtime.instance_type));
    logger.log_runtime_estimate(&detail);

    match session.format {
        OutputFormat::Json => print_json(&detail)?,
        OutputFormat::Table => print_runtime(&detail, &session.currency),
    }

    Ok(())
}

fn print_runtime(detail: &RuntimeCostDetail, currency: &str) {
    println!("{}", format!("Runtime: {}", detail.runtime_name).bold());
    println!("{}", "=".repeat(50));
    println!("ID:                     {}", detail.runtime_id.cyan());
    println!("Instance type:          {}", detail.instance_type);
    println!(
        "Baseline:               {} x {} at {}/h",
        detail.base_instances,
        detail.base_flavor_name,
        format_currency(detail.base_hourly_price, currency)
    );
    println!();

    print_heading("Monthly Costs");
    println!(
        "Baseline:               {}",
        format_currency(detail.base_monthly_cost, currency)
    );
    println!(
        "Scaling:                {}",
        format_currency(detail.estimated_scaling_cost, currency)
    );
    println!(
        "{}                  {}",
        "Total:".bold(),
        format_currency(detail.total_monthly_cost, currency)
            .green()
            .bold()
    );
    println!(
        "Range:                  {}",
        format_range(detail.min_monthly_cost, detail.max_monthly_cost, currency)
    );
    println!();

    if detail.scaling_hours > 0 {
        println!(
            "Scaling hours/week:     {} (average load {})",
            detail.scaling_hours,
            color_load_level(detail.average_load_level)
        );
        println!();
    }

    if detail.cost_by_profile.len() > 1 {
        print_heading("By Profile");
        let rows: Vec<ProfileRow> = detail
            .cost_by_profile
            .iter()
            .map(|(profile, cost)| ProfileRow {
                profile: profile.clone(),
                hours: if profile == BASELINE_PROFILE_ID {
                    HOURS_PER_WEEK as u32 - detail.scaling_hours
                } else {
                    detail
                        .scaling_hours_by_profile
                        .get(profile)
                        .copied()
                        .unwrap_or(0)
                },
                monthly: format_currency(*cost, currency),
            })
            .collect();
        println!("{}", render_table(rows));
    }
}
