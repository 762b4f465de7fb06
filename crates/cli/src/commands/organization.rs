//! Organization roll-up command

use anyhow::Result;
use colored::Colorize;
use cost_engine::calculator::{
    organization_cost, projections, suggested_budgets, CostProjection, OrganizationCostSummary,
    SuggestedBudget,
};
use cost_engine::{project_cost, EstimateLogger};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use super::Session;
use crate::inputs::{read_catalog, read_organization, read_projects, read_registry};
use crate::output::{
    color_budget_level, format_currency, format_percent, format_range, print_heading, print_json,
    print_warning, render_table, OutputFormat,
};

/// Organization report as printed in JSON mode
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationReport {
    summary: OrganizationCostSummary,
    projections: Vec<CostProjection>,
    suggested_budgets: Vec<SuggestedBudget>,
    generated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Project")]
    name: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Months")]
    months: u32,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Range")]
    range: String,
}

/// Show the cost roll-up of an organization
pub fn show_organization(
    session: &Session,
    organization_path: &Path,
    projects_path: &Path,
    catalog_path: Option<&Path>,
    registry_path: Option<&Path>,
) -> Result<()> {
    let organization = read_organization(organization_path)?;
    let projects = read_projects(projects_path)?;
    let registry = read_registry(registry_path)?;
    let logger = EstimateLogger::new(organization_path.display().to_string());

    let Some(catalog) = read_catalog(catalog_path)? else {
        logger.log_catalog_not_ready(&organization.id);
        match session.format {
            OutputFormat::Json => print_json(&Option::<OrganizationReport>::None)?,
            OutputFormat::Table => {
                print_warning("Flavor catalog not loaded: pass --catalog or set catalog_path")
            }
        }
        return Ok(());
    };

    let summaries: Vec<_> = projects
        .iter()
        .filter_map(|project| project_cost(project, Some(&catalog), &registry))
        .collect();
    let summary = organization_cost(&organization, &projects, &summaries);
    logger.log_organization_rollup(&summary);

    let report = OrganizationReport {
        projections: projections(&summary),
        suggested_budgets: suggested_budgets(summary.total_monthly_cost),
        summary,
        generated_at: chrono::Utc::now(),
    };

    match session.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_report(&report, &session.currency),
    }

    Ok(())
}

fn print_report(report: &OrganizationReport, currency: &str) {
    let summary = &report.summary;

    println!(
        "{}",
        format!("Organization: {}", summary.organization_name).bold()
    );
    println!("{}", "=".repeat(50));
    println!("Projects:               {}", summary.project_count);
    println!(
        "{}       {}",
        "Total per month:".bold(),
        format_currency(summary.total_monthly_cost, currency)
            .green()
            .bold()
    );
    println!(
        "Range:                  {}",
        format_range(summary.min_monthly_cost, summary.max_monthly_cost, currency)
    );
    println!();

    if !summary.projects.is_empty() {
        print_heading("Projects");
        let rows: Vec<ProjectRow> = summary
            .projects
            .iter()
            .map(|p| ProjectRow {
                name: p.project_name.clone(),
                monthly: format_currency(p.total_monthly_cost, currency),
                share: format_percent(p.share_percent),
            })
            .collect();
        println!("{}", render_table(rows));
        println!();
    }

    print_heading("Budget");
    match &summary.budget {
        Some(budget) => {
            println!(
                "Target:                 {}",
                format_currency(budget.target, currency)
            );
            println!(
                "Utilization:            {} ({})",
                format_percent(budget.utilization_percent),
                color_budget_level(budget.level)
            );
            println!(
                "Remaining:              {}",
                format_currency(budget.remaining, currency)
            );
            if budget.range_exceeds_target() {
                print_warning(&format!(
                    "Peak scaling could reach {} of the budget",
                    format_percent(budget.max_utilization_percent)
                ));
            }
        }
        None => {
            let suggestions: Vec<String> = report
                .suggested_budgets
                .iter()
                .map(|s| format!("{} {}", s.label, format_currency(s.value, currency)))
                .collect();
            println!("No budget set. Suggestions: {}", suggestions.join(", "));
        }
    }
    println!();

    print_heading("Projections");
    let rows: Vec<ProjectionRow> = report
        .projections
        .iter()
        .map(|p| ProjectionRow {
            months: p.months,
            total: format_currency(p.total, currency),
            range: format_range(p.min, p.max, currency),
        })
        .collect();
    println!("{}", render_table(rows));
}
