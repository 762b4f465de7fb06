//! Structured logging of estimate computations
//!
//! Every significant result is emitted as a `tracing` event with a stable
//! `event` field so that JSON log output can be filtered per event kind.

use crate::calculator::{BudgetLevel, OrganizationCostSummary};
use crate::models::{ProjectCostSummary, RuntimeCostDetail};
use crate::validation::ConfigIssue;
use tracing::{info, warn};

/// Structured logger for estimate events
///
/// `source` identifies where the inputs came from, e.g. a project file path.
#[derive(Clone)]
pub struct EstimateLogger {
    source: String,
}

impl EstimateLogger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Log a computed project estimate
    pub fn log_project_estimate(&self, summary: &ProjectCostSummary) {
        info!(
            event = "project_estimated",
            source = %self.source,
            project_id = %summary.project_id,
            runtimes = summary.runtimes_detail.len(),
            addons = summary.addons_detail.len(),
            runtimes_cost = summary.runtimes_cost,
            addons_cost = summary.addons_cost,
            total_monthly_cost = summary.total_monthly_cost,
            min_monthly_cost = summary.min_monthly_cost,
            max_monthly_cost = summary.max_monthly_cost,
            "Computed project estimate"
        );
    }

    /// Log a single runtime breakdown
    pub fn log_runtime_estimate(&self, detail: &RuntimeCostDetail) {
        info!(
            event = "runtime_estimated",
            source = %self.source,
            runtime_id = %detail.runtime_id,
            instance_type = %detail.instance_type,
            scaling_hours = detail.scaling_hours,
            total_monthly_cost = detail.total_monthly_cost,
            min_monthly_cost = detail.min_monthly_cost,
            max_monthly_cost = detail.max_monthly_cost,
            "Computed runtime estimate"
        );
    }

    /// Log that an estimate was skipped because flavor prices are missing
    pub fn log_catalog_not_ready(&self, project_id: &str) {
        warn!(
            event = "catalog_not_ready",
            source = %self.source,
            project_id = %project_id,
            "Flavor catalog not loaded, estimate skipped"
        );
    }

    /// Log an organization roll-up, escalating when the budget is at risk
    pub fn log_organization_rollup(&self, summary: &OrganizationCostSummary) {
        let level = summary.budget.as_ref().map(|b| b.level);
        let utilization = summary.budget.as_ref().map(|b| b.utilization_percent);

        match level {
            Some(BudgetLevel::OverBudget) | Some(BudgetLevel::NearLimit) => {
                warn!(
                    event = "organization_budget",
                    source = %self.source,
                    organization_id = %summary.organization_id,
                    projects = summary.project_count,
                    total_monthly_cost = summary.total_monthly_cost,
                    utilization_percent = ?utilization,
                    level = ?level,
                    "Organization cost close to or over budget"
                );
            }
            _ => {
                info!(
                    event = "organization_rollup",
                    source = %self.source,
                    organization_id = %summary.organization_id,
                    projects = summary.project_count,
                    total_monthly_cost = summary.total_monthly_cost,
                    utilization_percent = ?utilization,
                    "Computed organization roll-up"
                );
            }
        }
    }

    /// Log the outcome of a configuration check
    pub fn log_validation(&self, project_id: &str, issues: &[ConfigIssue]) {
        if issues.is_empty() {
            info!(
                event = "config_checked",
                source = %self.source,
                project_id = %project_id,
                issues = 0,
                "Configuration check passed"
            );
        } else {
            warn!(
                event = "config_checked",
                source = %self.source,
                project_id = %project_id,
                issues = issues.len(),
                first_issue = %issues[0],
                "Configuration check found issues"
            );
        }
    }

    /// Log a normalized project document
    pub fn log_normalized(&self, project_id: &str, runtimes: usize) {
        info!(
            event = "project_normalized",
            source = %self.source,
            project_id = %project_id,
            runtimes = runtimes,
            "Normalized stored project"
        );
    }
}
