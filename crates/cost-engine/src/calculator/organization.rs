//! Organization roll-up, budget tracking and projections

use crate::models::{Organization, Project, ProjectCostSummary, RuntimeCostDetail};
use crate::money::round_cents;
use serde::Serialize;
use std::collections::HashSet;

/// Month counts offered for cost projections
pub const PROJECTION_HORIZONS: [u32; 6] = [1, 3, 6, 12, 24, 36];

/// Utilization percent from which a budget is reported as near its limit
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Increases offered as budget suggestions, in percent
const SUGGESTED_INCREASES: [u32; 3] = [10, 20, 50];

/// Anything with a monthly cost and a min/max envelope
pub trait MonthlyEnvelope {
    fn monthly_total(&self) -> f64;
    fn monthly_min(&self) -> f64;
    fn monthly_max(&self) -> f64;
}

impl MonthlyEnvelope for RuntimeCostDetail {
    fn monthly_total(&self) -> f64 {
        self.total_monthly_cost
    }
    fn monthly_min(&self) -> f64 {
        self.min_monthly_cost
    }
    fn monthly_max(&self) -> f64 {
        self.max_monthly_cost
    }
}

impl MonthlyEnvelope for ProjectCostSummary {
    fn monthly_total(&self) -> f64 {
        self.total_monthly_cost
    }
    fn monthly_min(&self) -> f64 {
        self.min_monthly_cost
    }
    fn monthly_max(&self) -> f64 {
        self.max_monthly_cost
    }
}

impl MonthlyEnvelope for OrganizationCostSummary {
    fn monthly_total(&self) -> f64 {
        self.total_monthly_cost
    }
    fn monthly_min(&self) -> f64 {
        self.min_monthly_cost
    }
    fn monthly_max(&self) -> f64 {
        self.max_monthly_cost
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetLevel {
    WithinBudget,
    NearLimit,
    OverBudget,
}

impl BudgetLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 100.0 {
            BudgetLevel::OverBudget
        } else if percent >= NEAR_LIMIT_PERCENT {
            BudgetLevel::NearLimit
        } else {
            BudgetLevel::WithinBudget
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetLevel::WithinBudget => "within budget",
            BudgetLevel::NearLimit => "near limit",
            BudgetLevel::OverBudget => "over budget",
        }
    }
}

/// Position of the current cost against a monthly budget target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub target: f64,
    pub utilization_percent: f64,
    /// Utilization if every runtime ran at its maximum
    pub max_utilization_percent: f64,
    /// Budget left, negative when over
    pub remaining: f64,
    pub level: BudgetLevel,
}

impl BudgetStatus {
    /// Evaluate a budget, `None` when no positive target is set
    pub fn evaluate(target: Option<f64>, total: f64, max: f64) -> Option<Self> {
        let target = target.filter(|t| *t > 0.0)?;
        let utilization_percent = total / target * 100.0;
        Some(Self {
            target,
            utilization_percent: round_cents(utilization_percent),
            max_utilization_percent: round_cents(max / target * 100.0),
            remaining: round_cents(target - total),
            level: BudgetLevel::from_percent(utilization_percent),
        })
    }

    /// Whether the upper end of the cost range would break the budget
    /// while the current estimate does not
    pub fn range_exceeds_target(&self) -> bool {
        self.level != BudgetLevel::OverBudget && self.max_utilization_percent > 100.0
    }
}

/// A project's weight in its organization's cost
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectShare {
    pub project_id: String,
    pub project_name: String,
    pub total_monthly_cost: f64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCostSummary {
    pub organization_id: String,
    pub organization_name: String,
    pub project_count: usize,
    pub total_monthly_cost: f64,
    pub min_monthly_cost: f64,
    pub max_monthly_cost: f64,
    /// Ordered by decreasing cost
    pub projects: Vec<ProjectShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetStatus>,
}

/// Roll up the cost of an organization's projects
///
/// Only summaries of projects whose `organization_id` matches are counted.
pub fn organization_cost(
    organization: &Organization,
    projects: &[Project],
    summaries: &[ProjectCostSummary],
) -> OrganizationCostSummary {
    let members: HashSet<&str> = projects
        .iter()
        .filter(|p| p.organization_id == organization.id)
        .map(|p| p.id.as_str())
        .collect();
    let included: Vec<&ProjectCostSummary> = summaries
        .iter()
        .filter(|s| members.contains(s.project_id.as_str()))
        .collect();

    let total = round_cents(included.iter().map(|s| s.total_monthly_cost).sum());
    let min = round_cents(included.iter().map(|s| s.min_monthly_cost).sum());
    let max = round_cents(included.iter().map(|s| s.max_monthly_cost).sum());

    let mut shares: Vec<ProjectShare> = included
        .iter()
        .map(|s| ProjectShare {
            project_id: s.project_id.clone(),
            project_name: s.project_name.clone(),
            total_monthly_cost: s.total_monthly_cost,
            share_percent: if total > 0.0 {
                round_cents(s.total_monthly_cost / total * 100.0)
            } else {
                0.0
            },
        })
        .collect();
    shares.sort_by(|a, b| {
        b.total_monthly_cost
            .total_cmp(&a.total_monthly_cost)
            .then_with(|| a.project_id.cmp(&b.project_id))
    });

    OrganizationCostSummary {
        organization_id: organization.id.clone(),
        organization_name: organization.name.clone(),
        project_count: included.len(),
        total_monthly_cost: total,
        min_monthly_cost: min,
        max_monthly_cost: max,
        projects: shares,
        budget: BudgetStatus::evaluate(organization.budget_target, total, max),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedBudget {
    pub label: String,
    pub value: f64,
}

/// Budgets 10, 20 and 50 percent above the current cost, rounded up to a
/// multiple of 10
pub fn suggested_budgets(current_cost: f64) -> Vec<SuggestedBudget> {
    SUGGESTED_INCREASES
        .iter()
        .map(|percent| {
            let raised = round_cents(current_cost * f64::from(100 + percent) / 100.0);
            SuggestedBudget {
                label: format!("+{}%", percent),
                value: (raised / 10.0).ceil() * 10.0,
            }
        })
        .collect()
}

/// Cumulative cost over a number of months
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjection {
    pub months: u32,
    pub total: f64,
    pub min: f64,
    pub max: f64,
}

/// Project a monthly cost over `months`
pub fn project_over<E: MonthlyEnvelope + ?Sized>(envelope: &E, months: u32) -> CostProjection {
    let factor = f64::from(months);
    CostProjection {
        months,
        total: round_cents(envelope.monthly_total() * factor),
        min: round_cents(envelope.monthly_min() * factor),
        max: round_cents(envelope.monthly_max() * factor),
    }
}

/// Projections over every standard horizon
pub fn projections<E: MonthlyEnvelope + ?Sized>(envelope: &E) -> Vec<CostProjection> {
    PROJECTION_HORIZONS
        .iter()
        .map(|months| project_over(envelope, *months))
        .collect()
}
