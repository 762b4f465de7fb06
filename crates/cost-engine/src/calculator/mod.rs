//! Monthly cost aggregation
//!
//! This module provides:
//! - Runtime cost over the 168-hour weekly grid, with its min/max envelope
//! - Project cost (runtimes plus add-ons)
//! - Organization roll-up, budget status and multi-month projections
//!
//! Every function here is pure: identical inputs give bit-identical output.

mod organization;
mod project;
mod runtime;

#[cfg(test)]
mod tests;

pub use organization::{
    organization_cost, project_over, projections, suggested_budgets, BudgetLevel, BudgetStatus,
    CostProjection, MonthlyEnvelope, OrganizationCostSummary, ProjectShare, SuggestedBudget,
    NEAR_LIMIT_PERCENT, PROJECTION_HORIZONS,
};
pub use project::project_cost;
pub use runtime::runtime_cost;
