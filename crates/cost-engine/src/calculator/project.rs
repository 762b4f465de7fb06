//! Project cost roll-up

use super::runtime_cost;
use crate::catalog::InstanceCatalog;
use crate::models::{Project, ProjectCostSummary};
use crate::money::round_cents;
use crate::pricing::{resolve_addon, UsagePricingLookup};
use tracing::{debug, trace};

/// Monthly cost of a project
///
/// Returns `None` while the flavor catalog has not been loaded; callers must
/// not confuse that with a computed zero. Runtimes whose instance type is
/// missing from a loaded catalog price at zero.
pub fn project_cost<R: UsagePricingLookup + ?Sized>(
    project: &Project,
    catalog: Option<&InstanceCatalog>,
    registry: &R,
) -> Option<ProjectCostSummary> {
    let Some(catalog) = catalog else {
        debug!(project_id = %project.id, "Flavor catalog not loaded, no estimate");
        return None;
    };

    let runtimes_detail: Vec<_> = project
        .runtimes
        .iter()
        .map(|runtime| runtime_cost(runtime, catalog.flavors_for(&runtime.instance_type)))
        .collect();
    let addons_detail: Vec<_> = project
        .addons
        .iter()
        .map(|addon| resolve_addon(addon, registry))
        .collect();

    let runtimes_cost = round_cents(runtimes_detail.iter().map(|d| d.total_monthly_cost).sum());
    let addons_cost = round_cents(addons_detail.iter().map(|d| d.monthly_price).sum());
    let runtimes_min: f64 = runtimes_detail.iter().map(|d| d.min_monthly_cost).sum();
    let runtimes_max: f64 = runtimes_detail.iter().map(|d| d.max_monthly_cost).sum();

    let summary = ProjectCostSummary {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        runtimes_cost,
        runtimes_detail,
        addons_cost,
        addons_detail,
        total_monthly_cost: round_cents(runtimes_cost + addons_cost),
        min_monthly_cost: round_cents(runtimes_min + addons_cost),
        max_monthly_cost: round_cents(runtimes_max + addons_cost),
    };

    trace!(
        project_id = %project.id,
        runtimes = summary.runtimes_detail.len(),
        addons = summary.addons_detail.len(),
        total = summary.total_monthly_cost,
        "Project cost computed"
    );

    Some(summary)
}
