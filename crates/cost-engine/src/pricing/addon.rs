//! Monthly price of an add-on
//!
//! Providers without a usage pricing record bill their flat plan price.
//! Usage-billed providers add the tiered cost of every metric they define,
//! using the add-on's estimate when present and the metric default otherwise.

use super::{metric_cost, UsagePricingLookup};
use crate::models::{AddonConfig, AddonCostDetail, UsageMetricCostDetail};
use crate::money::round_cents;
use tracing::trace;

/// Resolve the monthly price of an add-on against a pricing registry
pub fn resolve_addon<R: UsagePricingLookup + ?Sized>(
    addon: &AddonConfig,
    registry: &R,
) -> AddonCostDetail {
    let mut detail = AddonCostDetail {
        addon_id: addon.id.clone(),
        provider_id: addon.provider_id.clone(),
        provider_name: addon.provider_name.clone(),
        plan_name: addon.plan_name.clone(),
        monthly_price: addon.monthly_price,
        is_usage_based: false,
        is_estimate: false,
        usage_cost: None,
        usage_details: Vec::new(),
    };

    let Some(pricing) = registry.usage_pricing(&addon.provider_id) else {
        return detail;
    };

    detail.usage_details = pricing
        .metrics
        .iter()
        .map(|metric| {
            let value = addon
                .estimate_for(&metric.id)
                .unwrap_or(metric.default_value);
            UsageMetricCostDetail {
                metric_id: metric.id.clone(),
                metric_name: metric.name.clone(),
                value,
                unit: metric.unit.clone(),
                cost: metric_cost(metric, value),
                free_quota_applied: value.min(metric.free_quota),
            }
        })
        .collect();

    let usage_cost = round_cents(detail.usage_details.iter().map(|d| d.cost).sum());
    detail.monthly_price = round_cents(addon.monthly_price + usage_cost);
    detail.usage_cost = Some(usage_cost);
    detail.is_usage_based = true;
    detail.is_estimate = true;

    trace!(
        addon_id = %addon.id,
        provider_id = %addon.provider_id,
        metrics = detail.usage_details.len(),
        usage_cost = usage_cost,
        monthly_price = detail.monthly_price,
        "Resolved usage-based add-on"
    );

    detail
}
