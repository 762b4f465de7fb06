//! Tiered billing of a metered quantity
//!
//! Usage above the free quota is spread over the tiers in ascending order,
//! each tier absorbing at most its width. Tier lists are trusted as given:
//! gaps or overlaps are not detected here and simply under or over count.

use super::UsageMetric;
use crate::money::round_cents;

/// Monthly cost of `value` units of a metric, rounded to cents
pub fn metric_cost(metric: &UsageMetric, value: f64) -> f64 {
    let billable = (value - metric.free_quota).max(0.0);
    if billable == 0.0 {
        return 0.0;
    }

    let mut remaining = billable;
    let mut total = 0.0;

    for tier in &metric.tiers {
        if remaining <= 0.0 {
            break;
        }
        let quantity = match tier.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        total += quantity * tier.price_per_unit;
        remaining -= quantity;
    }

    round_cents(total)
}
