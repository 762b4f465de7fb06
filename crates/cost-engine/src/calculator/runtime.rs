//! Runtime cost over the weekly grid
//!
//! Runtimes that cannot leave their baseline are billed flat over
//! `HOURS_PER_MONTH`. Scaling runtimes sum the 168 resolved hours of one week
//! and repeat that week `WEEKS_PER_MONTH` times.

use crate::catalog::FlavorLookup;
use crate::models::{RuntimeConfig, RuntimeCostDetail};
use crate::money::{round_cents, round_tenths, HOURS_PER_MONTH, HOURS_PER_WEEK, WEEKS_PER_MONTH};
use crate::scaling::{
    baseline_cell, resolve_cell, resolve_profile_at_level, DayOfWeek, BASELINE_PROFILE_ID,
    HOURS_PER_DAY, MAX_LOAD_LEVEL,
};
use std::collections::BTreeMap;
use tracing::trace;

/// Monthly cost of a runtime against its instance type's flavors
pub fn runtime_cost<C: FlavorLookup + ?Sized>(runtime: &RuntimeConfig, catalog: &C) -> RuntimeCostDetail {
    let baseline = baseline_cell(runtime, catalog);

    let mut detail = RuntimeCostDetail {
        runtime_id: runtime.id.clone(),
        runtime_name: display_name(runtime),
        instance_type: runtime.instance_type.clone(),
        base_flavor_name: baseline.flavor_name.clone(),
        base_instances: baseline.instances,
        base_hourly_price: baseline.hourly_price,
        base_monthly_cost: 0.0,
        estimated_scaling_cost: 0.0,
        total_monthly_cost: 0.0,
        min_monthly_cost: 0.0,
        max_monthly_cost: 0.0,
        scaling_hours: 0,
        average_load_level: 0.0,
        scaling_hours_by_profile: BTreeMap::new(),
        cost_by_profile: BTreeMap::new(),
    };

    if !runtime.has_active_scaling() {
        let monthly = round_cents(baseline.hourly_cost() * HOURS_PER_MONTH);
        detail.base_monthly_cost = monthly;
        detail.total_monthly_cost = monthly;
        detail.min_monthly_cost = monthly;
        detail.max_monthly_cost = monthly;
        detail
            .cost_by_profile
            .insert(BASELINE_PROFILE_ID.to_string(), monthly);

        trace!(
            runtime_id = %runtime.id,
            total = monthly,
            "Fixed-price runtime"
        );
        return detail;
    }

    let mut weekly_total = 0.0;
    let mut weekly_by_profile: BTreeMap<String, f64> = BTreeMap::new();
    let mut level_sum = 0u32;

    for day in DayOfWeek::ALL {
        for hour in 0..HOURS_PER_DAY {
            let cell = resolve_cell(runtime, day, hour, catalog);
            let hourly = cell.hourly_cost();
            weekly_total += hourly;

            if cell.is_scaling() {
                detail.scaling_hours += 1;
                level_sum += u32::from(cell.load_level);
                *detail
                    .scaling_hours_by_profile
                    .entry(cell.profile_id.clone())
                    .or_insert(0) += 1;
            }
            *weekly_by_profile.entry(cell.profile_id).or_insert(0.0) += hourly;
        }
    }

    let week = HOURS_PER_WEEK as f64;
    let envelope_max_hourly = runtime
        .active_scaling_profiles()
        .map(|profile| resolve_profile_at_level(profile, MAX_LOAD_LEVEL, catalog).hourly_cost())
        .fold(baseline.hourly_cost(), f64::max);

    detail.total_monthly_cost = round_cents(weekly_total * WEEKS_PER_MONTH);
    detail.min_monthly_cost = round_cents(baseline.hourly_cost() * week * WEEKS_PER_MONTH);
    detail.max_monthly_cost = round_cents(envelope_max_hourly * week * WEEKS_PER_MONTH);
    detail.base_monthly_cost = detail.min_monthly_cost;
    detail.estimated_scaling_cost =
        round_cents((detail.total_monthly_cost - detail.min_monthly_cost).max(0.0));
    detail.cost_by_profile = weekly_by_profile
        .into_iter()
        .map(|(id, weekly)| (id, round_cents(weekly * WEEKS_PER_MONTH)))
        .collect();
    if detail.scaling_hours > 0 {
        detail.average_load_level =
            round_tenths(f64::from(level_sum) / f64::from(detail.scaling_hours));
    }

    trace!(
        runtime_id = %runtime.id,
        total = detail.total_monthly_cost,
        min = detail.min_monthly_cost,
        max = detail.max_monthly_cost,
        scaling_hours = detail.scaling_hours,
        "Scaling runtime"
    );

    detail
}

fn display_name(runtime: &RuntimeConfig) -> String {
    if runtime.instance_name.is_empty() {
        runtime.instance_type.clone()
    } else {
        runtime.instance_name.clone()
    }
}
