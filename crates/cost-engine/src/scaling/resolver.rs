//! Resolution of a schedule hour to a concrete size
//!
//! An hour resolves to an instance count, a flavor, and that flavor's
//! hourly price. Anything that cannot be resolved (scaling off, missing
//! schedule, level 0, unknown or disabled profile) falls back to the
//! runtime's baseline so a dangling reference never blocks an estimate.
//!
//! Interpolation between a profile's bounds uses the fraction
//! `(level - 1) / 4`: level 1 is the profile minimum and level 5 the
//! maximum. Flavor selection is discrete: levels 1 and 2 use the minimum
//! flavor, levels 3 to 5 the maximum flavor.

use super::{DayOfWeek, ScalingProfile, BASELINE_PROFILE_ID, MAX_LOAD_LEVEL};
use crate::catalog::FlavorLookup;
use crate::models::RuntimeConfig;
use serde::Serialize;
use tracing::debug;

/// First load level that switches to the profile's maximum flavor
pub const MAX_FLAVOR_THRESHOLD: u8 = 3;

/// Instance count and flavor of a profile at one load level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledSize<'a> {
    pub instances: u32,
    pub flavor_name: &'a str,
}

/// Size a profile reaches at `load_level`
///
/// Levels above 5 are treated as 5 and level 0 as 1; callers handle the
/// baseline case before asking a profile for a size.
pub fn profile_size_at(profile: &ScalingProfile, load_level: u8) -> ScaledSize<'_> {
    let level = load_level.clamp(1, MAX_LOAD_LEVEL);
    let fraction = f64::from(level - 1) / f64::from(MAX_LOAD_LEVEL - 1);

    let min = f64::from(profile.min_instances);
    let max = f64::from(profile.max_instances);
    let instances = (min + (max - min) * fraction).round().max(0.0) as u32;

    let flavor_name = if level >= MAX_FLAVOR_THRESHOLD {
        profile.max_flavor_name.as_str()
    } else {
        profile.min_flavor_name.as_str()
    };

    ScaledSize {
        instances,
        flavor_name,
    }
}

/// Resolved size and price of one schedule hour
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCell {
    /// Profile that produced the size, baseline included
    pub profile_id: String,
    /// Effective level, 0 when the hour fell back to baseline
    pub load_level: u8,
    pub instances: u32,
    pub flavor_name: String,
    /// Price of one instance of `flavor_name` for one hour
    pub hourly_price: f64,
}

impl ResolvedCell {
    /// Cost of the whole hour
    pub fn hourly_cost(&self) -> f64 {
        f64::from(self.instances) * self.hourly_price
    }

    /// Whether the hour runs above baseline
    pub fn is_scaling(&self) -> bool {
        self.load_level > 0 && self.profile_id != BASELINE_PROFILE_ID
    }
}

/// Baseline size and price of a runtime
pub fn baseline_cell<C: FlavorLookup + ?Sized>(runtime: &RuntimeConfig, catalog: &C) -> ResolvedCell {
    let baseline = &runtime.baseline_config;
    ResolvedCell {
        profile_id: BASELINE_PROFILE_ID.to_string(),
        load_level: 0,
        instances: baseline.instances,
        flavor_name: baseline.flavor_name.clone(),
        hourly_price: catalog.hourly_price(&baseline.flavor_name),
    }
}

/// Size and price of a profile at a level
pub fn resolve_profile_at_level<C: FlavorLookup + ?Sized>(
    profile: &ScalingProfile,
    load_level: u8,
    catalog: &C,
) -> ResolvedCell {
    let size = profile_size_at(profile, load_level);
    ResolvedCell {
        profile_id: profile.id.clone(),
        load_level: load_level.min(MAX_LOAD_LEVEL),
        instances: size.instances,
        flavor_name: size.flavor_name.to_string(),
        hourly_price: catalog.hourly_price(size.flavor_name),
    }
}

/// Resolve one hour of a runtime's weekly schedule
pub fn resolve_cell<C: FlavorLookup + ?Sized>(
    runtime: &RuntimeConfig,
    day: DayOfWeek,
    hour: usize,
    catalog: &C,
) -> ResolvedCell {
    if !runtime.scaling_enabled {
        return baseline_cell(runtime, catalog);
    }
    let Some(config) = runtime.hourly_config(day, hour) else {
        return baseline_cell(runtime, catalog);
    };
    if config.load_level == 0 {
        return baseline_cell(runtime, catalog);
    }
    let Some(profile_id) = config.profile_id.as_deref() else {
        return baseline_cell(runtime, catalog);
    };
    if profile_id == BASELINE_PROFILE_ID {
        return baseline_cell(runtime, catalog);
    }

    match runtime.profile(profile_id) {
        Some(profile) if profile.enabled => resolve_profile_at_level(profile, config.load_level, catalog),
        Some(_) => {
            debug!(
                runtime_id = %runtime.id,
                profile_id = %profile_id,
                day = day.as_str(),
                hour = hour,
                "Profile disabled, hour stays on baseline"
            );
            baseline_cell(runtime, catalog)
        }
        None => {
            debug!(
                runtime_id = %runtime.id,
                profile_id = %profile_id,
                day = day.as_str(),
                hour = hour,
                "Unknown profile, hour stays on baseline"
            );
            baseline_cell(runtime, catalog)
        }
    }
}
