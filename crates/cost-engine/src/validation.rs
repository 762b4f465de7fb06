//! Configuration checks
//!
//! The calculators tolerate malformed input and degrade silently. These
//! checks report what they tolerate so that bad data shows up while testing.
//! Nothing here modifies its input.

use crate::catalog::{FlavorLookup, InstanceCatalog};
use crate::models::{Project, RuntimeConfig};
use crate::pricing::{UsageMetric, UsagePricingLookup};
use crate::scaling::{DayOfWeek, BASELINE_PROFILE_ID, MAX_LOAD_LEVEL};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigIssue {
    #[error("runtime `{runtime_id}`: profile `{profile_id}` has minInstances {min} > maxInstances {max}")]
    InstanceRangeInverted {
        runtime_id: String,
        profile_id: String,
        min: u32,
        max: u32,
    },

    #[error("runtime `{runtime_id}` has no baseline profile")]
    MissingBaseline { runtime_id: String },

    #[error("runtime `{runtime_id}`: baseline profile is not fixed to baselineConfig")]
    BaselineNotFixed { runtime_id: String },

    #[error("runtime `{runtime_id}`: scaling is enabled but the weekly schedule is missing")]
    ScheduleMissing { runtime_id: String },

    #[error("runtime `{runtime_id}`: scaling is disabled but a weekly schedule is present")]
    UnexpectedSchedule { runtime_id: String },

    #[error("runtime `{runtime_id}`: load level {level} at {} {hour}h is above 5", .day.as_str())]
    LoadLevelOutOfRange {
        runtime_id: String,
        day: DayOfWeek,
        hour: usize,
        level: u8,
    },

    #[error("runtime `{runtime_id}`: {} {hour}h references unknown profile `{profile_id}`", .day.as_str())]
    DanglingProfile {
        runtime_id: String,
        day: DayOfWeek,
        hour: usize,
        profile_id: String,
    },

    #[error("runtime `{runtime_id}`: flavor `{flavor_name}` is not in the catalog")]
    UnknownFlavor {
        runtime_id: String,
        flavor_name: String,
    },

    #[error("runtime `{runtime_id}`: flavor `{flavor_name}` is not available")]
    UnavailableFlavor {
        runtime_id: String,
        flavor_name: String,
    },

    #[error("metric `{metric_id}`: tier {index} starts at {found}, expected {expected}")]
    TierGap {
        metric_id: String,
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error("metric `{metric_id}`: tier {index} starts at {found}, overlapping the previous tier ending at {previous_end}")]
    TierOverlap {
        metric_id: String,
        index: usize,
        previous_end: f64,
        found: f64,
    },

    #[error("metric `{metric_id}`: open-ended tier {index} is not the last tier")]
    OpenTierNotLast { metric_id: String, index: usize },
}

/// Structural checks of one runtime
pub fn validate_runtime(runtime: &RuntimeConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let runtime_id = || runtime.id.clone();

    for profile in &runtime.scaling_profiles {
        if profile.min_instances > profile.max_instances {
            issues.push(ConfigIssue::InstanceRangeInverted {
                runtime_id: runtime_id(),
                profile_id: profile.id.clone(),
                min: profile.min_instances,
                max: profile.max_instances,
            });
        }
    }

    match runtime.profile(BASELINE_PROFILE_ID) {
        None => issues.push(ConfigIssue::MissingBaseline {
            runtime_id: runtime_id(),
        }),
        Some(baseline) => {
            let config = &runtime.baseline_config;
            let fixed = baseline.min_instances == config.instances
                && baseline.max_instances == config.instances
                && baseline.min_flavor_name == config.flavor_name
                && baseline.max_flavor_name == config.flavor_name;
            if !fixed {
                issues.push(ConfigIssue::BaselineNotFixed {
                    runtime_id: runtime_id(),
                });
            }
        }
    }

    match (runtime.scaling_enabled, runtime.weekly_schedule.is_some()) {
        (true, false) => issues.push(ConfigIssue::ScheduleMissing {
            runtime_id: runtime_id(),
        }),
        (false, true) => issues.push(ConfigIssue::UnexpectedSchedule {
            runtime_id: runtime_id(),
        }),
        _ => {}
    }

    if let Some(schedule) = &runtime.weekly_schedule {
        for (day, hour, cell) in schedule.cells() {
            if cell.load_level > MAX_LOAD_LEVEL {
                issues.push(ConfigIssue::LoadLevelOutOfRange {
                    runtime_id: runtime_id(),
                    day,
                    hour,
                    level: cell.load_level,
                });
            }
            if cell.is_baseline() {
                continue;
            }
            if let Some(profile_id) = cell.profile_id.as_deref() {
                if runtime.profile(profile_id).is_none() {
                    issues.push(ConfigIssue::DanglingProfile {
                        runtime_id: runtime_id(),
                        day,
                        hour,
                        profile_id: profile_id.to_string(),
                    });
                }
            }
        }
    }

    issues
}

/// Check that every flavor a runtime can select exists and is available
pub fn validate_runtime_flavors<C: FlavorLookup + ?Sized>(
    runtime: &RuntimeConfig,
    flavors: &C,
) -> Vec<ConfigIssue> {
    let mut names: Vec<&str> = vec![runtime.baseline_config.flavor_name.as_str()];
    for profile in &runtime.scaling_profiles {
        names.push(&profile.min_flavor_name);
        names.push(&profile.max_flavor_name);
    }
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .filter_map(|name| match flavors.flavor(name) {
            None => Some(ConfigIssue::UnknownFlavor {
                runtime_id: runtime.id.clone(),
                flavor_name: name.to_string(),
            }),
            Some(flavor) if !flavor.available => Some(ConfigIssue::UnavailableFlavor {
                runtime_id: runtime.id.clone(),
                flavor_name: name.to_string(),
            }),
            Some(_) => None,
        })
        .collect()
}

/// Check that a metric's tiers are contiguous from 0 with the open tier last
pub fn validate_metric(metric: &UsageMetric) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut previous_end = Some(0.0);

    for (index, tier) in metric.tiers.iter().enumerate() {
        match previous_end {
            Some(end) if tier.min_threshold > end => issues.push(ConfigIssue::TierGap {
                metric_id: metric.id.clone(),
                index,
                expected: end,
                found: tier.min_threshold,
            }),
            Some(end) if tier.min_threshold < end => issues.push(ConfigIssue::TierOverlap {
                metric_id: metric.id.clone(),
                index,
                previous_end: end,
                found: tier.min_threshold,
            }),
            _ => {}
        }
        if tier.max_threshold.is_none() && index + 1 < metric.tiers.len() {
            issues.push(ConfigIssue::OpenTierNotLast {
                metric_id: metric.id.clone(),
                index,
            });
        }
        previous_end = tier.max_threshold;
    }

    issues
}

/// Every check applicable to a project
///
/// Flavor checks run only when a catalog is given. Metric checks cover the
/// pricing records of the project's usage-billed add-ons.
pub fn validate_project<R: UsagePricingLookup + ?Sized>(
    project: &Project,
    catalog: Option<&InstanceCatalog>,
    registry: &R,
) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for runtime in &project.runtimes {
        issues.extend(validate_runtime(runtime));
        if let Some(catalog) = catalog {
            issues.extend(validate_runtime_flavors(
                runtime,
                catalog.flavors_for(&runtime.instance_type),
            ));
        }
    }

    let mut providers: Vec<&str> = project.addons.iter().map(|a| a.provider_id.as_str()).collect();
    providers.sort_unstable();
    providers.dedup();
    for provider in providers {
        if let Some(pricing) = registry.usage_pricing(provider) {
            for metric in &pricing.metrics {
                issues.extend(validate_metric(metric));
            }
        }
    }

    issues
}
