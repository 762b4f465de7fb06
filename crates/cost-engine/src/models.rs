//! Core data models for the cost engine
//!
//! Inputs are immutable snapshots of the user's topology. Outputs are
//! recomputed on demand for display and never persisted.

use crate::scaling::{DayOfWeek, HourlyConfig, ScalingProfile, WeeklySchedule, BASELINE_PROFILE_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed instance count and flavor a runtime runs 24/7
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineConfig {
    pub instances: u32,
    pub flavor_name: String,
}

/// A compute runtime of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub id: String,
    /// Runtime kind, e.g. "node"
    pub instance_type: String,
    /// Display name, e.g. "Node.js"
    #[serde(default)]
    pub instance_name: String,
    #[serde(default)]
    pub scaling_enabled: bool,
    pub baseline_config: BaselineConfig,
    /// Always contains the baseline profile
    #[serde(default)]
    pub scaling_profiles: Vec<ScalingProfile>,
    /// Present only when scaling is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_schedule: Option<WeeklySchedule>,
}

impl RuntimeConfig {
    /// Fixed-price runtime with a single baseline profile
    pub fn fixed(
        id: impl Into<String>,
        instance_type: impl Into<String>,
        flavor_name: impl Into<String>,
        instances: u32,
    ) -> Self {
        let flavor_name = flavor_name.into();
        Self {
            id: id.into(),
            instance_type: instance_type.into(),
            instance_name: String::new(),
            scaling_enabled: false,
            baseline_config: BaselineConfig {
                instances,
                flavor_name: flavor_name.clone(),
            },
            scaling_profiles: vec![ScalingProfile::baseline(instances, flavor_name)],
            weekly_schedule: None,
        }
    }

    /// Enable scaling with the given extra profiles and schedule
    pub fn with_scaling(mut self, profiles: Vec<ScalingProfile>, schedule: WeeklySchedule) -> Self {
        self.scaling_profiles.retain(|p| p.is_baseline());
        self.scaling_profiles.extend(profiles);
        self.scaling_enabled = true;
        self.weekly_schedule = Some(schedule);
        self
    }

    /// Find a profile by id, enabled or not
    pub fn profile(&self, id: &str) -> Option<&ScalingProfile> {
        self.scaling_profiles.iter().find(|p| p.id == id)
    }

    /// Enabled profiles other than the baseline
    pub fn active_scaling_profiles(&self) -> impl Iterator<Item = &ScalingProfile> {
        self.scaling_profiles.iter().filter(|p| p.is_active_scaling())
    }

    /// Whether any hour of the schedule can leave the baseline
    ///
    /// False when scaling is off, the schedule is missing, or no profile
    /// besides the baseline is enabled.
    pub fn has_active_scaling(&self) -> bool {
        self.scaling_enabled
            && self.weekly_schedule.is_some()
            && self.active_scaling_profiles().next().is_some()
    }

    /// Configuration of one schedule hour, if a schedule exists
    pub fn hourly_config(&self, day: DayOfWeek, hour: usize) -> Option<&HourlyConfig> {
        self.weekly_schedule.as_ref().map(|s| s.cell(day, hour))
    }

    pub fn has_baseline_profile(&self) -> bool {
        self.profile(BASELINE_PROFILE_ID).is_some()
    }
}

/// User estimate for one metered metric of an add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEstimate {
    pub metric_id: String,
    pub value: f64,
}

/// An add-on service of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonConfig {
    pub id: String,
    /// Provider id, e.g. "postgresql-addon"
    pub provider_id: String,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub plan_name: String,
    /// Flat plan price per month
    pub monthly_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_estimates: Option<Vec<UsageEstimate>>,
}

impl AddonConfig {
    /// The user's estimate for a metric, if one was entered
    pub fn estimate_for(&self, metric_id: &str) -> Option<f64> {
        self.usage_estimates
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|e| e.metric_id == metric_id)
            .map(|e| e.value)
    }
}

/// A deployment topology: runtimes plus add-ons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub organization_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub runtimes: Vec<RuntimeConfig>,
    #[serde(default)]
    pub addons: Vec<AddonConfig>,
}

/// A group of projects sharing a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    /// Monthly budget target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Cost of one metered metric of an add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetricCostDetail {
    pub metric_id: String,
    pub metric_name: String,
    pub value: f64,
    pub unit: String,
    pub cost: f64,
    /// Part of `value` covered by the free quota
    pub free_quota_applied: f64,
}

/// Monthly cost of an add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonCostDetail {
    pub addon_id: String,
    pub provider_id: String,
    pub provider_name: String,
    pub plan_name: String,
    /// Flat price plus usage cost
    pub monthly_price: f64,
    pub is_usage_based: bool,
    /// True when the price depends on usage estimates
    pub is_estimate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usage_details: Vec<UsageMetricCostDetail>,
}

/// Monthly cost of a runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCostDetail {
    pub runtime_id: String,
    pub runtime_name: String,
    pub instance_type: String,
    pub base_flavor_name: String,
    pub base_instances: u32,
    /// Price of one baseline instance per hour
    pub base_hourly_price: f64,
    /// Cost of running the baseline for the whole month
    pub base_monthly_cost: f64,
    /// Part of the total above the baseline
    pub estimated_scaling_cost: f64,
    pub total_monthly_cost: f64,
    /// Every hour on baseline
    pub min_monthly_cost: f64,
    /// Every hour on the richest enabled profile at its maximum
    pub max_monthly_cost: f64,
    /// Weekly hours running above baseline
    pub scaling_hours: u32,
    /// Mean load level over the scaling hours, one decimal
    pub average_load_level: f64,
    /// Weekly scaling hours per profile id
    pub scaling_hours_by_profile: BTreeMap<String, u32>,
    /// Monthly cost per profile id, baseline hours included
    pub cost_by_profile: BTreeMap<String, f64>,
}

impl RuntimeCostDetail {
    /// Whether the cost varies with the schedule
    pub fn has_range(&self) -> bool {
        self.min_monthly_cost != self.max_monthly_cost
    }
}

/// Project-level cost roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCostSummary {
    pub project_id: String,
    pub project_name: String,
    pub runtimes_cost: f64,
    pub runtimes_detail: Vec<RuntimeCostDetail>,
    pub addons_cost: f64,
    pub addons_detail: Vec<AddonCostDetail>,
    pub total_monthly_cost: f64,
    /// Runtimes at their minimum plus add-ons
    pub min_monthly_cost: f64,
    /// Runtimes at their maximum plus add-ons
    pub max_monthly_cost: f64,
}
