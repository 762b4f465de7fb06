//! Scaling profiles
//!
//! A profile is a named min/max range of instance count and flavor that a
//! schedule hour can select. Every runtime carries one reserved profile, the
//! baseline, describing its fixed 24/7 configuration.

use serde::{Deserialize, Serialize};

/// Reserved id of the baseline profile
pub const BASELINE_PROFILE_ID: &str = "baseline";

/// Id given to the profile created when a runtime first enables scaling
pub const DEFAULT_PROFILE_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Horizontal range
    pub min_instances: u32,
    pub max_instances: u32,
    /// Vertical range
    pub min_flavor_name: String,
    pub max_flavor_name: String,
    /// Disabled profiles are never selected, hours using them stay on baseline
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ScalingProfile {
    /// Baseline profile pinned to one instance count and one flavor
    pub fn baseline(instances: u32, flavor_name: impl Into<String>) -> Self {
        let flavor_name = flavor_name.into();
        Self {
            id: BASELINE_PROFILE_ID.to_string(),
            name: "Baseline".to_string(),
            min_instances: instances,
            max_instances: instances,
            min_flavor_name: flavor_name.clone(),
            max_flavor_name: flavor_name,
            enabled: true,
        }
    }

    /// Standard scaling profile created for a runtime enabling scaling
    pub fn standard(flavor_name: impl Into<String>, min_instances: u32, max_instances: u32) -> Self {
        let flavor_name = flavor_name.into();
        Self {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "Standard".to_string(),
            min_instances,
            max_instances,
            min_flavor_name: flavor_name.clone(),
            max_flavor_name: flavor_name,
            enabled: true,
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.id == BASELINE_PROFILE_ID
    }

    /// Whether this profile can change the runtime's size for an hour
    pub fn is_active_scaling(&self) -> bool {
        self.enabled && !self.is_baseline()
    }
}
