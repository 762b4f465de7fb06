//! Upgrade of stored runtime documents to the current shape
//!
//! Runtimes have been stored in three shapes over time:
//!
//! - legacy: `defaultFlavorName`, `scalingFlavorName`, `defaultMinInstances`,
//!   `defaultMaxInstances` and a schedule of extra instance counts
//! - intermediate: `baseFlavorName`, `baseInstances`, profiles and a level
//!   schedule, but no `scalingEnabled` flag
//! - current: `scalingEnabled`, `baselineConfig`, profiles and an optional
//!   schedule (older current documents may lack `baselineConfig`)
//!
//! Normalization runs once when a document is loaded. The calculators only
//! ever see the current shape.

use crate::error::{EngineError, Result};
use crate::models::{BaselineConfig, Project, RuntimeConfig};
use crate::scaling::{
    DayOfWeek, HourlyConfig, ScalingProfile, WeeklySchedule, BASELINE_PROFILE_ID,
    DEFAULT_PROFILE_ID, HOURS_PER_DAY, MAX_LOAD_LEVEL,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Stored shape of a runtime document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeShape {
    Legacy,
    Intermediate,
    Current,
}

impl RuntimeShape {
    /// Detect the shape of a runtime object
    pub fn detect(fields: &Map<String, Value>) -> Self {
        let is_number = |key: &str| fields.get(key).is_some_and(Value::is_number);
        let has_flag = fields.contains_key("scalingEnabled");

        if is_number("defaultMinInstances")
            && is_number("defaultMaxInstances")
            && !fields.contains_key("baseInstances")
            && !has_flag
        {
            RuntimeShape::Legacy
        } else if fields.get("baseFlavorName").is_some_and(Value::is_string)
            && is_number("baseInstances")
            && !has_flag
        {
            RuntimeShape::Intermediate
        } else {
            RuntimeShape::Current
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeShape::Legacy => "legacy",
            RuntimeShape::Intermediate => "intermediate",
            RuntimeShape::Current => "current",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRuntime {
    id: String,
    instance_type: String,
    #[serde(default)]
    instance_name: String,
    default_flavor_name: String,
    #[serde(default)]
    scaling_flavor_name: Option<String>,
    default_min_instances: u32,
    default_max_instances: u32,
    #[serde(default)]
    weekly_schedule: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntermediateRuntime {
    id: String,
    instance_type: String,
    #[serde(default)]
    instance_name: String,
    base_flavor_name: String,
    base_instances: u32,
    #[serde(default)]
    scaling_profiles: Vec<ScalingProfile>,
    #[serde(default)]
    weekly_schedule: Option<WeeklySchedule>,
}

/// Normalize one stored runtime document into the current shape
pub fn normalize_runtime(raw: Value) -> Result<RuntimeConfig> {
    let Value::Object(fields) = raw else {
        return Err(EngineError::NotAnObject);
    };
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    let shape = RuntimeShape::detect(&fields);
    debug!(runtime_id = %id, shape = shape.as_str(), "Normalizing runtime");

    let unrecognized = |err: serde_json::Error| EngineError::UnrecognizedRuntime {
        id: id.clone(),
        reason: err.to_string(),
    };

    match shape {
        RuntimeShape::Legacy => {
            let legacy: LegacyRuntime =
                serde_json::from_value(Value::Object(fields)).map_err(unrecognized)?;
            Ok(upgrade_legacy(legacy))
        }
        RuntimeShape::Intermediate => {
            let intermediate: IntermediateRuntime =
                serde_json::from_value(Value::Object(fields)).map_err(unrecognized)?;
            Ok(upgrade_intermediate(intermediate))
        }
        RuntimeShape::Current => {
            let fields = with_baseline_config(fields, &id)?;
            serde_json::from_value(Value::Object(fields)).map_err(unrecognized)
        }
    }
}

/// Normalize every runtime of a stored project document
pub fn normalize_project(raw: Value) -> Result<Project> {
    let Value::Object(mut fields) = raw else {
        return Err(EngineError::NotAnObject);
    };
    let Some(Value::Array(runtimes)) = fields.remove("runtimes") else {
        return Err(EngineError::MissingRuntimes);
    };

    let runtimes = runtimes
        .into_iter()
        .map(normalize_runtime)
        .collect::<Result<Vec<_>>>()?;
    fields.insert("runtimes".to_string(), serde_json::to_value(&runtimes)?);

    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Parse and normalize a project JSON document
pub fn parse_project(json: &str) -> Result<Project> {
    normalize_project(serde_json::from_str(json)?)
}

/// Load level for an extra instance count relative to the largest possible
pub fn extra_instances_to_level(extra: u32, max_extra: u32) -> u8 {
    if extra == 0 || max_extra == 0 {
        return 0;
    }
    let ratio = (f64::from(extra) / f64::from(max_extra)).min(1.0);
    let level = (ratio * f64::from(MAX_LOAD_LEVEL)).ceil() as u8;
    level.clamp(1, MAX_LOAD_LEVEL)
}

fn upgrade_legacy(legacy: LegacyRuntime) -> RuntimeConfig {
    let max_extra = legacy
        .default_max_instances
        .saturating_sub(legacy.default_min_instances);
    let has_scaling = max_extra > 0;

    let mut profiles = vec![ScalingProfile::baseline(
        legacy.default_min_instances,
        legacy.default_flavor_name.clone(),
    )];
    if has_scaling {
        profiles.push(ScalingProfile {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "Standard".to_string(),
            min_instances: legacy.default_min_instances,
            max_instances: legacy.default_max_instances,
            min_flavor_name: legacy.default_flavor_name.clone(),
            max_flavor_name: legacy
                .scaling_flavor_name
                .clone()
                .unwrap_or_else(|| legacy.default_flavor_name.clone()),
            enabled: true,
        });
    }

    let weekly_schedule = if has_scaling {
        legacy
            .weekly_schedule
            .as_ref()
            .map(|raw| level_schedule(&legacy.id, raw, max_extra))
    } else {
        None
    };

    RuntimeConfig {
        id: legacy.id,
        instance_type: legacy.instance_type,
        instance_name: legacy.instance_name,
        scaling_enabled: has_scaling,
        baseline_config: BaselineConfig {
            instances: legacy.default_min_instances,
            flavor_name: legacy.default_flavor_name,
        },
        scaling_profiles: profiles,
        weekly_schedule,
    }
}

/// Convert a legacy schedule of extra instance counts to load levels
///
/// Cells that are missing or not numeric count as 0 extra instances and
/// keys that are not day names are skipped.
fn level_schedule(runtime_id: &str, raw: &Value, max_extra: u32) -> WeeklySchedule {
    let mut schedule = WeeklySchedule::empty();
    let Some(days) = raw.as_object() else {
        debug!(runtime_id = %runtime_id, "Legacy schedule is not an object, keeping baseline");
        return schedule;
    };

    for (key, hours) in days {
        let Some(day) = DayOfWeek::ALL.into_iter().find(|d| d.as_str() == key.as_str()) else {
            debug!(runtime_id = %runtime_id, key = %key, "Skipping unknown legacy schedule key");
            continue;
        };
        let Some(hours) = hours.as_array() else {
            debug!(runtime_id = %runtime_id, day = day.as_str(), "Legacy day is not an array, keeping baseline");
            continue;
        };

        for (hour, cell) in hours.iter().take(HOURS_PER_DAY).enumerate() {
            let extra = match cell.as_f64() {
                Some(value) => value.max(0.0).round() as u32,
                None => {
                    if !cell.is_null() {
                        debug!(
                            runtime_id = %runtime_id,
                            day = day.as_str(),
                            hour = hour,
                            "Non-numeric legacy cell treated as 0"
                        );
                    }
                    0
                }
            };
            let level = extra_instances_to_level(extra, max_extra);
            if level > 0 {
                schedule.set(day, hour, HourlyConfig::new(DEFAULT_PROFILE_ID, level));
            }
        }
    }
    schedule
}

fn upgrade_intermediate(intermediate: IntermediateRuntime) -> RuntimeConfig {
    let baseline = ScalingProfile::baseline(
        intermediate.base_instances,
        intermediate.base_flavor_name.clone(),
    );

    let mut profiles = intermediate.scaling_profiles;
    match profiles.iter_mut().find(|p| p.is_baseline()) {
        Some(existing) => {
            existing.min_instances = baseline.min_instances;
            existing.max_instances = baseline.max_instances;
            existing.min_flavor_name = baseline.min_flavor_name;
            existing.max_flavor_name = baseline.max_flavor_name;
            existing.enabled = true;
        }
        None => profiles.insert(0, baseline),
    }

    let scaling_enabled = profiles.iter().any(ScalingProfile::is_active_scaling);

    RuntimeConfig {
        id: intermediate.id,
        instance_type: intermediate.instance_type,
        instance_name: intermediate.instance_name,
        scaling_enabled,
        baseline_config: BaselineConfig {
            instances: intermediate.base_instances,
            flavor_name: intermediate.base_flavor_name,
        },
        scaling_profiles: profiles,
        weekly_schedule: intermediate.weekly_schedule.filter(|_| scaling_enabled),
    }
}

/// Fill a missing `baselineConfig` from the baseline profile
fn with_baseline_config(mut fields: Map<String, Value>, id: &str) -> Result<Map<String, Value>> {
    if fields.contains_key("baselineConfig") {
        return Ok(fields);
    }

    let profiles: Vec<ScalingProfile> = match fields.get("scalingProfiles") {
        Some(raw) => serde_json::from_value(raw.clone()).map_err(|err| {
            EngineError::UnrecognizedRuntime {
                id: id.to_string(),
                reason: err.to_string(),
            }
        })?,
        None => Vec::new(),
    };
    let baseline = profiles
        .iter()
        .find(|p| p.id == BASELINE_PROFILE_ID)
        .ok_or_else(|| EngineError::UnrecognizedRuntime {
            id: id.to_string(),
            reason: "no baselineConfig and no baseline profile".to_string(),
        })?;

    let config = BaselineConfig {
        instances: baseline.min_instances,
        flavor_name: baseline.min_flavor_name.clone(),
    };
    fields.insert("baselineConfig".to_string(), serde_json::to_value(config)?);
    Ok(fields)
}
