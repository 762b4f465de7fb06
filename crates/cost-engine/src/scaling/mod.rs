//! Weekly scaling of runtimes
//!
//! This module provides:
//! - Scaling profiles (min/max instance count and flavor)
//! - The 7 x 24 weekly schedule and its named presets
//! - Resolution of a schedule hour to an instance count, flavor and price

mod profile;
mod resolver;
mod schedule;

pub use profile::{ScalingProfile, BASELINE_PROFILE_ID, DEFAULT_PROFILE_ID};
pub use resolver::{
    baseline_cell, profile_size_at, resolve_cell, resolve_profile_at_level, ResolvedCell,
    ScaledSize, MAX_FLAVOR_THRESHOLD,
};
pub use schedule::{
    DayOfWeek, HourlyConfig, SchedulePreset, WeeklySchedule, HOURS_PER_DAY, MAX_LOAD_LEVEL,
};
