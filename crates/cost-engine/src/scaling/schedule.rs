//! Weekly load schedule
//!
//! A 7 x 24 grid where each hour names a scaling profile and a load level.
//! Level 0 always means baseline, whatever profile the hour references.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Highest load level an hour can request
pub const MAX_LOAD_LEVEL: u8 = 5;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    pub const WEEKDAYS: [DayOfWeek; 5] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "mon",
            DayOfWeek::Tue => "tue",
            DayOfWeek::Wed => "wed",
            DayOfWeek::Thu => "thu",
            DayOfWeek::Fri => "fri",
            DayOfWeek::Sat => "sat",
            DayOfWeek::Sun => "sun",
        }
    }
}

/// Scaling choice for one hour of the week
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyConfig {
    /// Referenced profile, `None` for baseline
    #[serde(default)]
    pub profile_id: Option<String>,
    /// 0 (baseline) to 5 (profile maximum)
    #[serde(default)]
    pub load_level: u8,
}

impl HourlyConfig {
    pub fn new(profile_id: impl Into<String>, load_level: u8) -> Self {
        Self {
            profile_id: Some(profile_id.into()),
            load_level,
        }
    }

    pub fn is_baseline(&self) -> bool {
        self.load_level == 0 || self.profile_id.is_none()
    }
}

/// 168-hour weekly grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub mon: [HourlyConfig; HOURS_PER_DAY],
    pub tue: [HourlyConfig; HOURS_PER_DAY],
    pub wed: [HourlyConfig; HOURS_PER_DAY],
    pub thu: [HourlyConfig; HOURS_PER_DAY],
    pub fri: [HourlyConfig; HOURS_PER_DAY],
    pub sat: [HourlyConfig; HOURS_PER_DAY],
    pub sun: [HourlyConfig; HOURS_PER_DAY],
}

impl WeeklySchedule {
    /// Schedule with every hour on baseline
    pub fn empty() -> Self {
        Self::default()
    }

    /// Schedule with every hour set to the same profile and level
    pub fn uniform(profile_id: &str, load_level: u8) -> Self {
        let mut schedule = Self::empty();
        for day in DayOfWeek::ALL {
            for hour in 0..HOURS_PER_DAY {
                schedule.set(day, hour, HourlyConfig::new(profile_id, load_level));
            }
        }
        schedule
    }

    pub fn day(&self, day: DayOfWeek) -> &[HourlyConfig; HOURS_PER_DAY] {
        match day {
            DayOfWeek::Mon => &self.mon,
            DayOfWeek::Tue => &self.tue,
            DayOfWeek::Wed => &self.wed,
            DayOfWeek::Thu => &self.thu,
            DayOfWeek::Fri => &self.fri,
            DayOfWeek::Sat => &self.sat,
            DayOfWeek::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut [HourlyConfig; HOURS_PER_DAY] {
        match day {
            DayOfWeek::Mon => &mut self.mon,
            DayOfWeek::Tue => &mut self.tue,
            DayOfWeek::Wed => &mut self.wed,
            DayOfWeek::Thu => &mut self.thu,
            DayOfWeek::Fri => &mut self.fri,
            DayOfWeek::Sat => &mut self.sat,
            DayOfWeek::Sun => &mut self.sun,
        }
    }

    /// Configuration of one hour; `hour` must be below 24
    pub fn cell(&self, day: DayOfWeek, hour: usize) -> &HourlyConfig {
        &self.day(day)[hour]
    }

    pub fn set(&mut self, day: DayOfWeek, hour: usize, config: HourlyConfig) {
        self.day_mut(day)[hour] = config;
    }

    /// Every hour of the week, Monday 00h first
    pub fn cells(&self) -> impl Iterator<Item = (DayOfWeek, usize, &HourlyConfig)> + '_ {
        DayOfWeek::ALL.into_iter().flat_map(move |day| {
            self.day(day)
                .iter()
                .enumerate()
                .map(move |(hour, config)| (day, hour, config))
        })
    }

    /// Number of hours requesting a load level above baseline
    pub fn scaling_hours(&self) -> usize {
        self.cells().filter(|(_, _, c)| !c.is_baseline()).count()
    }
}

/// Ready-made schedules for common traffic shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePreset {
    /// Mon-Fri, 9h-18h
    BusinessHours,
    /// Mon-Fri, 8h-20h
    ExtendedBusiness,
    /// Mon-Fri, 10h-12h and 14h-17h
    PeakHours,
    /// Every day, 6h-22h
    NightReduction,
    /// Mon-Fri all day, weekend on baseline
    WeekendLow,
    /// 24/7
    AlwaysMax,
}

impl SchedulePreset {
    pub const ALL: [SchedulePreset; 6] = [
        SchedulePreset::BusinessHours,
        SchedulePreset::ExtendedBusiness,
        SchedulePreset::PeakHours,
        SchedulePreset::NightReduction,
        SchedulePreset::WeekendLow,
        SchedulePreset::AlwaysMax,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SchedulePreset::BusinessHours => "business-hours",
            SchedulePreset::ExtendedBusiness => "extended-business",
            SchedulePreset::PeakHours => "peak-hours",
            SchedulePreset::NightReduction => "night-reduction",
            SchedulePreset::WeekendLow => "weekend-low",
            SchedulePreset::AlwaysMax => "always-max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchedulePreset::BusinessHours => "Business hours",
            SchedulePreset::ExtendedBusiness => "Extended hours",
            SchedulePreset::PeakHours => "Traffic peaks",
            SchedulePreset::NightReduction => "Night reduction",
            SchedulePreset::WeekendLow => "Quiet weekend",
            SchedulePreset::AlwaysMax => "Always maximum",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SchedulePreset::BusinessHours => "Mon-Fri, 9h-18h",
            SchedulePreset::ExtendedBusiness => "Mon-Fri, 8h-20h",
            SchedulePreset::PeakHours => "Mon-Fri, 10h-12h and 14h-17h",
            SchedulePreset::NightReduction => "Boost 6h-22h every day",
            SchedulePreset::WeekendLow => "Mon-Fri boosted, weekend on baseline",
            SchedulePreset::AlwaysMax => "24/7 at the requested level",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Days and hour ranges boosted by this preset
    fn windows(&self) -> (&'static [DayOfWeek], &'static [Range<usize>]) {
        const WEEKDAYS: &[DayOfWeek] = &DayOfWeek::WEEKDAYS;
        const EVERY_DAY: &[DayOfWeek] = &DayOfWeek::ALL;
        const OFFICE: &[Range<usize>] = &[9..18];
        const EXTENDED_OFFICE: &[Range<usize>] = &[8..20];
        const PEAKS: &[Range<usize>] = &[10..12, 14..17];
        const DAYTIME: &[Range<usize>] = &[6..22];
        const ALL_DAY: &[Range<usize>] = &[0..24];

        match self {
            SchedulePreset::BusinessHours => (WEEKDAYS, OFFICE),
            SchedulePreset::ExtendedBusiness => (WEEKDAYS, EXTENDED_OFFICE),
            SchedulePreset::PeakHours => (WEEKDAYS, PEAKS),
            SchedulePreset::NightReduction => (EVERY_DAY, DAYTIME),
            SchedulePreset::WeekendLow => (WEEKDAYS, ALL_DAY),
            SchedulePreset::AlwaysMax => (EVERY_DAY, ALL_DAY),
        }
    }

    /// Build a schedule running `profile_id` at `load_level` inside the
    /// preset's windows, baseline elsewhere
    pub fn generate(&self, profile_id: &str, load_level: u8) -> WeeklySchedule {
        let mut schedule = WeeklySchedule::empty();
        let (days, ranges) = self.windows();
        for &day in days {
            for range in ranges {
                for hour in range.clone() {
                    schedule.set(day, hour, HourlyConfig::new(profile_id, load_level));
                }
            }
        }
        schedule
    }
}
