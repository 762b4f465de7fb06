//! Schedule preset listing

use anyhow::Result;
use cost_engine::scaling::SchedulePreset;
use serde::Serialize;
use tabled::Tabled;

use super::Session;
use crate::output::{print_json, render_table, OutputFormat};

#[derive(Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct PresetRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Name")]
    label: &'static str,
    #[tabled(rename = "Hours/week")]
    scaling_hours: usize,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// List the built-in schedule presets
pub fn list_presets(session: &Session) -> Result<()> {
    let rows: Vec<PresetRow> = SchedulePreset::ALL
        .iter()
        .map(|preset| PresetRow {
            id: preset.id(),
            label: preset.label(),
            scaling_hours: preset.generate("preset", 1).scaling_hours(),
            description: preset.description(),
        })
        .collect();

    match session.format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Table => println!("{}", render_table(rows)),
    }

    Ok(())
}
