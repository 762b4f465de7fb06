//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use cost_engine::calculator::BudgetLevel;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render rows as a rounded table
pub fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a section heading
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(50));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Format currency
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        _ => format!("{:.2} {}", amount, currency),
    }
}

/// Format a min/max range, or the single amount when both ends match
pub fn format_range(min: f64, max: f64, currency: &str) -> String {
    if min == max {
        format_currency(min, currency)
    } else {
        format!(
            "{} - {}",
            format_currency(min, currency),
            format_currency(max, currency)
        )
    }
}

/// Format a percentage with one decimal
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Color a budget level
pub fn color_budget_level(level: BudgetLevel) -> String {
    let label = level.as_str();
    match level {
        BudgetLevel::WithinBudget => label.green().to_string(),
        BudgetLevel::NearLimit => label.yellow().to_string(),
        BudgetLevel::OverBudget => label.red().bold().to_string(),
    }
}

/// Color a load level 0-5
pub fn color_load_level(level: f64) -> String {
    let formatted = format!("{:.1}", level);
    if level >= 4.0 {
        formatted.red().to_string()
    } else if level >= 2.0 {
        formatted.yellow().to_string()
    } else {
        formatted.green().to_string()
    }
}
