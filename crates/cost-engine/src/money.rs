//! Time constants and currency rounding shared by every calculator
//!
//! All partial sums and totals go through [`round_cents`] so that a project
//! total never drifts from the sum of its displayed parts.

/// Average number of hours in a month (~24h x 30.4 days)
///
/// Used for fixed-price runtimes that run 24/7.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Average number of weeks in a month
///
/// Each of the 168 weekly schedule hours recurs this many times per month.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Number of hours in the weekly scheduling grid
pub const HOURS_PER_WEEK: usize = 7 * 24;

/// Round an amount to currency-cent precision (half-up on the cent boundary)
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Round a ratio to one decimal place, used for averaged load levels
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
