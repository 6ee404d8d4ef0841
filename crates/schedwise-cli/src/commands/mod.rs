pub mod assign;
pub mod config;
pub mod insert;
pub mod profile;
pub mod stats;
pub mod task;
pub mod triage;

use chrono::{Local, NaiveDate};
use serde::Serialize;

/// `--date`, or today in local time.
pub fn target_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
