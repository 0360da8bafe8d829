//! Day-of-year conversions.

use chrono::SecondsFormat;
use gnss_core::doy::{self, DayOfYearTimestamp};
use log::{info, warn};

/// Calendar timestamp to `year doy h m s`.
pub fn run_doy(timestamp: &str) -> anyhow::Result<String> {
    let output = doy::day_from_date_str(timestamp);
    if output.trim().is_empty() {
        anyhow::bail!("Unrecognized timestamp '{}'", timestamp);
    }
    Ok(output)
}

/// Day-of-year to RFC 3339.
pub fn run_date(
    year: i32,
    day_of_year: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> anyhow::Result<String> {
    let timestamp = DayOfYearTimestamp::new(year, day_of_year).with_time(hour, minute, second);
    if !timestamp.is_valid() {
        warn!(
            "Day {} is outside {} ({} days); result rolls over",
            day_of_year,
            year,
            doy::days_in_year(year)
        );
    }
    let date = timestamp.to_datetime()?;
    Ok(date.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Legacy scaled conversion, kept for comparing with older displays.
pub fn run_doy_scaled(year: i32, day_of_year: u32) -> anyhow::Result<String> {
    info!("Scaled conversion does not land on whole days");
    let date = doy::doy_to_date(year, day_of_year)?;
    Ok(date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
