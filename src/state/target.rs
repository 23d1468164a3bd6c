//! Countdown configuration and target resolution

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::LaunchParams;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_TITLE: &str = "Countdown Timer";
pub const DEFAULT_THEME: &str = "default";

/// ISO date-time forms without an offset, interpreted in local time
const LOCAL_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];

/// Resolved countdown configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub target: DateTime<Utc>,
    /// Display label only, never used for conversion
    pub timezone: String,
    pub title: String,
    pub theme: String,
}

impl Configuration {
    /// Resolve launch parameters into a configuration.
    ///
    /// Never fails: a missing or unparseable date falls back to the next
    /// January 1st at local midnight, relative to `now`.
    pub fn resolve(params: &LaunchParams, now: DateTime<Local>) -> Self {
        let target = match params.date.as_deref() {
            Some(date) => match parse_target(date, params.time.as_deref()) {
                Ok(target) => target,
                Err(e) => {
                    error!("Invalid date provided, using default: {}", e);
                    next_new_year(now)
                }
            },
            None => next_new_year(now),
        };

        let config = Self {
            target,
            timezone: params
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            title: params
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            theme: params
                .theme
                .clone()
                .unwrap_or_else(|| DEFAULT_THEME.to_string()),
        };

        info!(
            "Countdown configured: target={}, timezone={}, title={:?}, theme={}",
            config.target.to_rfc3339(),
            config.timezone,
            config.title,
            config.theme
        );

        config
    }

    /// Whether the theme has to be handed to the styling sink
    pub fn has_custom_theme(&self) -> bool {
        !self.theme.is_empty() && self.theme != DEFAULT_THEME
    }
}

/// Parse a date string, optionally joined with a time string, into an instant
pub fn parse_target(date: &str, time: Option<&str>) -> Result<DateTime<Utc>, String> {
    let date = date.trim();
    match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(time) => parse_date_time(&format!("{} {}", date, time)),
        None => parse_date(date),
    }
}

fn parse_date(input: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    // A bare ISO date is a UTC midnight, unlike every other form
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight))
            .ok_or_else(|| format!("'{}' has no midnight", input));
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(naive, input);
        }
    }

    for format in &DATE_FORMATS[1..] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return local_to_utc(midnight, input);
            }
        }
    }

    Err(format!("'{}' is not a recognised date", input))
}

fn parse_date_time(input: &str) -> Result<DateTime<Utc>, String> {
    for date_format in DATE_FORMATS {
        for time_format in TIME_FORMATS {
            let format = format!("{} {}", date_format, time_format);
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, &format) {
                return local_to_utc(naive, input);
            }
        }
    }

    Err(format!("'{}' is not a recognised date and time", input))
}

fn local_to_utc(naive: NaiveDateTime, input: &str) -> Result<DateTime<Utc>, String> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("'{}' does not exist in local time", input))
}

/// January 1st, 00:00:00 local time, of the year after `now`
pub fn next_new_year(now: DateTime<Local>) -> DateTime<Utc> {
    let Some(midnight) = NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    else {
        return now.with_timezone(&Utc);
    };

    match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&midnight),
    }
}
