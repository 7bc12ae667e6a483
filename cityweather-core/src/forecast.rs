use chrono::{DateTime, NaiveDateTime, Timelike};

use crate::model::{HourlyPoint, HourlySeries};

/// Number of upcoming hours kept for display.
pub const HOURLY_POINTS: usize = 4;

const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Shape the optional hourly block of a forecast response.
pub fn shape_series(hourly: Option<&HourlySeries>) -> Vec<HourlyPoint> {
    match hourly {
        Some(series) => shape_hourly(&series.time, &series.temperature, &series.weather_code),
        None => Vec::new(),
    }
}

/// Turn index-aligned hourly arrays into at most [`HOURLY_POINTS`] display points,
/// taken from the start of the arrays.
///
/// Temperatures are rounded half away from zero (`f64::round`). If the arrays
/// disagree in length only the common prefix is used.
pub fn shape_hourly<S: AsRef<str>>(times: &[S], temps: &[f64], codes: &[i32]) -> Vec<HourlyPoint> {
    times
        .iter()
        .zip(temps)
        .zip(codes)
        .take(HOURLY_POINTS)
        .map(|((time, temp), code)| HourlyPoint {
            time: time_label(time.as_ref()),
            temperature: round_temp(*temp),
            weather_code: *code,
        })
        .collect()
}

pub fn round_temp(celsius: f64) -> i32 {
    celsius.round() as i32
}

/// Format an ISO-8601 timestamp as a 12-hour clock label, e.g. `02:00 PM`.
/// Unparseable input is returned as-is.
pub fn time_label(timestamp: &str) -> String {
    match parse_local(timestamp) {
        Some(dt) => twelve_hour(dt.hour(), dt.minute()),
        None => {
            tracing::warn!(timestamp, "unparseable hourly timestamp");
            timestamp.to_string()
        }
    }
}

fn parse_local(timestamp: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(timestamp).ok().map(|dt| dt.naive_local()))
}

fn twelve_hour(hour: u32, minute: u32) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let display = match hour {
        0 => 12,
        13.. => hour - 12,
        _ => hour,
    };

    format!("{display:02}:{minute:02} {period}")
}
