use serde::{Deserialize, Serialize};

use crate::classify::SkyKind;

/// A geocoded place, as named by the geocoding service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub region: Option<String>,
}

impl Location {
    /// "Name, Region, Country", see [`crate::resolver::display_name`].
    pub fn display_name(&self) -> String {
        crate::resolver::display_name(&self.name, self.region.as_deref(), Some(&self.country))
    }
}

/// Human-readable interpretation of a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionInfo {
    pub condition: &'static str,
    pub description: &'static str,
}

/// Raw hourly arrays as delivered by the forecast service, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default, rename = "temperature_2m")]
    pub temperature: Vec<f64>,
    #[serde(default)]
    pub weather_code: Vec<i32>,
}

/// Current conditions plus the optional hourly block for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeather {
    pub current_temp: f64,
    pub current_code: i32,
    pub hourly: Option<HourlySeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyPoint {
    /// Formatted as `hh:mm AM` / `hh:mm PM`.
    pub time: String,
    pub temperature: i32,
    pub weather_code: i32,
}

impl HourlyPoint {
    pub fn sky(&self) -> SkyKind {
        SkyKind::from_code(self.weather_code)
    }
}

/// Display model produced by one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub city: String,
    pub temperature: i32,
    pub condition: String,
    pub description: String,
    pub hourly_forecast: Vec<HourlyPoint>,
}

impl WeatherResult {
    /// Leading segment of the display name, e.g. "Springfield" for
    /// "Springfield, Illinois, United States".
    pub fn short_city(&self) -> &str {
        self.city.split(',').next().unwrap_or(&self.city).trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(city: &str) -> WeatherResult {
        WeatherResult {
            city: city.to_string(),
            temperature: 20,
            condition: "Clear".to_string(),
            description: "Clear sky".to_string(),
            hourly_forecast: vec![HourlyPoint {
                time: "01:00 PM".to_string(),
                temperature: 21,
                weather_code: 0,
            }],
        }
    }

    #[test]
    fn short_city_takes_first_segment() {
        assert_eq!(result("Springfield, Illinois, United States").short_city(), "Springfield");
        assert_eq!(result("Atlantis").short_city(), "Atlantis");
    }

    #[test]
    fn result_serializes_camel_case() {
        let json = serde_json::to_value(result("Paris, France")).expect("serialize");

        assert_eq!(json["city"], "Paris, France");
        assert_eq!(json["hourlyForecast"][0]["weatherCode"], 0);
        assert_eq!(json["hourlyForecast"][0]["time"], "01:00 PM");
    }

    #[test]
    fn hourly_series_reads_service_field_names() {
        let raw = r#"{"time":["2024-01-01T00:00"],"temperature_2m":[1.5],"weather_code":[3]}"#;
        let series: HourlySeries = serde_json::from_str(raw).expect("parse");

        assert_eq!(series.time, vec!["2024-01-01T00:00"]);
        assert_eq!(series.temperature, vec![1.5]);
        assert_eq!(series.weather_code, vec![3]);
    }
}
