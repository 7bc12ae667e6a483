//! WMO weather interpretation codes.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::Serialize;

use crate::model::ConditionInfo;

pub const UNKNOWN_CONDITION: ConditionInfo = ConditionInfo {
    condition: "Unknown",
    description: "Unknown conditions",
};

const fn info(condition: &'static str, description: &'static str) -> ConditionInfo {
    ConditionInfo { condition, description }
}

/// Map a weather code to its condition/description pair.
/// Codes outside the table resolve to [`UNKNOWN_CONDITION`].
pub fn classify(code: i32) -> ConditionInfo {
    match code {
        0 => info("Clear", "Clear sky"),
        1 => info("Mainly Clear", "Mainly clear"),
        2 => info("Partly Cloudy", "Partly cloudy"),
        3 => info("Overcast", "Overcast"),
        45 => info("Foggy", "Fog"),
        48 => info("Foggy", "Depositing rime fog"),
        51 => info("Drizzle", "Light drizzle"),
        53 => info("Drizzle", "Moderate drizzle"),
        55 => info("Drizzle", "Dense drizzle"),
        61 => info("Rain", "Slight rain"),
        63 => info("Rain", "Moderate rain"),
        65 => info("Rain", "Heavy rain"),
        71 => info("Snow", "Slight snow fall"),
        73 => info("Snow", "Moderate snow fall"),
        75 => info("Snow", "Heavy snow fall"),
        77 => info("Snow", "Snow grains"),
        80 => info("Rain Showers", "Slight rain showers"),
        81 => info("Rain Showers", "Moderate rain showers"),
        82 => info("Rain Showers", "Violent rain showers"),
        85 => info("Snow Showers", "Slight snow showers"),
        86 => info("Snow Showers", "Heavy snow showers"),
        95 => info("Thunderstorm", "Thunderstorm"),
        96 => info("Thunderstorm", "Thunderstorm with slight hail"),
        99 => info("Thunderstorm", "Thunderstorm with heavy hail"),
        _ => UNKNOWN_CONDITION,
    }
}

/// Coarse sky family of a code, used for compact per-hour glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyKind {
    Sunny,
    PartlySunny,
    Cloud,
    Rainy,
    Snow,
    Thunderstorm,
}

impl SkyKind {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 | 1 => Self::Sunny,
            2 | 3 => Self::PartlySunny,
            45..=48 => Self::Cloud,
            51..=67 => Self::Rainy,
            71..=86 => Self::Snow,
            95.. => Self::Thunderstorm,
            _ => Self::Sunny,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlySunny => "partly-sunny",
            Self::Cloud => "cloud",
            Self::Rainy => "rainy",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }
}

impl std::fmt::Display for SkyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
