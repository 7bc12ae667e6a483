use std::fmt;

use thiserror::Error;

/// Guidance shown when the geocoder has no candidate for a query.
pub const NOT_FOUND_MESSAGE: &str = "Location not found. Please try:\n\
     • A city name (e.g., \"Mumbai\", \"Shimla\")\n\
     • Check spelling\n\
     • Try a major city in the region";

/// Which network stage of the pipeline produced a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStage {
    Geocoding,
    Forecast,
}

impl ServiceStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStage::Geocoding => "geocoding",
            ServiceStage::Forecast => "forecast",
        }
    }

    /// User-facing message for a failed request at this stage.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ServiceStage::Geocoding => "Failed to search for location",
            ServiceStage::Forecast => "Failed to fetch weather data",
        }
    }
}

impl fmt::Display for ServiceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a lookup can fail. `Display` is always safe to show to a user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Please enter a city name")]
    InvalidInput,

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error("{}", .stage.failure_message())]
    Service { stage: ServiceStage, status: u16 },

    /// Transport failures, malformed bodies and anything else unclassified.
    /// The cause is kept for logs but never rendered.
    #[error("An unexpected error occurred. Please try again.")]
    Unknown {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl WeatherError {
    pub fn service(stage: ServiceStage, status: u16) -> Self {
        Self::Service { stage, status }
    }

    pub fn unknown<E>(source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Unknown { source: source.into() }
    }

    /// Short machine-readable kind, used in logs and `--json` output.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::InvalidInput => "invalid_input",
            WeatherError::NotFound => "not_found",
            WeatherError::Service { .. } => "service",
            WeatherError::Unknown { .. } => "unknown",
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::unknown(err)
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::unknown(err)
    }
}
