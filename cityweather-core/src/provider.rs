use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Location, RawWeather},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// One candidate returned by a geocoding search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodingCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
    /// State / province.
    #[serde(default)]
    pub admin1: Option<String>,
    /// County / district.
    #[serde(default)]
    pub admin2: Option<String>,
}

/// Free-text place search.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Candidates in service order. An empty list means nothing matched.
    async fn search(&self, query: &str) -> Result<Vec<GeocodingCandidate>, WeatherError>;
}

/// Current and hourly weather for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_for(&self, location: &Location) -> Result<RawWeather, WeatherError>;
}
