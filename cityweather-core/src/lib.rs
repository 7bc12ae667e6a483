//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - The lookup pipeline (geocode a city, fetch its weather, shape a display model)
//! - WMO weather-code classification and hourly forecast shaping
//! - Async abstractions over the geocoding and forecast services, with an Open-Meteo client
//! - Configuration handling
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod resolver;

pub use classify::{SkyKind, classify};
pub use config::Config;
pub use error::{ServiceStage, WeatherError};
pub use forecast::{shape_hourly, shape_series};
pub use model::{ConditionInfo, HourlyPoint, HourlySeries, Location, RawWeather, WeatherResult};
pub use pipeline::{Pipeline, PipelineState};
pub use provider::{ForecastSource, Geocoder, GeocodingCandidate, OpenMeteoClient};
pub use resolver::LocationResolver;
