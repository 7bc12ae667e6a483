use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    error::{ServiceStage, WeatherError},
    model::{HourlySeries, Location, RawWeather},
};

use super::{ForecastSource, GeocodingCandidate, Geocoder};

/// Candidates requested per search; only the first is used.
pub const CANDIDATE_COUNT: &str = "5";
pub const LANGUAGE: &str = "en";
const WEATHER_FIELDS: &str = "temperature_2m,weather_code";

/// Keyless Open-Meteo client covering both the geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoClient {
    /// Build a client from config, applying the optional timeout and user agent.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            http,
        })
    }

    /// Client against explicit endpoints with transport defaults.
    pub fn with_endpoints(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            http: Client::new(),
        }
    }

    /// Body of a successful response. A non-success status is a `Service` error
    /// even when its body cannot be read.
    async fn read_body(res: Response, stage: ServiceStage) -> Result<String, WeatherError> {
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%stage, %status, body = %truncate_body(&body), "request failed");
            return Err(WeatherError::service(stage, status.as_u16()));
        }

        res.text().await.map_err(|e| {
            warn!(%stage, error = %e, "failed to read response body");
            WeatherError::from(e)
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingCandidate>>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: OmCurrent,
    #[serde(default)]
    hourly: Option<HourlySeries>,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<GeocodingCandidate>, WeatherError> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("name", query),
                ("count", CANDIDATE_COUNT),
                ("language", LANGUAGE),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "geocoding request could not be sent");
                WeatherError::from(e)
            })?;

        let body = Self::read_body(res, ServiceStage::Geocoding).await?;
        let parsed: GeocodingResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "malformed geocoding response");
            WeatherError::from(e)
        })?;

        let candidates = parsed.results.unwrap_or_default();
        debug!(count = candidates.len(), "geocoding candidates");

        Ok(candidates)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    #[instrument(skip(self, location), fields(lat = location.latitude, lon = location.longitude))]
    async fn fetch_for(&self, location: &Location) -> Result<RawWeather, WeatherError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        let res = self
            .http
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", WEATHER_FIELDS),
                ("hourly", WEATHER_FIELDS),
                ("temperature_unit", "celsius"),
                ("forecast_days", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "forecast request could not be sent");
                WeatherError::from(e)
            })?;

        let body = Self::read_body(res, ServiceStage::Forecast).await?;
        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "malformed forecast response");
            WeatherError::from(e)
        })?;

        Ok(RawWeather {
            current_temp: parsed.current.temperature_2m,
            current_code: parsed.current.weather_code,
            hourly: parsed.hourly,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
