//! City query → [`WeatherResult`], all or nothing.
//!
//! Each run performs two dependent requests (geocoding, then forecast) and
//! never caches. Overlapping runs are independent; discarding a stale result
//! is the caller's job.

use tracing::{debug, info, instrument, warn};

use crate::{
    classify::classify,
    config::Config,
    error::WeatherError,
    forecast::{round_temp, shape_series},
    model::{Location, RawWeather, WeatherResult},
    provider::{ForecastSource, Geocoder, OpenMeteoClient},
    resolver::{LocationResolver, validate_query},
};

/// Progress of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Resolving,
    Fetching,
    Ready,
    Failed,
}

#[derive(Debug)]
pub struct Pipeline {
    geocoder: Box<dyn Geocoder>,
    forecast: Box<dyn ForecastSource>,
}

impl Pipeline {
    pub fn new(geocoder: Box<dyn Geocoder>, forecast: Box<dyn ForecastSource>) -> Self {
        Self { geocoder, forecast }
    }

    /// Pipeline backed by Open-Meteo for both stages.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = OpenMeteoClient::new(config)?;
        Ok(Self::new(Box::new(client.clone()), Box::new(client)))
    }

    pub async fn run(&self, query: &str) -> Result<WeatherResult, WeatherError> {
        self.run_observed(query, |_| {}).await
    }

    /// Like [`Pipeline::run`], reporting each state transition to `observer`.
    #[instrument(skip(self, observer))]
    pub async fn run_observed<F>(&self, query: &str, mut observer: F) -> Result<WeatherResult, WeatherError>
    where
        F: FnMut(PipelineState) + Send,
    {
        observer(PipelineState::Idle);

        let outcome = self.stages(query, &mut observer).await;
        match &outcome {
            Ok(result) => {
                info!(city = %result.city, temperature = result.temperature, "weather ready");
                observer(PipelineState::Ready);
            }
            Err(err @ (WeatherError::InvalidInput | WeatherError::NotFound)) => {
                info!(kind = err.kind(), "lookup rejected");
                observer(PipelineState::Failed);
            }
            Err(err) => {
                warn!(kind = err.kind(), error = ?err, "lookup failed");
                observer(PipelineState::Failed);
            }
        }

        outcome
    }

    async fn stages<F>(&self, query: &str, observer: &mut F) -> Result<WeatherResult, WeatherError>
    where
        F: FnMut(PipelineState) + Send,
    {
        let query = validate_query(query)?;

        observer(PipelineState::Resolving);
        debug!("state: resolving");
        let location = LocationResolver::resolve(self.geocoder.as_ref(), query).await?;

        observer(PipelineState::Fetching);
        debug!("state: fetching");
        let raw = self.forecast.fetch_for(&location).await?;

        Ok(assemble(&location, &raw))
    }
}

/// Combine a resolved location and its raw weather into the display model.
pub fn assemble(location: &Location, raw: &RawWeather) -> WeatherResult {
    let info = classify(raw.current_code);

    WeatherResult {
        city: location.display_name(),
        temperature: round_temp(raw.current_temp),
        condition: info.condition.to_string(),
        description: info.description.to_string(),
        hourly_forecast: shape_series(raw.hourly.as_ref()),
    }
}
