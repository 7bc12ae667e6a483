//! Free-text city query → single [`Location`].
//!
//! The first geocoding candidate always wins; there is no ranking.

use tracing::{debug, info};

use crate::{
    error::WeatherError,
    model::Location,
    provider::{GeocodingCandidate, Geocoder},
};

pub struct LocationResolver;

impl LocationResolver {
    /// Resolve a query to the service's first candidate.
    ///
    /// Blank queries fail with [`WeatherError::InvalidInput`] before any request is made.
    pub async fn resolve(geocoder: &dyn Geocoder, query: &str) -> Result<Location, WeatherError> {
        let query = validate_query(query)?;
        debug!(query, "geocoding");

        let candidates = geocoder.search(query).await?;
        let Some(first) = candidates.into_iter().next() else {
            debug!(query, "no geocoding candidates");
            return Err(WeatherError::NotFound);
        };

        let location = Location::from(first);
        info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query,
            location.display_name(),
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}

/// Trim a query, rejecting it if nothing is left.
pub fn validate_query(query: &str) -> Result<&str, WeatherError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(WeatherError::InvalidInput);
    }
    Ok(trimmed)
}

/// Compose "Name, Region, Country". The region is dropped when absent or equal
/// to the name; the country is dropped when absent or blank.
pub fn display_name(name: &str, region: Option<&str>, country: Option<&str>) -> String {
    let mut out = name.to_string();

    if let Some(region) = region.filter(|r| !r.is_empty() && *r != name) {
        out.push_str(", ");
        out.push_str(region);
    }
    if let Some(country) = country.filter(|c| !c.is_empty()) {
        out.push_str(", ");
        out.push_str(country);
    }

    out
}

impl From<GeocodingCandidate> for Location {
    fn from(candidate: GeocodingCandidate) -> Self {
        Location {
            name: candidate.name,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
            country: candidate.country.unwrap_or_default(),
            region: candidate.admin1,
        }
    }
}
