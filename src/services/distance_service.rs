//! Distance Service with Nominatim geocoding
//!
//! Resolves a trip's location to coordinates through an OpenStreetMap
//! Nominatim-compatible lookup service and computes straight-line distance
//! from the traveller's position.
//!
//! ## Setup
//! The lookup host defaults to the public Nominatim instance and can be
//! overridden with `GEOCODER_URL`.
//!
//! ## Notes
//! - Only the city part of a location ("Goa" of "Goa, India") is looked up,
//!   scoped to India.
//! - Distances are great-circle (haversine) distances rounded to whole km.

use crate::error::ApiError;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const EARTH_RADIUS_KM: f64 = 6371.0;
const COUNTRY_SCOPE: &str = "India";
// Nominatim's usage policy rejects requests without an identifying agent.
const USER_AGENT: &str = concat!("trip-explorer/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::str::FromStr for Coordinates {
    type Err = String;

    /// Parses `"lat,lon"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = value
            .split_once(',')
            .ok_or_else(|| format!("Expected 'lat,lon', got '{}'", value))?;
        let lat: f64 = lat.trim().parse().map_err(|e| format!("Invalid latitude: {}", e))?;
        let lon: f64 = lon.trim().parse().map_err(|e| format!("Invalid longitude: {}", e))?;
        Ok(Self { lat, lon })
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

pub struct DistanceService {
    http_client: Client,
    geocoder_base: Url,
}

impl DistanceService {
    pub fn new(http_client: Client, geocoder_base: Url) -> Self {
        Self {
            http_client,
            geocoder_base,
        }
    }

    /// Coordinates of the first lookup hit for the city part of `location`,
    /// or `None` when nothing matched.
    pub async fn geocode(&self, location: &str) -> Result<Option<Coordinates>, ApiError> {
        let city = match location.split(',').next().map(str::trim) {
            Some(city) if !city.is_empty() => city,
            _ => return Ok(None),
        };

        let url = self
            .geocoder_base
            .join("search")
            .map_err(|e| ApiError::ResponseError(format!("Invalid geocoder URL: {}", e)))?;
        let lookup = format!("{}, {}", city, COUNTRY_SCOPE);
        debug!("Geocoding '{}' via {}", lookup, url);

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("format", "json"), ("q", lookup.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::StatusError(status.as_u16(), error_text));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| ApiError::ResponseError(format!("Failed to parse geocoder response: {}", e)))?;

        match places.first() {
            Some(place) => {
                let lat = place.lat.parse::<f64>();
                let lon = place.lon.parse::<f64>();
                match (lat, lon) {
                    (Ok(lat), Ok(lon)) => Ok(Some(Coordinates { lat, lon })),
                    _ => Err(ApiError::ResponseError(format!(
                        "Geocoder returned non-numeric coordinates for '{}'",
                        city
                    ))),
                }
            }
            None => Ok(None),
        }
    }
}

/// Haversine distance in whole kilometres.
pub fn distance_km(from: Coordinates, to: Coordinates) -> u32 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_KM * c).round() as u32
}
