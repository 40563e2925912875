use crate::error::ConfigError;
use std::env;
use std::time::Duration;
use url::Url;

const API_URL: &str = "http://localhost:8000";
const GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const ENHANCE_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: Url,
    /// Host of `/api/generate-itinerary`; the web front serves it, so it may
    /// differ from the search backend.
    pub itinerary_base: Url,
    pub geocoder_base: Url,
    pub request_timeout: Duration,
    pub enhance_delay: Duration,
}

impl ClientConfig {
    /// Defaults for everything except the backend, which also serves
    /// itinerary generation.
    pub fn new(api_base: &str) -> Result<Self, ConfigError> {
        let api_base = parse_url(api_base)?;
        Ok(Self {
            itinerary_base: api_base.clone(),
            api_base,
            geocoder_base: parse_url(GEOCODER_URL)?,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            enhance_delay: Duration::from_millis(ENHANCE_DELAY_MS),
        })
    }

    /// Reads `TRAVEL_API_URL`, `ITINERARY_API_URL`, `GEOCODER_URL`,
    /// `REQUEST_TIMEOUT_SECS` and `ENHANCE_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = parse_url(&read_var("TRAVEL_API_URL")?.unwrap_or_else(|| API_URL.to_string()))?;
        let itinerary_base = match read_var("ITINERARY_API_URL")? {
            Some(value) => parse_url(&value)?,
            None => api_base.clone(),
        };
        let geocoder_base =
            parse_url(&read_var("GEOCODER_URL")?.unwrap_or_else(|| GEOCODER_URL.to_string()))?;

        let timeout_secs: u64 = read_var("REQUEST_TIMEOUT_SECS")?
            .unwrap_or_else(|| REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(REQUEST_TIMEOUT_SECS);
        let delay_ms: u64 = read_var("ENHANCE_DELAY_MS")?
            .unwrap_or_else(|| ENHANCE_DELAY_MS.to_string())
            .parse()
            .unwrap_or(ENHANCE_DELAY_MS);

        Ok(Self {
            api_base,
            itinerary_base,
            geocoder_base,
            request_timeout: Duration::from_secs(timeout_secs),
            enhance_delay: Duration::from_millis(delay_ms),
        })
    }

    /// Points both the search backend and the itinerary generator at `base`.
    pub fn with_api_base(mut self, base: &str) -> Result<Self, ConfigError> {
        let url = parse_url(base)?;
        self.itinerary_base = url.clone();
        self.api_base = url;
        Ok(self)
    }
}

fn read_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::EnvironmentError(format!(
            "{} is not valid unicode",
            name
        ))),
    }
}

/// Parses a base URL, forcing a trailing slash so `join` keeps any path prefix.
pub fn parse_url(value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{}/", value)
    };
    Url::parse(&normalized).map_err(|e| ConfigError::InvalidUrl(value.to_string(), e))
}
