use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::models::destination::Destination;
use crate::models::itinerary::{Itinerary, ItineraryRequest};
use crate::models::media::{BackgroundImage, BackgroundVideo};
use crate::models::search::{ResultSet, SearchRequest, SearchResponse};
use crate::services::interface::{ItineraryGenerator, TripSearch};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

const MIN_SUGGEST_CHARS: usize = 2;

/// HTTP client for the travel backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    config: ClientConfig,
}

impl BackendClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `POST /search`
    pub async fn search_trips(&self, query: &str) -> Result<ResultSet, ApiError> {
        let url = endpoint(&self.config.api_base, "search")?;
        debug!("Searching trips for '{}' at {}", query, url);

        let response = self
            .client
            .post(url)
            .json(&SearchRequest {
                query: query.to_string(),
            })
            .send()
            .await?;

        let body = read_json(response).await?;
        let search_response: SearchResponse = serde_json::from_value(body)?;
        Ok(search_response.into_result_set())
    }

    /// `POST /api/generate-itinerary`
    pub async fn generate_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<Itinerary, ApiError> {
        let url = endpoint(&self.config.itinerary_base, "api/generate-itinerary")?;
        debug!("Requesting itinerary for '{}'", request.destination);

        let response = self.client.post(url).json(request).send().await?;
        decode(read_json(response).await?)
    }

    /// `GET /api/destinations/{slug}`
    pub async fn destination(&self, slug: &str) -> Result<Destination, ApiError> {
        let mut url = endpoint(&self.config.api_base, "api/destinations/")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::ResponseError(format!("Cannot build URL for '{}'", slug)))?
            .pop_if_empty()
            .push(slug);

        let response = self.client.get(url).send().await?;
        decode(read_json(response).await?)
    }

    /// `GET /api/destinations/suggest?q=`. Prefixes shorter than two
    /// characters are not sent.
    pub async fn suggest(&self, prefix: &str) -> Result<Vec<String>, ApiError> {
        if prefix.chars().count() < MIN_SUGGEST_CHARS {
            return Ok(Vec::new());
        }

        let url = endpoint(&self.config.api_base, "api/destinations/suggest")?;
        let response = self.client.get(url).query(&[("q", prefix)]).send().await?;
        decode(read_json(response).await?)
    }

    /// `GET /api/background`
    pub async fn background_image(&self) -> Result<BackgroundImage, ApiError> {
        let url = endpoint(&self.config.api_base, "api/background")?;
        let response = self.client.get(url).send().await?;
        decode(read_json(response).await?)
    }

    /// `GET /api/video/background`. Any failure, or a response without a
    /// video URL, yields the built-in fallback clip.
    pub async fn background_video(&self, query: &str) -> BackgroundVideo {
        match self.fetch_background_video(query).await {
            Ok(video) if video.video_url.as_deref().is_some_and(|u| !u.is_empty()) => video,
            Ok(_) => {
                warn!("Background video response had no video_url, using fallback");
                BackgroundVideo::fallback()
            }
            Err(e) => {
                warn!("Failed to fetch background video: {}", e);
                BackgroundVideo::fallback()
            }
        }
    }

    async fn fetch_background_video(&self, query: &str) -> Result<BackgroundVideo, ApiError> {
        let url = endpoint(&self.config.api_base, "api/video/background")?;
        let response = self.client.get(url).query(&[("query", query)]).send().await?;
        decode(read_json(response).await?)
    }
}

#[async_trait]
impl TripSearch for BackendClient {
    async fn search(&self, query: &str) -> Result<ResultSet, ApiError> {
        self.search_trips(query).await
    }
}

#[async_trait]
impl ItineraryGenerator for BackendClient {
    async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, ApiError> {
        self.generate_itinerary(request).await
    }
}

fn endpoint(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path)
        .map_err(|e| ApiError::ResponseError(format!("Invalid endpoint '{}': {}", path, e)))
}

async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ApiError::StatusError(status.as_u16(), error_text));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| ApiError::ResponseError(format!("Failed to parse response: {}", e)))
}

/// Decodes a success body, treating an `{ "error": ... }` payload as failure.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return Err(ApiError::BackendError(message));
    }

    Ok(serde_json::from_value(body)?)
}
