use crate::error::ApiError;
use crate::models::itinerary::{Itinerary, ItineraryRequest};
use crate::models::search::ResultSet;
use async_trait::async_trait;

/// Trip search backend consumed by a search session.
#[async_trait]
pub trait TripSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<ResultSet, ApiError>;
}

/// AI itinerary generator consumed by a search session.
#[async_trait]
pub trait ItineraryGenerator: Send + Sync {
    async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, ApiError>;
}
