use crate::models::itinerary::Itinerary;
use serde::{Deserialize, Serialize};

/// One recommended destination returned by `POST /search`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TripResult {
    // The backend sends numeric ids for generated trips and strings for catalogue ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub attractions: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
}

impl TripResult {
    /// Destination sent to the itinerary generator: location, then title,
    /// then the raw query, whichever is first non-empty.
    pub fn enhancement_target(&self, query: Option<&str>) -> Option<String> {
        [Some(self.location.as_str()), Some(self.title.as_str()), query]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())
            .map(str::to_string)
    }

    /// City part of the location, e.g. "Goa" for "Goa, India".
    pub fn city(&self) -> Option<&str> {
        let city = self.location.split(',').next()?.trim();
        if city.is_empty() {
            None
        } else {
            Some(city)
        }
    }
}
