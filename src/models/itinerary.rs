use serde::{Deserialize, Serialize};

/// Day-by-day plan attached to a trip, either shipped with the search result
/// or produced later by the itinerary generator.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Itinerary {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
    #[serde(default)]
    pub footer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waypoints: Option<Vec<String>>,

    // Older generator responses used a flat single-day layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ItineraryDay {
    #[serde(default)]
    pub day_label: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub morning: Vec<String>,
    #[serde(default)]
    pub afternoon: Vec<String>,
    #[serde(default)]
    pub evening: Vec<String>,
}

impl Itinerary {
    pub fn has_route(&self) -> bool {
        self.waypoints.is_some()
    }
}

/// Body of `POST /api/generate-itinerary`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ItineraryRequest {
    pub destination: String,
    pub query: String,
}
