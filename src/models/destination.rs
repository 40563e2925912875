use serde::{Deserialize, Serialize};

/// Catalogue record served by `GET /api/destinations/{slug}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Destination {
    #[serde(default)]
    pub id: Option<u32>,
    pub slug: String,
    #[serde(rename = "Destination")]
    pub name: String,
    #[serde(rename = "State / UT", default)]
    pub state: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Best Time to Visit", default)]
    pub best_time_to_visit: Option<String>,
    #[serde(rename = "Ideal Duration", default)]
    pub ideal_duration: Option<String>,
    #[serde(rename = "Suitable For", default)]
    pub suitable_for: Option<String>,
    #[serde(rename = "Weekend Trip", default)]
    pub weekend_trip: Option<String>,
    #[serde(rename = "Famous For", default)]
    pub famous_for: Option<String>,
    #[serde(rename = "Short Description", default)]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}
