use serde::{Deserialize, Serialize};

pub const FALLBACK_VIDEO_URL: &str =
    "https://videos.pexels.com/video-files/20456073/20456073-uhd_2560_1440_30fps.mp4";
pub const FALLBACK_VIDEO_CREDIT: &str = "Generic India Travel";
pub const FALLBACK_VIDEO_CREDIT_URL: &str = "https://www.pexels.com/search/videos/india/";
pub const DEFAULT_VIDEO_QUERY: &str =
    "slow motion indian travel, india drone, kerala backwaters, himalaya drone, rajasthan palace";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackgroundImage {
    pub image_url: String,
    #[serde(default)]
    pub photographer_name: Option<String>,
    #[serde(default)]
    pub photographer_username: Option<String>,
    #[serde(default)]
    pub unsplash_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackgroundVideo {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub photographer_name: Option<String>,
    #[serde(default)]
    pub photographer_url: Option<String>,
}

impl BackgroundVideo {
    pub fn fallback() -> Self {
        Self {
            video_url: Some(FALLBACK_VIDEO_URL.to_string()),
            photographer_name: Some(FALLBACK_VIDEO_CREDIT.to_string()),
            photographer_url: Some(FALLBACK_VIDEO_CREDIT_URL.to_string()),
        }
    }
}
