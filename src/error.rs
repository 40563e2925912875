use std::error::Error;
use std::fmt;

/// Failure of a call to the travel backend or one of its neighbours.
#[derive(Debug)]
pub enum ApiError {
    HttpError(reqwest::Error),
    StatusError(u16, String),
    ResponseError(String),
    BackendError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpError(err) => write!(f, "HTTP error: {}", err),
            ApiError::StatusError(status, body) => {
                write!(f, "Request failed with status {}: {}", status, body)
            }
            ApiError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            ApiError::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::HttpError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::HttpError(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ResponseError(format!("Failed to parse response: {}", err))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvironmentError(String),
    InvalidUrl(String, url::ParseError),
    ClientError(reqwest::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            ConfigError::InvalidUrl(value, err) => write!(f, "Invalid URL '{}': {}", value, err),
            ConfigError::ClientError(err) => write!(f, "Failed to build HTTP client: {}", err),
        }
    }
}

impl Error for ConfigError {}

impl From<reqwest::Error> for ConfigError {
    fn from(err: reqwest::Error) -> Self {
        ConfigError::ClientError(err)
    }
}
