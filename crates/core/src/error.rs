use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HahowError {
    #[error("Course URL is not recognized: {url}")]
    InvalidCourseUrl { url: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: &'static str },

    #[error("Invalid configuration value for {field}")]
    InvalidConfig { field: &'static str },

    #[error("Request to {url} failed with status {status}")]
    RemoteStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Subtitle conversion failed for {}: {reason}", .path.display())]
    Conversion { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, HahowError>;
