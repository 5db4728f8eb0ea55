//! Settings loading for hahow-dl.
//!
//! Settings come from a JSON file with CLI flags layered on top. The merged
//! value is built once at startup and passed into [`crate::CourseDownloader`];
//! nothing reads configuration globally.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HahowError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Course page URL, e.g. `https://hahow.in/courses/<id>`
    #[serde(default)]
    pub course_url: Option<String>,
    /// Value sent as the `authorization` header on every API call
    #[serde(default)]
    pub authorization: Option<String>,
}

impl Settings {
    /// Settings file name
    pub const FILE_NAME: &'static str = "hahow-dl.json";

    /// Default settings location: `hahow-dl.json` in the working directory,
    /// falling back to the user configuration directory.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(Self::FILE_NAME);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join("hahow-dl").join(Self::FILE_NAME))
            .unwrap_or(local)
    }

    /// Load settings from `path`. A missing file yields empty settings so
    /// that CLI flags alone can drive a run.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Layer CLI flags over the file values. `None` leaves the file value
    /// in place.
    pub fn apply_overrides(&mut self, course_url: Option<String>, authorization: Option<String>) {
        if course_url.is_some() {
            self.course_url = course_url;
        }
        if authorization.is_some() {
            self.authorization = authorization;
        }
    }

    pub fn course_url(&self) -> Result<&str> {
        self.course_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(HahowError::MissingConfig {
                field: "course_url",
            })
    }

    pub fn authorization(&self) -> Result<&str> {
        self.authorization
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(HahowError::MissingConfig {
                field: "authorization",
            })
    }
}
