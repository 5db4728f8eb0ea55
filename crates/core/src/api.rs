//! HTTP client for the hahow.in course API.

use regex::Regex;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::error::{HahowError, Result};
use crate::types::{Chapter, Course, Lecture};

pub const BASE_URL: &str = "https://api.hahow.in/api";

// The API rejects unknown clients; present a plain desktop browser.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Authenticated client for the course metadata endpoints. Cheap to clone;
/// the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    /// Build a client that sends `authorization` and a browser `User-Agent`
    /// on every request.
    pub fn new(authorization: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(authorization).map_err(|_| {
            HahowError::InvalidConfig {
                field: "authorization",
            }
        })?;
        headers.insert(AUTHORIZATION, token);
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { http })
    }

    /// The course id is the path segment directly after `courses/`.
    pub fn extract_course_id(course_url: &str) -> Result<String> {
        Regex::new(r"courses/([^/?#]+)")
            .ok()
            .and_then(|re| {
                re.captures(course_url)
                    .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            })
            .ok_or_else(|| HahowError::InvalidCourseUrl {
                url: course_url.to_string(),
            })
    }

    pub async fn fetch_course(&self, course_id: &str) -> Result<Course> {
        self.get_json(format!("{BASE_URL}/courses/{course_id}?requestBackup=false"))
            .await
    }

    pub async fn fetch_course_items(&self, course_id: &str) -> Result<Vec<Chapter>> {
        self.get_json(format!("{BASE_URL}/courses/{course_id}/modules/items"))
            .await
    }

    pub async fn fetch_lecture(&self, lecture_id: &str) -> Result<Lecture> {
        self.get_json(format!("{BASE_URL}/lectures/{lecture_id}?requestBackup=false"))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(HahowError::RemoteStatus {
                url,
                status: response.status(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// The shared HTTP client, for media downloads that go through the same
    /// session and headers.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_course_url() {
        let id = ApiClient::extract_course_id("https://hahow.in/courses/5a1b2c3d4e5f").unwrap();
        assert_eq!(id, "5a1b2c3d4e5f");
    }

    #[test]
    fn extracts_id_with_trailing_path_and_query() {
        let id =
            ApiClient::extract_course_id("https://hahow.in/courses/abc123/main?tr=share").unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn rejects_urls_without_a_course_segment() {
        let err = ApiClient::extract_course_id("https://hahow.in/about").unwrap_err();
        assert!(matches!(err, HahowError::InvalidCourseUrl { .. }));
    }

    #[test]
    fn rejects_header_unsafe_tokens() {
        let err = ApiClient::new("bad\ntoken").unwrap_err();
        assert!(matches!(
            err,
            HahowError::InvalidConfig {
                field: "authorization"
            }
        ));
    }
}
