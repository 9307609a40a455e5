use std::time::Duration;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Service address used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
/// Request timeout used when nothing is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the review service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Outcome of a failed API call.
///
/// `Unavailable` is the recoverable case: the service could not be reached
/// at all and callers may switch to the local store.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API server not available at {url}")]
    Unavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("API error: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("invalid API response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ApiError::Unavailable { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    fn from_transport(url: &str, err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unavailable {
                url: url.to_string(),
                source: err,
            }
        } else if err.is_decode() {
            ApiError::Decode {
                url: url.to_string(),
                source: err,
            }
        } else {
            ApiError::Request(err)
        }
    }
}

/// Blocking JSON client for the review service
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {} {:?}", url, query);
        let request = self.http.get(&url).query(query);
        self.send_json(&url, request)
    }

    pub(crate) fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let request = self.http.post(&url).json(body);
        self.send_json(&url, request)
    }

    pub(crate) fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("PUT {}", url);
        let request = self.http.put(&url).json(body);
        self.send_json(&url, request)
    }

    /// DELETE ignores any response body
    pub(crate) fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        log::debug!("DELETE {}", url);
        self.send(&url, self.http.delete(&url))?;
        Ok(())
    }

    fn send(&self, url: &str, request: RequestBuilder) -> Result<reqwest::blocking::Response, ApiError> {
        let response = request
            .send()
            .map_err(|e| ApiError::from_transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} returned {}", url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(response)
    }

    fn send_json<T: DeserializeOwned>(&self, url: &str, request: RequestBuilder) -> Result<T, ApiError> {
        self.send(url, request)?
            .json::<T>()
            .map_err(|e| ApiError::from_transport(url, e))
    }
}
