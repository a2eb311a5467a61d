// src/status_api.rs
use std::fmt;
use std::time::Duration;
use log::debug;
use reqwest::{Client, StatusCode, Url};

use crate::config::{ApiVersion, ServerAddress};
use crate::models::status::StatusResponse;

/// Any failure between issuing the status request and holding a parsed
/// response. All variants are handled the same way by the poller.
#[derive(Debug)]
pub enum FetchError {
    InvalidEndpoint(String),
    Network(reqwest::Error),
    Status(StatusCode),
    Parse(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint(url) => write!(f, "Invalid status endpoint: {}", url),
            Self::Network(e) => write!(f, "Status request failed: {}", e),
            Self::Status(code) => write!(f, "Status API answered {}", code),
            Self::Parse(e) => write!(f, "Malformed status response: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Where server status comes from.
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn fetch_status(&self, address: &ServerAddress) -> Result<StatusResponse, FetchError>;
}

/// The public mcsrvstat.us-style API.
pub struct HttpStatusSource {
    client: Client,
    base: String,
    version: ApiVersion,
}

impl HttpStatusSource {
    pub fn new(base: impl Into<String>, version: ApiVersion, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: base.into(),
            version,
        })
    }

    pub fn endpoint(&self, address: &ServerAddress) -> Result<Url, FetchError> {
        endpoint_url(&self.base, self.version, address)
    }
}

pub fn endpoint_url(base: &str, version: ApiVersion, address: &ServerAddress) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|_| FetchError::InvalidEndpoint(base.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidEndpoint(base.to_string()))?
        .pop_if_empty()
        .push(version.path_segment())
        .push(address.as_str());
    Ok(url)
}

impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self, address: &ServerAddress) -> Result<StatusResponse, FetchError> {
        let url = self.endpoint(address)?;
        debug!("Fetching status from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        interpret_response(status, &body)
    }
}

/// Turns an HTTP answer into a status. A non-success answer with a usable
/// JSON body is still rendered.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<StatusResponse, FetchError> {
    match StatusResponse::from_json(body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(FetchError::Status(status)),
        Err(e) => Err(FetchError::Parse(e)),
    }
}
