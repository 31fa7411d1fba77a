use std::time::Duration;

use async_trait::async_trait;
use common::SyncError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::plex::Envelope;

pub type Query = [(String, String)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Unreachable(String),
    Status(u16),
    Decode(String),
    InvalidRequest(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Unreachable(err) => write!(f, "request failed: {}", err),
            TransportError::Status(status) => write!(f, "http {}", status),
            TransportError::Decode(err) => write!(f, "invalid response: {}", err),
            TransportError::InvalidRequest(err) => write!(f, "invalid request: {}", err),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for SyncError {
    fn from(err: TransportError) -> Self {
        SyncError::UpstreamUnavailable(err.to_string())
    }
}

/// Authenticated request seam between the sync core and the media server.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError>;

    async fn put(&self, path: &str, query: &Query) -> Result<(), TransportError>;
}

pub(crate) async fn get_container<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    query: &Query,
) -> Result<T, TransportError> {
    let value = transport.get(path, query).await?;
    let envelope: Envelope<T> =
        serde_json::from_value(value).map_err(|err| TransportError::Decode(err.to_string()))?;
    Ok(envelope.container)
}

#[derive(Clone)]
pub struct PlexClient {
    client: Client,
    host: String,
}

impl PlexClient {
    pub fn new(host: &str, token: &str, timeout: Duration) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(token.trim())
            .map_err(|err| TransportError::InvalidRequest(format!("token: {}", err)))?;
        headers.insert("X-Plex-Token", token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("plex-localize/0.1")
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
        Ok(Self {
            client,
            host: host.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    fn request(&self, method: Method, path: &str, query: &Query) -> Result<Request, TransportError> {
        self.client
            .request(method, self.url(path))
            .query(query)
            .build()
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))
    }

    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| TransportError::Unreachable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl Transport for PlexClient {
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError> {
        let request = self.request(Method::GET, path, query)?;
        self.send(request)
            .await?
            .json::<Value>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }

    async fn put(&self, path: &str, query: &Query) -> Result<(), TransportError> {
        let request = self.request(Method::PUT, path, query)?;
        self.send(request).await?;
        Ok(())
    }
}
