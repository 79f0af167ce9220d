//! Backend API client.
//!
//! # Responsibilities
//! - Build target URLs from the configured origin
//! - Issue exactly one outbound call per forwarded request
//! - Parse the backend's JSON body, tolerating empty bodies
//!
//! # Design Decisions
//! - No retries: most routes are non-idempotent POSTs
//! - No timeout unless `backend.timeout_secs` is configured
//! - The origin is an injected value, so tests can point it at a mock

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::upstream::types::{
    BackendConfig, ForwardBody, ForwardRequest, UpstreamError, UpstreamResponse, UpstreamResult,
};

/// Shared client for the backend API. Cheap to clone.
#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: Url,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client.
    pub fn new(config: &BackendConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        tracing::debug!(base_url = %base_url, "Backend client initialized");

        Ok(Self { base_url, client })
    }

    /// The configured backend origin.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full target URL for a forwarded request.
    pub fn url_for(&self, request: &ForwardRequest) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            for segment in &request.segments {
                path.push(segment);
            }
        }

        url.set_query(None);
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Send the request and read the backend's answer.
    ///
    /// A non-success status is not an error here; callers decide how to
    /// relay it.
    pub async fn forward(&self, request: ForwardRequest) -> UpstreamResult<UpstreamResponse> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, url = %url, "Forwarding to backend");

        let mut builder = self.client.request(request.method, url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            ForwardBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            ForwardBody::Json(body) => builder.json(&body),
            ForwardBody::Raw(body) => builder.body(body),
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(body) => body,
                Err(source) if status.is_success() => {
                    return Err(UpstreamError::Decode { status, source });
                }
                Err(_) => Value::Null,
            }
        };

        Ok(UpstreamResponse { status, body })
    }
}
