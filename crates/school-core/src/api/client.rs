use crate::error::ApiError;
use crate::storage::session::SessionContext;
use crate::utils::error_helpers::*;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const API_PREFIX: &str = "/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("school-cli/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    pub base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: String, session: SessionContext) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Build a request for `path` (relative to the API prefix), carrying the
    /// current bearer token when one is held.
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Send exactly one request. Non-success statuses come back as
    /// [`ApiError::Http`] with the raw body text, if any.
    pub async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<ApiResponse, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| convert_body_error(status.as_u16(), e, endpoint))?
            .to_vec();

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            log::debug!("{} {} -> {}", endpoint, status.as_u16(), text);
            return Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body: (!text.is_empty()).then_some(text),
            });
        }

        Ok(ApiResponse {
            status,
            endpoint: endpoint.to_string(),
            body,
        })
    }

    /// Send and decode a JSON payload; `None` when the body is absent or `null`
    pub async fn fetch<T>(&self, request: RequestBuilder, endpoint: &str) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        self.send(request, endpoint).await?.json()
    }
}

/// A success response whose body has been fully read
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    endpoint: String,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for a zero-length, whitespace-only or literal `null` body
    pub fn is_empty(&self) -> bool {
        let text = String::from_utf8_lossy(&self.body);
        let trimmed = text.trim();
        trimmed.is_empty() || trimmed == "null"
    }

    pub fn json<T>(&self) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        if self.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&self.body)
            .map(Some)
            .map_err(|e| convert_json_error(e, &self.endpoint))
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        if self.body.is_empty() {
            None
        } else {
            Some(self.body)
        }
    }
}
