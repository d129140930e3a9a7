//! Request builder and response parser for the App API.
//!
//! # Design
//! `AppApiClient` holds the base URL and the prebuilt header set, and carries
//! no mutable state between calls. Each operation has a `build_*` method that
//! produces an `HttpRequest`; every response goes through `parse_response`.
//! The I/O in between belongs to a `Transport`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::AppApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{BroadcastTrigger, ErrorResponse, TransactionalEmail};

/// Synchronous, stateless request builder for the App API.
#[derive(Clone)]
pub struct AppApiClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl fmt::Debug for AppApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AppApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: vec![
                ("authorization".to_string(), format!("Bearer {api_key}")),
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
        }
    }

    pub fn from_config(config: &AppApiConfig) -> Self {
        let mut client = Self::new(&config.base_url, &config.api_key);
        client
            .headers
            .push(("user-agent".to_string(), config.user_agent.clone()));
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_trigger_broadcast(
        &self,
        campaign_id: u64,
        data: Option<Value>,
        recipient_filter: Option<Value>,
    ) -> Result<HttpRequest, ApiError> {
        let payload = BroadcastTrigger {
            data,
            recipients: recipient_filter,
        };
        self.post(&format!("/campaigns/{campaign_id}/triggers"), &payload)
    }

    pub fn build_send_email(&self, email: &TransactionalEmail) -> Result<HttpRequest, ApiError> {
        self.post("/send/email", email)
    }

    /// Accept HTTP 200 and nothing else.
    ///
    /// The success body is not interpreted. Any other status is reported as
    /// `ApiError::Api` with the body parsed as an `ErrorResponse`; a body that
    /// is not JSON yields an empty `ErrorResponse` and survives in `raw`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status == 200 {
            tracing::debug!(status = response.status, "App API request succeeded");
            return Ok(());
        }
        let body: ErrorResponse = serde_json::from_str(&response.body).unwrap_or_default();
        tracing::warn!(
            status = response.status,
            errors = ?body.messages(),
            "App API request failed"
        );
        Err(ApiError::Api {
            status: response.status,
            body,
            raw: response.body,
        })
    }

    fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            headers: self.headers.clone(),
            body,
        })
    }
}
