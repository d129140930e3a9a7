//! The App API client: builds a request, hands it to a `Transport`, and
//! interprets the response.

use serde_json::Value;

use crate::client::AppApiClient;
use crate::config::AppApiConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};
use crate::types::TransactionalEmail;

/// Customer.io App API client.
///
/// Each call issues exactly one request and waits for it. There are no
/// retries; the caller decides what to do with an `ApiError`.
#[derive(Debug, Clone)]
pub struct AppApi<T: Transport = UreqTransport> {
    client: AppApiClient,
    transport: T,
}

impl AppApi<UreqTransport> {
    /// Client for the default region using the given App API key.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(AppApiConfig::new(api_key))
    }

    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: AppApiConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> AppApi<T> {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the configuration is invalid.
    pub fn with_transport(config: AppApiConfig, transport: T) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            client: AppApiClient::from_config(&config),
            transport,
        })
    }

    /// Trigger the API-triggered broadcast `campaign_id`.
    ///
    /// `data` is exposed to the broadcast's messages; `recipient_filter`
    /// overrides the audience configured for the broadcast.
    pub fn trigger_broadcast(
        &self,
        campaign_id: u64,
        data: Option<Value>,
        recipient_filter: Option<Value>,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .build_trigger_broadcast(campaign_id, data, recipient_filter)?;
        self.call(request)
    }

    /// Send transactional message `transactional_message_id` to `to`.
    pub fn send_email(
        &self,
        transactional_message_id: &str,
        to: &str,
        identifiers: Value,
        data: Option<Value>,
        bcc: Option<&str>,
    ) -> Result<(), ApiError> {
        let email = TransactionalEmail {
            transactional_message_id: transactional_message_id.to_string(),
            to: to.to_string(),
            identifiers,
            message_data: data,
            bcc: bcc.map(str::to_string),
        };
        self.send(&email)
    }

    pub fn send(&self, email: &TransactionalEmail) -> Result<(), ApiError> {
        let request = self.client.build_send_email(email)?;
        self.call(request)
    }

    fn call(&self, request: HttpRequest) -> Result<(), ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "sending App API request");
        let response = self
            .transport
            .execute(request)
            .map_err(ApiError::Transport)?;
        self.client.parse_response(response)
    }
}
