//! Synchronous client for the Customer.io App API.
//!
//! # Overview
//! Two operations: triggering an API-triggered broadcast and sending a
//! transactional email. Each call serializes a small payload, issues one
//! authenticated POST, and reports any non-200 response as `ApiError::Api`.
//!
//! # Design
//! - `AppApiClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - `Transport` performs the round-trip; `UreqTransport` is the default and
//!   tests substitute their own.
//! - `AppApi` ties the two together and is constructed explicitly; there is
//!   no global client.
//!
//! ```no_run
//! use customerio_core::AppApi;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), customerio_core::ApiError> {
//! let api = AppApi::new("app-api-key")?;
//! api.trigger_broadcast(42, Some(json!({"promo": "SPRING"})), None)?;
//! api.send_email("welcome", "ada@example.com", json!({"id": "ada"}), None, None)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use api::AppApi;
pub use client::AppApiClient;
pub use config::{AppApiConfig, Region};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{BroadcastTrigger, ErrorMeta, ErrorResponse, TransactionalEmail};
