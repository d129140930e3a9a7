//! Request payloads and the error body returned by the App API.
//!
//! Free-form fields (`data`, `recipients`, `identifiers`, `message_data`) are
//! `serde_json::Value` so callers can pass any JSON shape through untouched.
//! Optional fields are left out of the serialized body when unset.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /campaigns/{id}/triggers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastTrigger {
    /// Liquid data made available to the broadcast's messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Recipient filter overriding the broadcast's preset audience.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Value>,
}

/// Body of `POST /send/email`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionalEmail {
    pub transactional_message_id: String,
    pub to: String,
    pub identifiers: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
}

impl TransactionalEmail {
    pub fn new(
        transactional_message_id: impl Into<String>,
        to: impl Into<String>,
        identifiers: Value,
    ) -> Self {
        Self {
            transactional_message_id: transactional_message_id.into(),
            to: to.into(),
            identifiers,
            message_data: None,
            bcc: None,
        }
    }

    #[must_use]
    pub fn with_message_data(mut self, data: Value) -> Self {
        self.message_data = Some(data);
        self
    }

    #[must_use]
    pub fn with_bcc(mut self, bcc: impl Into<String>) -> Self {
        self.bcc = Some(bcc.into());
        self
    }
}

/// Error payload of a non-200 response.
///
/// The App API reports failures either as a top-level `errors` list or inside
/// a `meta` object; both shapes deserialize into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ErrorMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    /// All error messages in the payload, top-level ones first.
    pub fn messages(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.errors.iter().map(String::as_str).collect();
        if let Some(meta) = &self.meta {
            out.extend(meta.error.as_deref());
            out.extend(meta.errors.iter().map(String::as_str));
        }
        out
    }
}
