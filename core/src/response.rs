//! Response envelope: one payload paired with one status code.

use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::payload::Payload;

/// Status codes the API uses for business errors. Anything else, including
/// custom 2xx/3xx values, classifies as success.
pub const ERROR_CODES: [u16; 4] = [500, 400, 404, 409];

/// A payload on its way into an envelope: raw text or parsed JSON.
#[derive(Debug, Clone)]
pub enum RawPayload {
    Text(String),
    Json(Value),
}

impl RawPayload {
    pub(crate) fn into_json(self) -> serde_json::Result<Value> {
        match self {
            RawPayload::Text(text) => serde_json::from_str(&text),
            RawPayload::Json(value) => Ok(value),
        }
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        RawPayload::Text(text.to_string())
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        RawPayload::Text(text)
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        RawPayload::Json(value)
    }
}

/// The `{payload, status}` result of one API operation.
///
/// Immutable once constructed; classification is the only behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    payload: Payload,
    status: u16,
}

impl Response {
    /// Normalize a raw payload (text, map or list) and pair it with a
    /// status.
    ///
    /// # Errors
    /// `MalformedPayload` when a text payload is not valid JSON.
    pub fn parse(raw: impl Into<RawPayload>, status: u16) -> Result<Response> {
        let value = raw
            .into()
            .into_json()
            .map_err(ClientError::MalformedPayload)?;
        Ok(Response {
            payload: Payload::new(value),
            status,
        })
    }

    /// Build an envelope for an already-resolved document, taking the
    /// status from the document's own `statusCode` field.
    ///
    /// Success documents carry no `statusCode` and default to 200; failure
    /// documents self-classify.
    pub fn from_document(document: Value) -> Response {
        let status = document
            .get("statusCode")
            .and_then(Value::as_u64)
            .map(|code| code as u16)
            .unwrap_or(200);
        Response {
            payload: Payload::new(document),
            status,
        }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status classifies as an API error.
    pub fn is_error(&self) -> bool {
        ERROR_CODES.contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        !self.is_error()
    }
}
