//! Error types for the lastmile client.
//!
//! # Design
//! One flat enum covers the three families the library distinguishes:
//! configuration errors (missing credentials, broken fixture packaging),
//! usage errors (test-setup mistakes such as a missing session key or an
//! unrecognized operation), and API errors reported by the service itself.
//! Only `Api` is subject to the `raise_api_errors` switch; the other
//! families always propagate.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::operation::Operation;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by the lastmile clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No API key in the configuration or the environment.
    #[error("missing API key: set Config.api_key or LASTMILE_API_KEY")]
    MissingApiKey,

    /// No tenant id in the configuration or the environment.
    #[error("missing tenant id: set Config.tenant_id or LASTMILE_TENANT_ID")]
    MissingTenantId,

    /// A packaged fixture file could not be read. This is a packaging
    /// defect, never a runtime condition to recover from.
    #[error("fixture missing at {}: {source}", .path.display())]
    FixtureMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A packaged fixture file is not valid JSON.
    #[error("fixture at {} is not valid JSON: {source}", .path.display())]
    FixtureInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `stub` was given an outcome other than `success` or `failure`.
    #[error("invalid outcome '{0}' provided to stub")]
    InvalidOutcome(String),

    /// A mock call was made without the required `session` argument.
    #[error("session key not provided")]
    SessionMissing,

    /// The operation name is not recognized, so no stub or fixture can
    /// answer for it.
    #[error("no stub available for operation '{0}'")]
    NoStub(String),

    /// A stub payload supplied as text is not parseable JSON.
    #[error("stub payload for '{operation}' is not valid JSON: {source}")]
    StubInvalid {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },

    /// A call was missing a parameter the operation's route requires.
    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),

    /// Payload field access on a field that does not exist.
    #[error("no such field '{0}' in payload")]
    FieldMissing(String),

    /// An error payload declared a `type` with no mapped error kind.
    #[error("unmapped error type '{0}' in response payload")]
    UnknownErrorType(String),

    /// The transport failed before an HTTP status was available.
    #[error("transport error: {0}")]
    Transport(String),

    /// A payload could not be parsed as JSON.
    #[error("malformed response payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The service reported a business error.
    #[error("{kind}: {message}")]
    Api { kind: ApiErrorKind, message: String },
}

/// Typed API error families, keyed by the `type` field of error payloads.
///
/// The mapping is total over the error types shipped in the packaged
/// failure fixtures; a `type` outside it surfaces as
/// [`ClientError::UnknownErrorType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidData,
    NotFound,
    Conflict,
    InternalServerError,
}

impl ApiErrorKind {
    /// Look up the kind for an error payload's `type` value.
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            "invalid_data" => Some(Self::InvalidData),
            "not_found" => Some(Self::NotFound),
            "conflict" => Some(Self::Conflict),
            "internal_server_error" => Some(Self::InternalServerError),
            _ => None,
        }
    }

    /// The wire-level `type` value for this kind.
    pub fn as_type(self) -> &'static str {
        match self {
            Self::InvalidData => "invalid_data",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::InternalServerError => "internal_server_error",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidData => "invalid data",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::InternalServerError => "internal server error",
        };
        write!(f, "{label}")
    }
}
