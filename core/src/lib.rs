//! Client library for the Lastmile delivery API.
//!
//! # Overview
//! Two clients share one operation surface. The production client builds
//! real HTTP requests and hands them to a narrow [`Transport`] seam; the
//! mock client answers every call in-process from packaged fixtures and
//! user-registered stubs, so a test overrides the one field it cares about
//! and inherits a realistic response for everything else.
//!
//! # Design
//! - Payloads are untyped JSON behind [`Payload`], with attribute-style
//!   access and a hard error on absent fields.
//! - A bare-array document is normalized to `{"collection": [...]}` so both
//!   root shapes read the same at the call site.
//! - Stubs are deep-merged onto canonical fixtures at registration time;
//!   dispatch is a plain registry lookup.
//! - Error-vs-success is decided by a fixed status-code set; raising typed
//!   API errors is a per-client switch, while configuration and usage
//!   errors always propagate.

pub mod client;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod merge;
pub mod mock;
pub mod operation;
pub mod payload;
pub mod production;
pub mod response;

pub use client::{CallArgs, Client, Config};
pub use error::{ApiErrorKind, ClientError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mock::MockClient;
pub use operation::{Operation, Outcome};
pub use payload::Payload;
pub use production::{ProductionClient, Transport, UreqTransport};
pub use response::{RawPayload, Response, ERROR_CODES};
