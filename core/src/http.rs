//! Plain-data HTTP types for the transport boundary.
//!
//! # Design
//! Requests and responses are described as owned plain data. The production
//! client builds `HttpRequest` values and interprets `HttpResponse` values;
//! only the `Transport` implementation performs real I/O. This keeps route
//! building and envelope parsing deterministic and testable without a
//! network.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by the production client's route table. The `Transport` executes
/// it and returns the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Status codes are data here, not errors; classification happens in the
/// response envelope.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
