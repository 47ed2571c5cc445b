//! Production client: route building, auth headers, and the transport seam.
//!
//! # Design
//! The client turns `(operation, args)` into a plain-data `HttpRequest`
//! through a single route table and interprets the resulting
//! `HttpResponse` as a response envelope; the `Transport` trait is the only
//! place real I/O happens. The default transport drives `ureq`
//! synchronously, with status codes treated as data so 4xx/5xx land in the
//! envelope rather than a transport error.

use std::fmt;

use tracing::debug;

use crate::client::{check_api_error, CallArgs, Config};
use crate::error::{ClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::operation::Operation;
use crate::response::Response;

const DEFAULT_BASE_URL: &str = "https://api.lastmile.delivery";

/// Executes plain-data HTTP requests. The only collaborator that touches
/// the network.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default synchronous transport backed by `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
        };

        let mut response = result.map_err(|err| ClientError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// HTTP client for the live delivery API.
pub struct ProductionClient {
    base_url: String,
    api_key: String,
    tenant_id: String,
    raise_api_errors: bool,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for ProductionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key stays out of debug output.
        f.debug_struct("ProductionClient")
            .field("base_url", &self.base_url)
            .field("tenant_id", &self.tenant_id)
            .field("raise_api_errors", &self.raise_api_errors)
            .finish_non_exhaustive()
    }
}

impl ProductionClient {
    /// Validate credentials and build a client with the default transport.
    ///
    /// # Errors
    /// `MissingApiKey` / `MissingTenantId` when neither the config nor the
    /// environment provides them.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| env_var("LASTMILE_API_KEY"))
            .ok_or(ClientError::MissingApiKey)?;
        let tenant_id = config
            .tenant_id
            .clone()
            .or_else(|| env_var("LASTMILE_TENANT_ID"))
            .ok_or(ClientError::MissingTenantId)?;
        let base_url = config
            .base_url
            .clone()
            .or_else(|| env_var("LASTMILE_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            tenant_id,
            raise_api_errors: config.raise_api_errors,
            transport: Box::new(UreqTransport::new()),
        })
    }

    /// Swap the transport, letting callers own the I/O layer.
    #[must_use]
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Dispatch one operation over the transport.
    pub fn call(&self, operation: Operation, args: &CallArgs) -> Result<Response> {
        let request = self.request_for(operation, args)?;
        debug!(operation = %operation, url = %request.url, "executing request");
        let response = self.transport.execute(request)?;
        let body = if response.body.trim().is_empty() {
            "{}".to_string()
        } else {
            response.body
        };
        check_api_error(Response::parse(body, response.status)?, self.raise_api_errors)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.base_url, path)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("x-api-key".to_string(), self.api_key.clone()),
            ("x-tenant-id".to_string(), self.tenant_id.clone()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        }
    }

    /// One row per operation: method, route, and whether the args travel as
    /// a JSON body.
    fn request_for(&self, operation: Operation, args: &CallArgs) -> Result<HttpRequest> {
        use Operation::*;
        let body = || Some(args.body().to_string());
        let request = match operation {
            GetRates => self.request(HttpMethod::Post, "rates", body()),
            CreateOrder => self.request(HttpMethod::Post, "order", body()),
            UpdateOrderStatus => {
                let id = args.require_str("orderExternalId")?;
                self.request(HttpMethod::Put, &format!("order/{id}/status"), body())
            }
            GetOrder => {
                let id = args.require_str("orderExternalId")?;
                self.request(HttpMethod::Get, &format!("order/{id}"), None)
            }
            GetOrderStatus => {
                let id = args.require_str("orderExternalId")?;
                self.request(HttpMethod::Get, &format!("order/{id}/status"), None)
            }
            EditOrder => {
                let id = args.require_str("orderExternalId")?;
                self.request(HttpMethod::Put, &format!("order/{id}"), body())
            }
            RetryOrder => {
                let id = args.require_str("orderExternalId")?;
                self.request(HttpMethod::Post, &format!("order/{id}/retry"), None)
            }
            CancelOrder => {
                let id = args.require_str("orderExternalId")?;
                self.request(HttpMethod::Delete, &format!("order/{id}"), None)
            }
            ListOrders => self.request(HttpMethod::Get, "orders", None),
            GetAlternateLocations => {
                let id = args.require_str("storeExternalId")?;
                self.request(HttpMethod::Get, &format!("store/{id}/alternate-locations"), None)
            }
            ListLocations => self.request(HttpMethod::Get, "store", None),
            CreateLocation => self.request(HttpMethod::Post, "store", body()),
            GetLocation => {
                let id = args.require_str("storeExternalId")?;
                self.request(HttpMethod::Get, &format!("store/{id}"), None)
            }
        };
        Ok(request)
    }
}
