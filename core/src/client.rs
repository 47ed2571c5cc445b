//! Client construction and the shared operation surface.
//!
//! # Design
//! `Client::build` mirrors how the SDK is handed out: a `test` flag selects
//! the in-process mock, everything else configures the production client.
//! Both variants dispatch through a single `call(operation, args)` entry
//! point; the named operation methods are one-line stamps over it.

use serde_json::{Map, Value};

use crate::error::{ApiErrorKind, ClientError, Result};
use crate::mock::MockClient;
use crate::operation::{Operation, Outcome};
use crate::production::ProductionClient;
use crate::response::Response;

/// Construction options for [`Client::build`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Build the in-process mock instead of the production client.
    pub test: bool,
    /// Raise typed API errors instead of returning error envelopes.
    pub raise_api_errors: bool,
    /// Fixture family used by the mock when no stub is registered.
    pub default_outcome: Outcome,
    /// API key; falls back to `LASTMILE_API_KEY`.
    pub api_key: Option<String>,
    /// Tenant id; falls back to `LASTMILE_TENANT_ID`.
    pub tenant_id: Option<String>,
    /// Base URL; falls back to `LASTMILE_BASE_URL`, then the public
    /// endpoint.
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test: false,
            raise_api_errors: true,
            default_outcome: Outcome::Success,
            api_key: None,
            tenant_id: None,
            base_url: None,
        }
    }
}

/// Arguments for one operation call.
///
/// A builder-style bag: the mock reads `session` (always required) and
/// `orderExternalId`; the production client reads path ids from it and
/// sends the parameters as the JSON body on write operations.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    session: Option<String>,
    params: Map<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session token. The mock requires it even though it performs no I/O,
    /// to catch integration mistakes before they reach production code.
    #[must_use]
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Add one named parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sugar for the `orderExternalId` parameter.
    #[must_use]
    pub fn with_order_external_id(mut self, id: impl Into<String>) -> Self {
        self.with_param("orderExternalId", id.into())
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub(crate) fn require_str(&self, key: &'static str) -> Result<&str> {
        self.param(key)
            .and_then(Value::as_str)
            .ok_or(ClientError::MissingParam(key))
    }

    /// The parameters as a JSON body.
    pub(crate) fn body(&self) -> Value {
        Value::Object(self.params.clone())
    }
}

/// A delivery API client: the in-process mock or the production HTTP
/// client, behind one operation surface.
#[derive(Debug)]
pub enum Client {
    Mock(MockClient),
    Production(ProductionClient),
}

impl Client {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Credential validation for the production client; the mock always
    /// constructs.
    pub fn build(config: Config) -> Result<Client> {
        if config.test {
            Ok(Client::Mock(
                MockClient::new()
                    .with_raise_api_errors(config.raise_api_errors)
                    .with_default_outcome(config.default_outcome),
            ))
        } else {
            Ok(Client::Production(ProductionClient::new(&config)?))
        }
    }

    /// Dispatch one operation.
    pub fn call(&self, operation: Operation, args: &CallArgs) -> Result<Response> {
        match self {
            Client::Mock(mock) => mock.call(operation, args),
            Client::Production(production) => production.call(operation, args),
        }
    }

    /// Dispatch by operation name. Unrecognized names have no stub or
    /// fixture to answer with.
    pub fn call_named(&self, name: &str, args: &CallArgs) -> Result<Response> {
        let operation = Operation::parse(name).ok_or_else(|| ClientError::NoStub(name.to_string()))?;
        self.call(operation, args)
    }

    pub fn get_rates(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::GetRates, args)
    }

    pub fn create_order(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::CreateOrder, args)
    }

    pub fn update_order_status(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::UpdateOrderStatus, args)
    }

    pub fn get_order(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::GetOrder, args)
    }

    pub fn get_order_status(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::GetOrderStatus, args)
    }

    pub fn edit_order(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::EditOrder, args)
    }

    pub fn retry_order(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::RetryOrder, args)
    }

    pub fn cancel_order(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::CancelOrder, args)
    }

    pub fn list_orders(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::ListOrders, args)
    }

    pub fn get_alternate_locations(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::GetAlternateLocations, args)
    }

    pub fn list_locations(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::ListLocations, args)
    }

    pub fn create_location(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::CreateLocation, args)
    }

    pub fn get_location(&self, args: &CallArgs) -> Result<Response> {
        self.call(Operation::GetLocation, args)
    }
}

impl From<MockClient> for Client {
    fn from(mock: MockClient) -> Self {
        Client::Mock(mock)
    }
}

impl From<ProductionClient> for Client {
    fn from(production: ProductionClient) -> Self {
        Client::Production(production)
    }
}

/// Apply the raise-or-return policy to a classified envelope.
///
/// Error envelopes turn into the typed error declared by the payload's
/// `type` field when raising is enabled; otherwise the envelope is handed
/// back for the caller to classify.
pub(crate) fn check_api_error(response: Response, raise_api_errors: bool) -> Result<Response> {
    if !raise_api_errors || response.is_success() {
        return Ok(response);
    }
    let declared = response.payload().get("type")?;
    let declared = declared
        .as_str()
        .ok_or_else(|| ClientError::UnknownErrorType(declared.as_value().to_string()))?;
    let kind = ApiErrorKind::from_type(declared)
        .ok_or_else(|| ClientError::UnknownErrorType(declared.to_string()))?;
    let message = response.payload().get("message")?;
    Err(ClientError::Api {
        kind,
        message: message.as_str().unwrap_or_default().to_string(),
    })
}
