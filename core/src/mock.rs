//! In-process mock client: stub registry and dispatch engine.
//!
//! # Design
//! Each instance owns its own registry. `stub` merges partial payloads onto
//! the packaged fixtures at registration time, so dispatch is a plain map
//! lookup followed by envelope classification. Calls never touch the
//! network; the `session` argument is still required so a missing token
//! fails in tests, not in production.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::client::{check_api_error, CallArgs};
use crate::error::{ClientError, Result};
use crate::fixtures;
use crate::merge;
use crate::operation::{Operation, Outcome};
use crate::response::{RawPayload, Response};

/// Mock client resolving every call against stubs and packaged fixtures.
#[derive(Debug, Clone)]
pub struct MockClient {
    raise_api_errors: bool,
    default_outcome: Outcome,
    stubs: BTreeMap<Operation, Value>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self {
            raise_api_errors: true,
            default_outcome: Outcome::Success,
            stubs: BTreeMap::new(),
        }
    }
}

impl MockClient {
    /// A mock client that raises API errors and answers unstubbed calls
    /// with success fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return error envelopes instead of raising typed API errors.
    #[must_use]
    pub fn with_raise_api_errors(mut self, raise_api_errors: bool) -> Self {
        self.raise_api_errors = raise_api_errors;
        self
    }

    /// Fixture family used when an operation has no registered stub.
    #[must_use]
    pub fn with_default_outcome(mut self, outcome: Outcome) -> Self {
        self.default_outcome = outcome;
        self
    }

    /// Registered stub documents, keyed by operation.
    pub fn stubs(&self) -> &BTreeMap<Operation, Value> {
        &self.stubs
    }

    /// Register success stubs. See [`stub_with`](Self::stub_with).
    pub fn stub<I, P>(self, stubs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Operation, P)>,
        P: Into<RawPayload>,
    {
        self.stub_with(Outcome::Success, stubs)
    }

    /// Register stubs against the `outcome` fixture family.
    ///
    /// Each payload may be partial: text parses first, then the value is
    /// deep-merged onto the canonical fixture for `(operation, outcome)`.
    /// Registering the same operation again replaces the earlier stub.
    /// Consumes and returns `self` so registrations chain.
    pub fn stub_with<I, P>(mut self, outcome: Outcome, stubs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Operation, P)>,
        P: Into<RawPayload>,
    {
        for (operation, payload) in stubs {
            let value = payload
                .into()
                .into_json()
                .map_err(|source| ClientError::StubInvalid { operation, source })?;
            let merged = merge::merge_fixture(value, operation, outcome)?;
            self.stubs.insert(operation, merged);
        }
        Ok(self)
    }

    /// Dispatch one operation call.
    ///
    /// Resolution order: registered stub, else the default-outcome fixture.
    pub fn call(&self, operation: Operation, args: &CallArgs) -> Result<Response> {
        if args.session().is_none() {
            return Err(ClientError::SessionMissing);
        }

        let mut document = match self.stubs.get(&operation) {
            Some(stubbed) => {
                debug!(operation = %operation, "resolving from stub registry");
                stubbed.clone()
            }
            None => {
                debug!(
                    operation = %operation,
                    outcome = self.default_outcome.name(),
                    "resolving from default fixture"
                );
                fixtures::load_default(operation, self.default_outcome)?
            }
        };

        // The live API echoes the caller-supplied orderExternalId on these
        // two operations; the mock reproduces that before the envelope is
        // built, so the envelope stays immutable.
        if matches!(operation, Operation::CreateOrder | Operation::CancelOrder) {
            if let (Some(id), Value::Object(map)) = (args.param("orderExternalId"), &mut document) {
                map.insert("orderExternalId".to_string(), id.clone());
            }
        }

        check_api_error(Response::from_document(document), self.raise_api_errors)
    }

    /// Dispatch by operation name. Unrecognized names have no stub or
    /// fixture to answer with.
    pub fn call_named(&self, name: &str, args: &CallArgs) -> Result<Response> {
        let operation = Operation::parse(name).ok_or_else(|| ClientError::NoStub(name.to_string()))?;
        self.call(operation, args)
    }
}
