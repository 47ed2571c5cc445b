//! Packaged fixture documents: one canonical response per operation and
//! outcome.
//!
//! Fixtures live under `fixtures/<resource>/<operation>/<code>-<slug>.json`
//! relative to this crate, one complete, realistic response body per
//! `(operation, outcome)` pair. A missing or unparseable file is a
//! packaging defect and propagates as a configuration error — it is never
//! recovered from.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::operation::{Operation, Outcome};

fn relative(operation: Operation, outcome: Outcome) -> &'static str {
    use Operation::*;
    match outcome {
        Outcome::Success => match operation {
            GetRates => "rates/get_rates/200-result",
            CreateOrder => "order/create_order/201-result",
            UpdateOrderStatus => "order/update_order_status/200-result",
            GetOrder => "order/get_order/200-result",
            GetOrderStatus => "order/get_order_status/200-result",
            EditOrder => "order/edit_order/200-successful-edit-response",
            RetryOrder => "order/retry_order/201-result",
            CancelOrder => "order/cancel_order/200-successfully-cancel-an-order",
            ListOrders => "order/list_orders/200-default-response",
            GetAlternateLocations => "order/get_alternate_locations/200-result",
            ListLocations => "pickup_location/list_locations/200-result",
            CreateLocation => {
                "pickup_location/create_location/201-response-for-required-fields-only-request"
            }
            GetLocation => "pickup_location/get_location/200-result",
        },
        Outcome::Failure => match operation {
            GetRates => "rates/get_rates/400-invalid-data",
            CreateOrder => "order/create_order/400-invalid-data",
            UpdateOrderStatus => "order/update_order_status/400-invalid-data",
            GetOrder => "order/get_order/404-order-not-found",
            GetOrderStatus => "order/get_order_status/404-order-not-found",
            EditOrder => "order/edit_order/409-order-already-dispatched",
            RetryOrder => "order/retry_order/409-order-not-failed",
            CancelOrder => "order/cancel_order/409-order-already-cancelled",
            ListOrders => "order/list_orders/500-internal-error",
            GetAlternateLocations => "order/get_alternate_locations/404-store-not-found",
            ListLocations => "pickup_location/list_locations/500-internal-error",
            CreateLocation => "pickup_location/create_location/400-invalid-data",
            GetLocation => "pickup_location/get_location/404-store-not-found",
        },
    }
}

/// Absolute path of the canonical fixture for `(operation, outcome)`.
pub fn find_path(operation: Operation, outcome: Outcome) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(format!("{}.json", relative(operation, outcome)))
}

/// Read and parse a fixture document. No caching; every call reads the
/// file.
pub fn load(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "loading fixture");
    let text = std::fs::read_to_string(path).map_err(|source| ClientError::FixtureMissing {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ClientError::FixtureInvalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the canonical document for `(operation, outcome)`.
pub fn load_default(operation: Operation, outcome: Outcome) -> Result<Value> {
    load(&find_path(operation, outcome))
}
