//! Upstream-API simulator used by the core integration tests.
//!
//! # Design
//! Serves the packaged fixture documents on the production route table, so
//! the production client can be driven over real HTTP without the real
//! service. Fixture text is embedded at compile time rather than read
//! through the core crate; the integration tests catch any drift between
//! the two. The only stateful behavior is the create-order route, which
//! echoes a caller-supplied `orderExternalId` (or mints one) the way the
//! live API does, and rejects bodies without a `storeExternalId` so the
//! error path is drivable over HTTP.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

const GET_RATES: &str = include_str!("../../core/fixtures/rates/get_rates/200-result.json");
const CREATE_ORDER: &str = include_str!("../../core/fixtures/order/create_order/201-result.json");
const CREATE_ORDER_INVALID: &str =
    include_str!("../../core/fixtures/order/create_order/400-invalid-data.json");
const GET_ORDER: &str = include_str!("../../core/fixtures/order/get_order/200-result.json");
const ORDER_NOT_FOUND: &str =
    include_str!("../../core/fixtures/order/get_order/404-order-not-found.json");
const GET_ORDER_STATUS: &str =
    include_str!("../../core/fixtures/order/get_order_status/200-result.json");
const UPDATE_ORDER_STATUS: &str =
    include_str!("../../core/fixtures/order/update_order_status/200-result.json");
const EDIT_ORDER: &str =
    include_str!("../../core/fixtures/order/edit_order/200-successful-edit-response.json");
const RETRY_ORDER: &str = include_str!("../../core/fixtures/order/retry_order/201-result.json");
const CANCEL_ORDER: &str =
    include_str!("../../core/fixtures/order/cancel_order/200-successfully-cancel-an-order.json");
const LIST_ORDERS: &str =
    include_str!("../../core/fixtures/order/list_orders/200-default-response.json");
const ALTERNATE_LOCATIONS: &str =
    include_str!("../../core/fixtures/order/get_alternate_locations/200-result.json");
const LIST_LOCATIONS: &str =
    include_str!("../../core/fixtures/pickup_location/list_locations/200-result.json");
const CREATE_LOCATION: &str = include_str!(
    "../../core/fixtures/pickup_location/create_location/201-response-for-required-fields-only-request.json"
);
const GET_LOCATION: &str =
    include_str!("../../core/fixtures/pickup_location/get_location/200-result.json");
const STORE_NOT_FOUND: &str =
    include_str!("../../core/fixtures/pickup_location/get_location/404-store-not-found.json");

/// The order and store ids the packaged fixtures describe. Requests for
/// any other id get the 404 fixture.
const KNOWN_ORDER: &str = "ORD-100045";
const KNOWN_STORE: &str = "1362";

pub fn app() -> Router {
    Router::new()
        .route("/api/v2/rates", post(get_rates))
        .route("/api/v2/order", post(create_order))
        .route("/api/v2/orders", get(list_orders))
        .route(
            "/api/v2/order/{id}",
            get(get_order).put(edit_order).delete(cancel_order),
        )
        .route(
            "/api/v2/order/{id}/status",
            get(get_order_status).put(update_order_status),
        )
        .route("/api/v2/order/{id}/retry", post(retry_order))
        .route("/api/v2/store", get(list_locations).post(create_location))
        .route("/api/v2/store/{id}", get(get_location))
        .route(
            "/api/v2/store/{id}/alternate-locations",
            get(get_alternate_locations),
        )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn fixture(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn get_rates(Json(_body): Json<Value>) -> Response {
    fixture(StatusCode::OK, GET_RATES)
}

async fn create_order(Json(body): Json<Value>) -> Response {
    if body.get("storeExternalId").and_then(Value::as_str).is_none() {
        debug!("rejecting order creation without a storeExternalId");
        return fixture(StatusCode::BAD_REQUEST, CREATE_ORDER_INVALID);
    }
    let order_id = body
        .get("orderExternalId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("ORD-{}", Uuid::new_v4()));
    match serde_json::from_str::<Value>(CREATE_ORDER) {
        Ok(Value::Object(mut document)) => {
            document.insert("orderExternalId".to_string(), Value::String(order_id));
            (StatusCode::CREATED, Json(Value::Object(document))).into_response()
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn list_orders() -> Response {
    fixture(StatusCode::OK, LIST_ORDERS)
}

async fn get_order(Path(id): Path<String>) -> Response {
    if id == KNOWN_ORDER {
        fixture(StatusCode::OK, GET_ORDER)
    } else {
        fixture(StatusCode::NOT_FOUND, ORDER_NOT_FOUND)
    }
}

async fn edit_order(Path(_id): Path<String>, Json(_body): Json<Value>) -> Response {
    fixture(StatusCode::OK, EDIT_ORDER)
}

async fn cancel_order(Path(_id): Path<String>) -> Response {
    fixture(StatusCode::OK, CANCEL_ORDER)
}

async fn get_order_status(Path(id): Path<String>) -> Response {
    if id == KNOWN_ORDER {
        fixture(StatusCode::OK, GET_ORDER_STATUS)
    } else {
        fixture(StatusCode::NOT_FOUND, ORDER_NOT_FOUND)
    }
}

async fn update_order_status(Path(_id): Path<String>, Json(_body): Json<Value>) -> Response {
    fixture(StatusCode::OK, UPDATE_ORDER_STATUS)
}

async fn retry_order(Path(_id): Path<String>) -> Response {
    fixture(StatusCode::CREATED, RETRY_ORDER)
}

async fn list_locations() -> Response {
    fixture(StatusCode::OK, LIST_LOCATIONS)
}

async fn create_location(Json(_body): Json<Value>) -> Response {
    fixture(StatusCode::CREATED, CREATE_LOCATION)
}

async fn get_location(Path(id): Path<String>) -> Response {
    if id == KNOWN_STORE {
        fixture(StatusCode::OK, GET_LOCATION)
    } else {
        fixture(StatusCode::NOT_FOUND, STORE_NOT_FOUND)
    }
}

async fn get_alternate_locations(Path(_id): Path<String>) -> Response {
    fixture(StatusCode::OK, ALTERNATE_LOCATIONS)
}
