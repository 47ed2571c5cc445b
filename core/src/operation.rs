//! Operation and outcome enumerations.
//!
//! The API surface is a fixed set of named operations. Dispatching through
//! an enum keeps unknown names an ordinary failure case instead of a
//! reflection fallback, and gives the fixture and route tables a closed key
//! space.

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// One named capability of the delivery API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    GetRates,
    CreateOrder,
    UpdateOrderStatus,
    GetOrder,
    GetOrderStatus,
    EditOrder,
    RetryOrder,
    CancelOrder,
    ListOrders,
    GetAlternateLocations,
    ListLocations,
    CreateLocation,
    GetLocation,
}

impl Operation {
    /// Every supported operation, in a stable order.
    pub const ALL: [Operation; 13] = [
        Operation::GetRates,
        Operation::CreateOrder,
        Operation::UpdateOrderStatus,
        Operation::GetOrder,
        Operation::GetOrderStatus,
        Operation::EditOrder,
        Operation::RetryOrder,
        Operation::CancelOrder,
        Operation::ListOrders,
        Operation::GetAlternateLocations,
        Operation::ListLocations,
        Operation::CreateLocation,
        Operation::GetLocation,
    ];

    /// The snake_case name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Operation::GetRates => "get_rates",
            Operation::CreateOrder => "create_order",
            Operation::UpdateOrderStatus => "update_order_status",
            Operation::GetOrder => "get_order",
            Operation::GetOrderStatus => "get_order_status",
            Operation::EditOrder => "edit_order",
            Operation::RetryOrder => "retry_order",
            Operation::CancelOrder => "cancel_order",
            Operation::ListOrders => "list_orders",
            Operation::GetAlternateLocations => "get_alternate_locations",
            Operation::ListLocations => "list_locations",
            Operation::CreateLocation => "create_location",
            Operation::GetLocation => "get_location",
        }
    }

    /// Parse an operation name. `None` for unrecognized names.
    pub fn parse(name: &str) -> Option<Operation> {
        Self::ALL.iter().copied().find(|operation| operation.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which fixture family a response is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Success,
    Failure,
}

impl Outcome {
    pub fn name(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

impl FromStr for Outcome {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Outcome::Success),
            "failure" => Ok(Outcome::Failure),
            other => Err(ClientError::InvalidOutcome(other.to_string())),
        }
    }
}
