//! Order lifecycle statuses and the rules for moving between them.
//!
//! Statuses carry a rank (Placed=1 .. Cancelled=5) that is used only to decide
//! which transitions are legal. The legal paths are
//! Placed → Dispatched → Completed → Returned, plus Cancelled from Placed or
//! Dispatched. Returned and Cancelled are terminal.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

use crate::order_actor::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Dispatched,
    Completed,
    Returned,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Placed,
        OrderStatus::Dispatched,
        OrderStatus::Completed,
        OrderStatus::Returned,
        OrderStatus::Cancelled,
    ];

    pub fn rank(self) -> u8 {
        match self {
            OrderStatus::Placed => 1,
            OrderStatus::Dispatched => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Returned => 4,
            OrderStatus::Cancelled => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Completed => "completed",
            OrderStatus::Returned => "returned",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(literal))
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// Why a requested status change was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("order status cannot move from {from} to {to}: same-or-lower rank")]
    NotForward { from: OrderStatus, to: OrderStatus },
    #[error("order cannot be completed until it is dispatched (currently {from})")]
    NotDispatched { from: OrderStatus },
    #[error("order cannot be returned until it is completed (currently {from})")]
    NotCompleted { from: OrderStatus },
    #[error("order cannot be cancelled once it is completed or returned (currently {from})")]
    AlreadyFulfilled { from: OrderStatus },
}

/// Decides whether an order in `current` may move to `requested`.
pub fn check_transition(current: OrderStatus, requested: OrderStatus) -> Result<(), TransitionError> {
    let (c, n) = (current.rank(), requested.rank());
    if n <= c {
        return Err(TransitionError::NotForward { from: current, to: requested });
    }
    match requested {
        OrderStatus::Completed if current != OrderStatus::Dispatched => {
            Err(TransitionError::NotDispatched { from: current })
        }
        OrderStatus::Returned if current != OrderStatus::Completed => {
            Err(TransitionError::NotCompleted { from: current })
        }
        OrderStatus::Cancelled if c > OrderStatus::Dispatched.rank() => {
            Err(TransitionError::AlreadyFulfilled { from: current })
        }
        _ => Ok(()),
    }
}
