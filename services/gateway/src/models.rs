//! Wire types for the HTTP API
//!
//! Raw decimals are validated into `Price`/`Quantity` at the handler
//! boundary; the matching core never re-validates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Match;

/// Order kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderKind {
    /// Rests in the book at a stated price
    Limit,
    /// Sweeps available liquidity immediately, never rests
    Market,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub user_id: u64,
    pub market: String,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub side: Side,
    pub size: Decimal,
    /// Required for LIMIT, ignored for MARKET
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// One fill, seen from the taker's side: the counterparty's resting order
#[derive(Debug, Clone, Serialize)]
pub struct MatchedOrder {
    pub order_id: OrderId,
    pub price: Price,
    pub size_filled: Quantity,
}

impl MatchedOrder {
    pub fn from_match(m: &Match, taker_side: Side) -> Self {
        Self {
            order_id: m.counterparty_order_id(taker_side),
            price: m.price,
            size_filled: m.size_filled,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PlaceOrderResponse {
    Limit {
        order_id: OrderId,
    },
    /// `size_filled` is the total across matches; anything short of the
    /// requested size was dropped, not rested.
    Market {
        matches: Vec<MatchedOrder>,
        size_filled: Quantity,
    },
}
