//! The match record produced by the engine

use crate::ids::{OrderId, UserId};
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One fill event between a bid and an ask
///
/// The bid/ask slots are positional: whichever of the incoming and resting
/// orders is the buy side fills the bid fields, regardless of which one was
/// incoming. User ids ride along so the settlement collaborator needs no
/// separate lookup. The execution price is the resting limit's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub bid_order_id: OrderId,
    pub ask_order_id: OrderId,
    pub bid_user_id: UserId,
    pub ask_user_id: UserId,
    pub price: Price,
    pub size_filled: Quantity,
}

impl Match {
    /// The resting counterparty's order id, from the taker's perspective
    pub fn counterparty_order_id(&self, taker_side: Side) -> OrderId {
        match taker_side {
            Side::Bid => self.ask_order_id,
            Side::Ask => self.bid_order_id,
        }
    }

    /// Traded value (price × size filled)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.size_filled.as_decimal()
    }
}
