//! The order entity and its fill bookkeeping

use crate::ids::{OrderId, UserId};
use crate::numeric::Quantity;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

/// A unit of trading intent
///
/// `size` is the remaining unfilled quantity and is mutated down on each
/// fill; the order is filled exactly when it reaches zero. The timestamp is
/// informational only — queue position within a price level is the real
/// time-priority tie-break.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub side: Side,
    pub size: Quantity,
    pub timestamp: i64, // Unix nanos
}

impl Order {
    /// Create a new order with the next identifier
    ///
    /// Size must be strictly positive; the API boundary validates before
    /// constructing, the engine does not re-check.
    pub fn new(side: Side, size: Quantity, user_id: UserId) -> Self {
        Self {
            id: OrderId::next(),
            user_id,
            side,
            size,
            timestamp: unix_nanos_now(),
        }
    }

    /// Decrement remaining size. Caller guarantees `amount <= size`.
    pub fn fill(&mut self, amount: Quantity) {
        debug_assert!(amount <= self.size, "fill exceeds remaining size");
        self.size = self.size - amount;
    }

    /// Check if the order is completely filled
    pub fn is_filled(&self) -> bool {
        self.size.is_zero()
    }
}

fn unix_nanos_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_order_creation() {
        let order = Order::new(Side::Bid, Quantity::from_u64(5), UserId::new(1));

        assert_eq!(order.side, Side::Bid);
        assert_eq!(order.size, Quantity::from_u64(5));
        assert!(!order.is_filled());
        assert!(order.timestamp > 0);
    }

    #[test]
    fn test_order_ids_unique() {
        let a = Order::new(Side::Bid, Quantity::from_u64(1), UserId::new(1));
        let b = Order::new(Side::Bid, Quantity::from_u64(1), UserId::new(1));
        assert!(b.id.as_u64() > a.id.as_u64());
    }

    #[test]
    fn test_order_fill() {
        let mut order = Order::new(Side::Ask, Quantity::from_u64(10), UserId::new(1));

        order.fill(Quantity::from_u64(4));
        assert_eq!(order.size, Quantity::from_u64(6));
        assert!(!order.is_filled());

        order.fill(Quantity::from_u64(6));
        assert!(order.size.is_zero());
        assert!(order.is_filled());
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Bid).unwrap(), "\"BID\"");
        assert_eq!(serde_json::to_string(&Side::Ask).unwrap(), "\"ASK\"");
    }
}
