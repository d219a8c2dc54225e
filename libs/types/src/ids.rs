//! Unique identifier types for exchange entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide order identifier counter. Starts at 1 so that 0 can never
/// collide with a live order in hand-written fixtures.
static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for an order
///
/// Monotonically increasing within the process, assigned from an atomic
/// counter at order creation. Used as the external handle for cancellation
/// and match attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Allocate the next identifier
    pub fn next() -> Self {
        Self(NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Create from a raw value (wire input, tests)
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a user (order owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Market identifier (asset symbol, e.g. "ETH")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Get the symbol string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MarketId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_monotonic() {
        let id1 = OrderId::next();
        let id2 = OrderId::next();
        assert!(id2.as_u64() > id1.as_u64(), "OrderIds should increase");
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::from_u64(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_user_id_display() {
        let user = UserId::new(7);
        assert_eq!(user.to_string(), "7");
    }

    #[test]
    fn test_market_id_creation() {
        let market = MarketId::new("ETH");
        assert_eq!(market.as_str(), "ETH");
        assert_eq!(MarketId::from("ETH"), market);
    }

    #[test]
    fn test_market_id_serialization() {
        let market = MarketId::new("ETH");
        let json = serde_json::to_string(&market).unwrap();
        assert_eq!(json, "\"ETH\"");

        let deserialized: MarketId = serde_json::from_str(&json).unwrap();
        assert_eq!(market, deserialized);
    }
}
