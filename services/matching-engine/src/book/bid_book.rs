//! Bid (buy-side) order book
//!
//! Buy limits keyed by price in a single ordered map; best bid is the
//! highest price, so best-first traversal iterates the map backwards.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::limit::Limit;

/// Bid (buy) side of the book
///
/// Price levels sorted by price; `BTreeMap` gives O(log L) level
/// insertion/removal and in-order traversal from one structure.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, Limit>,
}

impl BidBook {
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Rest an order at `price`, creating the level on first use
    pub fn insert(&mut self, price: Price, order: Order) {
        self.levels
            .entry(price)
            .or_insert_with(|| Limit::new(price))
            .add_order(order);
    }

    /// Remove an order by id from the level at `price`
    ///
    /// Drops the level if it becomes empty. Returns the removed order.
    pub fn remove(&mut self, order_id: OrderId, price: Price) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let order = level.delete_order(order_id)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(order)
    }

    /// Highest bid price and its level volume
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_volume()))
    }

    /// Mutable access to the best (highest-priced) level
    pub(crate) fn best_level_mut(&mut self) -> Option<&mut Limit> {
        self.levels.values_mut().next_back()
    }

    /// Drop an emptied level
    pub(crate) fn remove_level(&mut self, price: Price) {
        if let Some(level) = self.levels.remove(&price) {
            debug_assert!(level.is_empty(), "removing a non-empty level");
        }
    }

    /// Sum of level volumes. O(levels).
    pub fn total_volume(&self) -> Quantity {
        self.levels
            .values()
            .fold(Quantity::zero(), |acc, level| acc + level.total_volume())
    }

    /// Every resting order, best price first, FIFO within a level
    pub fn iter_best_first(&self) -> impl Iterator<Item = (Price, &Order)> {
        self.levels
            .iter()
            .rev()
            .flat_map(|(price, level)| level.orders().map(move |o| (*price, o)))
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::UserId;
    use types::order::Side;

    fn bid(size: u64) -> Order {
        Order::new(Side::Bid, Quantity::from_u64(size), UserId::new(1))
    }

    #[test]
    fn test_best_bid_is_highest_price() {
        let mut book = BidBook::new();

        book.insert(Price::from_u64(50_000), bid(1));
        book.insert(Price::from_u64(51_000), bid(2));
        book.insert(Price::from_u64(49_000), bid(3));

        let (best_price, best_volume) = book.best_bid().unwrap();
        assert_eq!(best_price, Price::from_u64(51_000));
        assert_eq!(best_volume, Quantity::from_u64(2));
    }

    #[test]
    fn test_same_price_shares_level() {
        let mut book = BidBook::new();

        book.insert(Price::from_u64(50_000), bid(1));
        book.insert(Price::from_u64(50_000), bid(2));

        assert_eq!(book.level_count(), 1);
        assert_eq!(book.total_volume(), Quantity::from_u64(3));
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut book = BidBook::new();
        let order = bid(4);
        let order_id = order.id;
        book.insert(Price::from_u64(50_000), order);

        let removed = book.remove(order_id, Price::from_u64(50_000)).unwrap();
        assert_eq!(removed.id, order_id);
        assert!(book.is_empty());
        assert_eq!(book.total_volume(), Quantity::zero());
    }

    #[test]
    fn test_iter_best_first_orders_by_price_then_arrival() {
        let mut book = BidBook::new();
        let first = bid(1);
        let second = bid(2);
        let (first_id, second_id) = (first.id, second.id);

        book.insert(Price::from_u64(49_000), bid(3));
        book.insert(Price::from_u64(50_000), first);
        book.insert(Price::from_u64(50_000), second);

        let flattened: Vec<(Price, OrderId)> =
            book.iter_best_first().map(|(p, o)| (p, o.id)).collect();

        assert_eq!(flattened.len(), 3);
        assert_eq!(flattened[0], (Price::from_u64(50_000), first_id));
        assert_eq!(flattened[1], (Price::from_u64(50_000), second_id));
        assert_eq!(flattened[2].0, Price::from_u64(49_000));
    }
}
