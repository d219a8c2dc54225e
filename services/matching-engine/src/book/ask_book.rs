//! Ask (sell-side) order book
//!
//! Sell limits keyed by price in a single ordered map; best ask is the
//! lowest price, so best-first traversal is the map's natural order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::limit::Limit;

/// Ask (sell) side of the book
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, Limit>,
}

impl AskBook {
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

    /// Lowest ask price and its level volume
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_volume()))
    }

    /// Mutable access to the best (lowest-priced) level
    pub(crate) fn best_level_mut(&mut self) -> Option<&mut Limit> {
        self.levels.values_mut().next()
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

    fn ask(size: u64) -> Order {
        Order::new(Side::Ask, Quantity::from_u64(size), UserId::new(1))
    }

    #[test]
    fn test_best_ask_is_lowest_price() {
        let mut book = AskBook::new();

        book.insert(Price::from_u64(10_000), ask(10));
        book.insert(Price::from_u64(9_000), ask(5));

        let (best_price, best_volume) = book.best_ask().unwrap();
        assert_eq!(best_price, Price::from_u64(9_000));
        assert_eq!(best_volume, Quantity::from_u64(5));
        assert_eq!(book.level_count(), 2);
    }

    #[test]
    fn test_total_volume_spans_levels() {
        let mut book = AskBook::new();

        book.insert(Price::from_u64(10_000), ask(10));
        book.insert(Price::from_u64(9_000), ask(5));

        assert_eq!(book.total_volume(), Quantity::from_u64(15));
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut book = AskBook::new();
        let keep = ask(10);
        let drop = ask(5);
        let drop_id = drop.id;

        book.insert(Price::from_u64(10_000), keep);
        book.insert(Price::from_u64(9_000), drop);

        assert!(book.remove(drop_id, Price::from_u64(9_000)).is_some());
        assert_eq!(book.level_count(), 1);
        assert_eq!(book.best_ask().unwrap().0, Price::from_u64(10_000));
    }

    #[test]
    fn test_iter_best_first_ascends_prices() {
        let mut book = AskBook::new();
        book.insert(Price::from_u64(10_000), ask(1));
        book.insert(Price::from_u64(9_000), ask(2));
        book.insert(Price::from_u64(11_000), ask(3));

        let prices: Vec<Price> = book.iter_best_first().map(|(p, _)| p).collect();
        assert_eq!(
            prices,
            vec![
                Price::from_u64(9_000),
                Price::from_u64(10_000),
                Price::from_u64(11_000)
            ]
        );
    }
}
