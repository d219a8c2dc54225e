//! Price level with FIFO queue
//!
//! A limit holds every resting order at one price on one side of the book.
//! Arrival order is time priority; the aggregate volume is maintained
//! incrementally so per-operation cost tracks the change, not the queue
//! length.

use std::collections::VecDeque;
use types::ids::{OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::Order;

/// A price level containing orders at a specific price
///
/// Invariant: `total_volume` equals the sum of `size` over the queued
/// orders at all times.
#[derive(Debug, Clone)]
pub struct Limit {
    price: Price,
    /// Queue of resting orders (FIFO order = time priority)
    orders: VecDeque<Order>,
    /// Total remaining volume at this level
    total_volume: Quantity,
}

/// Outcome of filling the front order of a level
#[derive(Debug, Clone, Copy)]
pub struct FrontFill {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub size_filled: Quantity,
    /// The front order was fully consumed and has left the queue
    pub exhausted: bool,
}

impl Limit {
    /// Create a new empty price level
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_volume: Quantity::zero(),
        }
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Append an order at the back of the queue. O(1).
    pub fn add_order(&mut self, order: Order) {
        self.total_volume = self.total_volume + order.size;
        self.orders.push_back(order);
    }

    /// Remove an order from the queue by identity
    ///
    /// Scans for the matching id; FIFO order of the remaining orders is
    /// preserved. Returns the removed order, or None if not present.
    pub fn delete_order(&mut self, order_id: OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|o| o.id == order_id)?;
        let order = self.orders.remove(position)?;
        self.total_volume = self.total_volume - order.size;
        Some(order)
    }

    /// Fill the front order by up to `want`
    ///
    /// Mutates the order and the level volume in the same step. A fully
    /// consumed order is popped from the queue; the caller is responsible
    /// for dropping it from the flat index. Returns None on an empty queue.
    pub fn fill_front(&mut self, want: Quantity) -> Option<FrontFill> {
        let order = self.orders.front_mut()?;
        let size_filled = want.min(order.size);

        order.fill(size_filled);
        let fill = FrontFill {
            order_id: order.id,
            user_id: order.user_id,
            size_filled,
            exhausted: order.is_filled(),
        };

        self.total_volume = self.total_volume - size_filled;
        if fill.exhausted {
            self.orders.pop_front();
        }
        Some(fill)
    }

    /// Cached aggregate volume. O(1).
    pub fn total_volume(&self) -> Quantity {
        self.total_volume
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Resting orders in time-priority order
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
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
    fn test_add_order_accumulates_volume() {
        let mut limit = Limit::new(Price::from_u64(10_000));

        limit.add_order(bid(5));
        limit.add_order(bid(8));
        limit.add_order(bid(10));

        assert_eq!(limit.order_count(), 3);
        assert_eq!(limit.total_volume(), Quantity::from_u64(23));
    }

    #[test]
    fn test_delete_order_preserves_fifo() {
        let mut limit = Limit::new(Price::from_u64(10_000));
        let a = bid(5);
        let b = bid(8);
        let c = bid(10);
        let (id_a, id_b, id_c) = (a.id, b.id, c.id);

        limit.add_order(a);
        limit.add_order(b);
        limit.add_order(c);

        let removed = limit.delete_order(id_b).unwrap();
        assert_eq!(removed.id, id_b);
        assert_eq!(limit.total_volume(), Quantity::from_u64(15));

        let remaining: Vec<OrderId> = limit.orders().map(|o| o.id).collect();
        assert_eq!(remaining, vec![id_a, id_c]);
    }

    #[test]
    fn test_delete_unknown_order() {
        let mut limit = Limit::new(Price::from_u64(10_000));
        limit.add_order(bid(5));

        assert!(limit.delete_order(OrderId::from_u64(0)).is_none());
        assert_eq!(limit.total_volume(), Quantity::from_u64(5));
    }

    #[test]
    fn test_fill_front_partial() {
        let mut limit = Limit::new(Price::from_u64(10_000));
        let order = bid(20);
        let order_id = order.id;
        limit.add_order(order);

        let fill = limit.fill_front(Quantity::from_u64(8)).unwrap();
        assert_eq!(fill.order_id, order_id);
        assert_eq!(fill.size_filled, Quantity::from_u64(8));
        assert!(!fill.exhausted);

        assert_eq!(limit.order_count(), 1);
        assert_eq!(limit.total_volume(), Quantity::from_u64(12));
    }

    #[test]
    fn test_fill_front_exhausts_order() {
        let mut limit = Limit::new(Price::from_u64(10_000));
        let first = bid(5);
        let second = bid(7);
        let second_id = second.id;
        limit.add_order(first);
        limit.add_order(second);

        let fill = limit.fill_front(Quantity::from_u64(9)).unwrap();
        assert_eq!(fill.size_filled, Quantity::from_u64(5));
        assert!(fill.exhausted);

        // Front order left the queue; next in line is now at the front
        assert_eq!(limit.order_count(), 1);
        assert_eq!(limit.orders().next().unwrap().id, second_id);
        assert_eq!(limit.total_volume(), Quantity::from_u64(7));
    }

    #[test]
    fn test_fill_front_empty_queue() {
        let mut limit = Limit::new(Price::from_u64(10_000));
        assert!(limit.fill_front(Quantity::from_u64(1)).is_none());
    }
}
