//! The order book: placement, matching, cancellation
//!
//! Two per-side books plus a flat order index, mutated together so they can
//! never disagree between operations. Matching is price-time priority:
//! best price first, FIFO within a price level.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use types::errors::OrderError;
use types::ids::{OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Match;

use crate::book::{AskBook, BidBook};

/// Where a resting order lives
#[derive(Debug, Clone, Copy)]
struct Locator {
    side: Side,
    price: Price,
}

/// Order book for a single market
#[derive(Debug, Clone, Default)]
pub struct Orderbook {
    bids: BidBook,
    asks: AskBook,
    /// Flat index from order id to its level, for O(1) cancellation lookup
    /// regardless of book depth. Holds limit orders only; market orders
    /// never rest and are never registered.
    orders: HashMap<OrderId, Locator>,
}

impl Orderbook {
    pub fn new() -> Self {
        Self {
            bids: BidBook::new(),
            asks: AskBook::new(),
            orders: HashMap::new(),
        }
    }

    /// Rest a limit order at `price` on the order's side
    ///
    /// Performs no matching against the opposite side: a limit order always
    /// rests at its stated price, even when a crossing price exists. Returns
    /// the order's identifier as the caller's cancellation handle.
    pub fn place_limit_order(&mut self, price: Price, order: Order) -> OrderId {
        let order_id = order.id;
        self.orders.insert(
            order_id,
            Locator {
                side: order.side,
                price,
            },
        );
        match order.side {
            Side::Bid => self.bids.insert(price, order),
            Side::Ask => self.asks.insert(price, order),
        }
        order_id
    }

    /// Sweep the opposite side with a market order
    ///
    /// Matches from the best price outward, oldest order first within each
    /// level, until the incoming order is filled or liquidity runs out. Any
    /// residual size is dropped — a market order never rests — so callers
    /// must inspect `order.size` afterwards to report a partial fill.
    /// Returns the matches in the order they were generated.
    pub fn place_market_order(&mut self, order: &mut Order) -> Vec<Match> {
        match order.side {
            Side::Bid => Self::sweep_asks(&mut self.asks, &mut self.orders, order),
            Side::Ask => Self::sweep_bids(&mut self.bids, &mut self.orders, order),
        }
    }

    /// Match an incoming bid against the ask side (lowest price first)
    fn sweep_asks(
        asks: &mut AskBook,
        orders: &mut HashMap<OrderId, Locator>,
        incoming: &mut Order,
    ) -> Vec<Match> {
        let mut matches = Vec::new();

        while !incoming.is_filled() {
            let Some(level) = asks.best_level_mut() else {
                break;
            };
            let price = level.price();

            while !incoming.is_filled() {
                let Some(fill) = level.fill_front(incoming.size) else {
                    break;
                };
                incoming.fill(fill.size_filled);
                if fill.exhausted {
                    orders.remove(&fill.order_id);
                }
                matches.push(Match {
                    bid_order_id: incoming.id,
                    ask_order_id: fill.order_id,
                    bid_user_id: incoming.user_id,
                    ask_user_id: fill.user_id,
                    price,
                    size_filled: fill.size_filled,
                });
            }

            if level.is_empty() {
                asks.remove_level(price);
            }
        }

        matches
    }

    /// Match an incoming ask against the bid side (highest price first)
    fn sweep_bids(
        bids: &mut BidBook,
        orders: &mut HashMap<OrderId, Locator>,
        incoming: &mut Order,
    ) -> Vec<Match> {
        let mut matches = Vec::new();

        while !incoming.is_filled() {
            let Some(level) = bids.best_level_mut() else {
                break;
            };
            let price = level.price();

            while !incoming.is_filled() {
                let Some(fill) = level.fill_front(incoming.size) else {
                    break;
                };
                incoming.fill(fill.size_filled);
                if fill.exhausted {
                    orders.remove(&fill.order_id);
                }
                matches.push(Match {
                    bid_order_id: fill.order_id,
                    ask_order_id: incoming.id,
                    bid_user_id: fill.user_id,
                    ask_user_id: incoming.user_id,
                    price,
                    size_filled: fill.size_filled,
                });
            }

            if level.is_empty() {
                bids.remove_level(price);
            }
        }

        matches
    }

    /// Cancel a resting order by id
    ///
    /// Removes it from its level (dropping the level if now empty) and from
    /// the flat index. Returns the removed order, with whatever size was
    /// still unfilled. Unknown ids are a recoverable error, never a panic.
    pub fn cancel_order(&mut self, order_id: OrderId) -> Result<Order, OrderError> {
        let Some(locator) = self.orders.remove(&order_id) else {
            return Err(OrderError::NotFound { order_id });
        };

        let removed = match locator.side {
            Side::Bid => self.bids.remove(order_id, locator.price),
            Side::Ask => self.asks.remove(order_id, locator.price),
        };
        debug_assert!(removed.is_some(), "order index and book out of sync");
        removed.ok_or(OrderError::NotFound { order_id })
    }

    /// Whether an order id currently rests in the book
    pub fn contains_order(&self, order_id: OrderId) -> bool {
        self.orders.contains_key(&order_id)
    }

    /// Number of resting orders across both sides
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Total resting buy volume. O(bid levels); deliberately uncached.
    pub fn bid_total_volume(&self) -> Quantity {
        self.bids.total_volume()
    }

    /// Total resting sell volume. O(ask levels); deliberately uncached.
    pub fn ask_total_volume(&self) -> Quantity {
        self.asks.total_volume()
    }

    /// Highest bid price and its level volume
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best_bid()
    }

    /// Lowest ask price and its level volume
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best_ask()
    }

    pub fn bid_level_count(&self) -> usize {
        self.bids.level_count()
    }

    pub fn ask_level_count(&self) -> usize {
        self.asks.level_count()
    }

    /// Flattened view of every resting order, best price first per side
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            total_bid_volume: self.bid_total_volume(),
            total_ask_volume: self.ask_total_volume(),
            bids: self.bids.iter_best_first().map(BookEntry::from_resting).collect(),
            asks: self.asks.iter_best_first().map(BookEntry::from_resting).collect(),
        }
    }
}

/// One resting order in a book snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    pub order_id: OrderId,
    pub price: Price,
    pub size: Quantity,
    pub side: Side,
    pub user_id: UserId,
    pub timestamp: i64,
}

impl BookEntry {
    fn from_resting((price, order): (Price, &Order)) -> Self {
        Self {
            order_id: order.id,
            price,
            size: order.size,
            side: order.side,
            user_id: order.user_id,
            timestamp: order.timestamp,
        }
    }
}

/// Book snapshot for market data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub total_bid_volume: Quantity,
    pub total_ask_volume: Quantity,
    pub bids: Vec<BookEntry>,
    pub asks: Vec<BookEntry>,
}
