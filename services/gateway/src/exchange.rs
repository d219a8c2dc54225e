//! The market registry
//!
//! One orderbook per supported market, created at startup — an explicit
//! owned mapping, no global state. Every book operation runs under that
//! book's lock for its full duration; settlement happens strictly after
//! the lock is released.

use std::collections::HashMap;
use std::sync::Arc;

use matching_engine::{BookSnapshot, Orderbook};
use parking_lot::Mutex;
use thiserror::Error;
use types::errors::{EngineError, OrderError};
use types::ids::{MarketId, OrderId, UserId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Match;

use crate::settlement::{Settle, SettlementError};

/// Errors surfaced by exchange operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("settlement failed: {0}")]
    Settlement(#[from] SettlementError),
}

/// Result of a market order
///
/// Carries fill accounting alongside the matches: the engine drops any
/// unfilled residual silently, so this is where a partial fill becomes
/// visible to callers.
#[derive(Debug)]
pub struct MarketOrderOutcome {
    pub matches: Vec<Match>,
    pub size_requested: Quantity,
    pub size_filled: Quantity,
}

/// Markets and their orderbooks
pub struct Exchange {
    books: HashMap<MarketId, Mutex<Orderbook>>,
    settler: Arc<dyn Settle>,
}

impl Exchange {
    /// Build the registry with the supported markets
    pub fn new(markets: impl IntoIterator<Item = MarketId>, settler: Arc<dyn Settle>) -> Self {
        let books = markets
            .into_iter()
            .map(|market| (market, Mutex::new(Orderbook::new())))
            .collect();
        Self { books, settler }
    }

    fn book(&self, market: &MarketId) -> Result<&Mutex<Orderbook>, EngineError> {
        self.books.get(market).ok_or_else(|| EngineError::UnknownMarket {
            symbol: market.to_string(),
        })
    }

    /// Rest a limit order; returns its id as the cancellation handle
    pub fn place_limit_order(
        &self,
        market: &MarketId,
        side: Side,
        price: Price,
        size: Quantity,
        user_id: UserId,
    ) -> Result<OrderId, ExchangeError> {
        let order = Order::new(side, size, user_id);
        let order_id = self.book(market)?.lock().place_limit_order(price, order);

        tracing::info!(%market, %order_id, ?side, %price, %size, "limit order resting");
        Ok(order_id)
    }

    /// Sweep the book with a market order, then settle the matches
    pub fn place_market_order(
        &self,
        market: &MarketId,
        side: Side,
        size: Quantity,
        user_id: UserId,
    ) -> Result<MarketOrderOutcome, ExchangeError> {
        let mut order = Order::new(side, size, user_id);
        let size_requested = order.size;

        // Critical section covers the sweep only; the settler must never
        // run under the book lock.
        let matches = self.book(market)?.lock().place_market_order(&mut order);

        let size_filled = size_requested - order.size;
        tracing::info!(
            %market,
            order_id = %order.id,
            ?side,
            %size_filled,
            matches = matches.len(),
            "market order swept"
        );

        self.settler.settle(&matches)?;

        Ok(MarketOrderOutcome {
            matches,
            size_requested,
            size_filled,
        })
    }

    /// Cancel a resting order by id
    pub fn cancel_order(&self, order_id: OrderId) -> Result<(), ExchangeError> {
        // Order ids are process-unique, so at most one book knows the id.
        for book in self.books.values() {
            if let Ok(order) = book.lock().cancel_order(order_id) {
                tracing::info!(%order_id, remaining = %order.size, "order canceled");
                return Ok(());
            }
        }
        Err(OrderError::NotFound { order_id }.into())
    }

    /// Consistent snapshot of a market's book, taken under its lock
    pub fn book_snapshot(&self, market: &MarketId) -> Result<BookSnapshot, ExchangeError> {
        Ok(self.book(market)?.lock().snapshot())
    }
}
