//! Order matching engine
//!
//! An in-memory limit order book for a single asset: limit orders rest at
//! their stated price, market orders sweep the opposite side with strict
//! price-time priority.
//!
//! **Key invariants:**
//! - Price-time priority: best price first, FIFO within a price level
//! - Per-level volume maintained incrementally, never recomputed
//! - Empty price levels are removed the moment their last order leaves
//! - The flat order index and the per-side books always agree

pub mod book;
pub mod orderbook;

pub use orderbook::{BookEntry, BookSnapshot, Orderbook};
