//! Order book infrastructure module
//!
//! Contains the price level (limit) and the per-side book implementations.

pub mod ask_book;
pub mod bid_book;
pub mod limit;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use limit::{FrontFill, Limit};
