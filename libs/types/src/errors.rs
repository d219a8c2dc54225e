//! Error taxonomy for the matching engine
//!
//! The engine raises no errors during normal matching; the only recoverable
//! condition below the API boundary is canceling an unknown order. Invalid
//! input (unknown market, bad sizes) is rejected before reaching the core.

use crate::ids::OrderId;
use thiserror::Error;

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("order not found: {order_id}")]
    NotFound { order_id: OrderId },
}

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    #[error("unknown market: {symbol}")]
    UnknownMarket { symbol: String },
}
