//! Post-match settlement
//!
//! Settlement is strictly a downstream effect of matching: the exchange
//! invokes the settler with the match list after the book lock has been
//! released, so a slow or failing transfer can never stall matching or
//! touch book state.

use std::collections::HashMap;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use thiserror::Error;
use types::ids::UserId;
use types::trade::Match;

/// Settlement collaborator invoked with the matches of one market order
pub trait Settle: Send + Sync {
    fn settle(&self, matches: &[Match]) -> Result<(), SettlementError>;
}

/// Settlement errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettlementError {
    #[error("unknown user: {user_id}")]
    UnknownUser { user_id: UserId },

    #[error("user {user_id} holds {available}, cannot transfer {required}")]
    InsufficientBalance {
        user_id: UserId,
        available: Decimal,
        required: Decimal,
    },
}

/// In-memory ledger
///
/// Moves the filled size of each match from the ask user to the bid user.
/// Accounts are created up front; settling against an unknown account is
/// an error, not an implicit account creation.
pub struct Ledger {
    balances: Mutex<HashMap<UserId, Decimal>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = (UserId, Decimal)>) -> Self {
        Self {
            balances: Mutex::new(accounts.into_iter().collect()),
        }
    }

    pub fn balance_of(&self, user_id: UserId) -> Option<Decimal> {
        self.balances.lock().get(&user_id).copied()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Settle for Ledger {
    /// Transfers are applied per match, in match order. A failure aborts
    /// the remainder of the list; transfers already applied stand, since
    /// the matches themselves are final regardless of settlement.
    fn settle(&self, matches: &[Match]) -> Result<(), SettlementError> {
        let mut balances = self.balances.lock();

        for m in matches {
            let amount = m.size_filled.as_decimal();
            let from = m.ask_user_id;
            let to = m.bid_user_id;

            let available = *balances
                .get(&from)
                .ok_or(SettlementError::UnknownUser { user_id: from })?;
            if !balances.contains_key(&to) {
                return Err(SettlementError::UnknownUser { user_id: to });
            }
            if available < amount {
                return Err(SettlementError::InsufficientBalance {
                    user_id: from,
                    available,
                    required: amount,
                });
            }

            if let Some(balance) = balances.get_mut(&from) {
                *balance -= amount;
            }
            if let Some(balance) = balances.get_mut(&to) {
                *balance += amount;
            }
            tracing::debug!(from = %from, to = %to, amount = %amount, "transfer settled");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::{Price, Quantity};

    fn transfer(from: u64, to: u64, size: u64) -> Match {
        Match {
            bid_order_id: OrderId::from_u64(1),
            ask_order_id: OrderId::from_u64(2),
            bid_user_id: UserId::new(to),
            ask_user_id: UserId::new(from),
            price: Price::from_u64(10_000),
            size_filled: Quantity::from_u64(size),
        }
    }

    #[test]
    fn test_settle_moves_balance() {
        let ledger = Ledger::with_accounts([
            (UserId::new(7), Decimal::from(100)),
            (UserId::new(8), Decimal::from(100)),
        ]);

        ledger.settle(&[transfer(8, 7, 10)]).unwrap();

        assert_eq!(ledger.balance_of(UserId::new(8)), Some(Decimal::from(90)));
        assert_eq!(ledger.balance_of(UserId::new(7)), Some(Decimal::from(110)));
    }

    #[test]
    fn test_settle_unknown_user() {
        let ledger = Ledger::with_accounts([(UserId::new(7), Decimal::from(100))]);

        let err = ledger.settle(&[transfer(9, 7, 10)]).unwrap_err();
        assert_eq!(
            err,
            SettlementError::UnknownUser {
                user_id: UserId::new(9)
            }
        );
        assert_eq!(ledger.balance_of(UserId::new(7)), Some(Decimal::from(100)));
    }

    #[test]
    fn test_settle_insufficient_balance() {
        let ledger = Ledger::with_accounts([
            (UserId::new(7), Decimal::from(100)),
            (UserId::new(8), Decimal::from(5)),
        ]);

        let err = ledger.settle(&[transfer(8, 7, 10)]).unwrap_err();
        assert!(matches!(err, SettlementError::InsufficientBalance { .. }));
    }

    #[test]
    fn test_applied_transfers_stand_on_later_failure() {
        let ledger = Ledger::with_accounts([
            (UserId::new(7), Decimal::from(100)),
            (UserId::new(8), Decimal::from(12)),
        ]);

        // First transfer fits, second overdraws
        let err = ledger.settle(&[transfer(8, 7, 10), transfer(8, 7, 10)]);
        assert!(err.is_err());

        assert_eq!(ledger.balance_of(UserId::new(8)), Some(Decimal::from(2)));
        assert_eq!(ledger.balance_of(UserId::new(7)), Some(Decimal::from(110)));
    }
}
