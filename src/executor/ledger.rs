//! In-process ledger executor
//!
//! Maintains native-currency balances per address and settles approved
//! calls by moving the call's value from the wallet's account to the
//! target. A call fails when the wallet's account cannot cover the value,
//! which makes the engine's retry-after-failure path observable in tests
//! and demos.

use crate::executor::{CallOutcome, CallRequest, Executor, ExecutorError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Executor backed by a simple balance map
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerExecutor {
    /// Account funded by deposits and debited by executed calls
    wallet_account: String,
    /// Balances by address
    balances: HashMap<String, u64>,
}

impl LedgerExecutor {
    /// Create a ledger settling calls from the given wallet account
    pub fn new(wallet_account: &str) -> Self {
        Self {
            wallet_account: wallet_account.to_string(),
            balances: HashMap::new(),
        }
    }

    /// Credit the wallet's account
    pub fn deposit(&mut self, amount: u64) {
        *self.balances.entry(self.wallet_account.clone()).or_insert(0) += amount;
        log::debug!(
            "Deposit of {} to {}, balance now {}",
            amount,
            self.wallet_account,
            self.balances[&self.wallet_account]
        );
    }

    /// Balance of any address (zero when never seen)
    pub fn balance(&self, address: &str) -> u64 {
        self.balances.get(address).copied().unwrap_or(0)
    }
}

impl Executor for LedgerExecutor {
    fn execute(&mut self, call: &CallRequest) -> Result<CallOutcome, ExecutorError> {
        let have = self.balance(&self.wallet_account);
        if have < call.value {
            return Err(ExecutorError::InsufficientFunds {
                have,
                need: call.value,
            });
        }

        *self
            .balances
            .entry(self.wallet_account.clone())
            .or_insert(0) -= call.value;
        *self.balances.entry(call.target.clone()).or_insert(0) += call.value;

        log::info!(
            "Settled call: {} -> {} value {} data {}",
            self.wallet_account,
            call.target,
            call.value,
            hex::encode(&call.data)
        );

        Ok(CallOutcome::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(target: &str, value: u64) -> CallRequest {
        CallRequest {
            target: target.to_string(),
            value,
            data: vec![],
        }
    }

    #[test]
    fn test_deposit_and_balance() {
        let mut ledger = LedgerExecutor::new("wallet");
        assert_eq!(ledger.balance("wallet"), 0);

        ledger.deposit(200);
        assert_eq!(ledger.balance("wallet"), 200);
    }

    #[test]
    fn test_execute_moves_value() {
        let mut ledger = LedgerExecutor::new("wallet");
        ledger.deposit(200);

        ledger.execute(&call("recipient", 150)).unwrap();

        assert_eq!(ledger.balance("wallet"), 50);
        assert_eq!(ledger.balance("recipient"), 150);
    }

    #[test]
    fn test_execute_insufficient_funds() {
        let mut ledger = LedgerExecutor::new("wallet");
        ledger.deposit(100);

        let result = ledger.execute(&call("recipient", 150));
        assert!(matches!(
            result,
            Err(ExecutorError::InsufficientFunds { have: 100, need: 150 })
        ));

        // Failed calls leave every balance untouched
        assert_eq!(ledger.balance("wallet"), 100);
        assert_eq!(ledger.balance("recipient"), 0);
    }

    #[test]
    fn test_zero_value_call_needs_no_funds() {
        let mut ledger = LedgerExecutor::new("wallet");

        ledger.execute(&call("recipient", 0)).unwrap();
        assert_eq!(ledger.balance("recipient"), 0);
    }
}
