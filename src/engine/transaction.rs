//! Proposed transactions and lifecycle events
//!
//! A transaction is a proposed external call awaiting owner confirmations.
//! It is identified by its position in the wallet's append-only log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed external call held in the wallet's transaction log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Destination address to invoke
    pub target: String,
    /// Native-currency amount sent alongside the call (may be zero)
    pub value: u64,
    /// Opaque call payload, forwarded to the executor untouched
    pub data: Vec<u8>,
    /// Set exactly once, never cleared
    pub executed: bool,
    /// Count of distinct owner confirmations
    pub confirmations: usize,
    /// Owner who submitted the proposal
    pub submitted_by: String,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new pending transaction with zero confirmations
    pub fn new(submitted_by: String, target: String, value: u64, data: Vec<u8>) -> Self {
        Self {
            target,
            value,
            data,
            executed: false,
            confirmations: 0,
            submitted_by,
            submitted_at: Utc::now(),
        }
    }

    /// Whether the transaction has reached the given confirmation threshold
    pub fn is_executable(&self, required: usize) -> bool {
        !self.executed && self.confirmations >= required
    }
}

/// Emitted when an owner submits a new transaction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitEvent {
    pub index: usize,
    pub owner: String,
    pub target: String,
    pub value: u64,
    pub data: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

/// Emitted when an owner confirms a transaction
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmEvent {
    pub index: usize,
    pub owner: String,
    /// Confirmation count after this confirmation
    pub confirmations: usize,
    pub timestamp: DateTime<Utc>,
}

/// Emitted when a transaction is successfully executed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecuteEvent {
    pub index: usize,
    pub owner: String,
    pub timestamp: DateTime<Utc>,
}

/// A lifecycle event recorded by the wallet, in occurrence order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum WalletEvent {
    Submit(SubmitEvent),
    Confirm(ConfirmEvent),
    Execute(ExecuteEvent),
}
