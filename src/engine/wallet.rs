//! M-of-N transaction authorization engine
//!
//! A fixed set of owners collectively approve proposed external calls.
//! A call becomes executable once a quorum of distinct owner confirmations
//! is reached, and executes at most once. The wallet owns all of its state;
//! every mutation happens through `&mut self`, so the append-only log and
//! the confirmation relation are never touched concurrently.

use crate::engine::transaction::{
    ConfirmEvent, ExecuteEvent, SubmitEvent, Transaction, WalletEvent,
};
use crate::executor::{CallOutcome, CallRequest, Executor};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by wallet operations
///
/// Every rejection is all-or-nothing: a failed call leaves the wallet's
/// stored state exactly as it was.
#[derive(Error, Debug)]
pub enum MultisigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Not an owner: {0}")]
    Unauthorized(String),
    #[error("Transaction not found: index {0}")]
    NotFound(usize),
    #[error("Transaction {0} already executed")]
    AlreadyExecuted(usize),
    #[error("Transaction {index} already confirmed by {owner}")]
    AlreadyConfirmed { index: usize, owner: String },
    #[error("Insufficient confirmations: have {have}, need {need}")]
    InsufficientConfirmations { have: usize, need: usize },
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// An M-of-N multi-signature wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigWallet {
    /// Owners in construction order, immutable after construction
    owners: Vec<String>,
    /// Membership index for O(1) authorization checks
    owner_index: HashSet<String>,
    /// Distinct confirmations required before execution (M in M-of-N)
    required: usize,
    /// Append-only transaction log; position is the permanent handle
    transactions: Vec<Transaction>,
    /// (index, owner) pairs that have confirmed; pairs are never removed
    confirmed_by: HashSet<(usize, String)>,
    /// Lifecycle events in occurrence order
    events: Vec<WalletEvent>,
}

impl MultisigWallet {
    /// Create a wallet with a fixed owner set and confirmation threshold
    ///
    /// # Errors
    /// Returns [`MultisigError::InvalidConfiguration`] when `owners` is
    /// empty or contains a duplicate, or when `required` is 0 or exceeds
    /// the owner count.
    pub fn new(owners: Vec<String>, required: usize) -> Result<Self, MultisigError> {
        if owners.is_empty() {
            return Err(MultisigError::InvalidConfiguration(
                "owner set must not be empty".to_string(),
            ));
        }

        if required == 0 {
            return Err(MultisigError::InvalidConfiguration(
                "required confirmations must be at least 1".to_string(),
            ));
        }

        if required > owners.len() {
            return Err(MultisigError::InvalidConfiguration(format!(
                "required confirmations {} exceed owner count {}",
                required,
                owners.len()
            )));
        }

        let owner_index: HashSet<String> = owners.iter().cloned().collect();
        if owner_index.len() != owners.len() {
            return Err(MultisigError::InvalidConfiguration(
                "duplicate owner".to_string(),
            ));
        }

        log::info!(
            "Multisig wallet created: {}-of-{}",
            required,
            owners.len()
        );

        Ok(Self {
            owners,
            owner_index,
            required,
            transactions: Vec::new(),
            confirmed_by: HashSet::new(),
            events: Vec::new(),
        })
    }

    /// Propose a new transaction; returns its index in the log
    ///
    /// Submission does not count as the submitter's confirmation; the
    /// submitter confirms separately like any other owner.
    pub fn submit_transaction(
        &mut self,
        caller: &str,
        target: &str,
        value: u64,
        data: Vec<u8>,
    ) -> Result<usize, MultisigError> {
        self.require_owner(caller)?;

        let index = self.transactions.len();
        let tx = Transaction::new(
            caller.to_string(),
            target.to_string(),
            value,
            data.clone(),
        );
        self.transactions.push(tx);

        log::info!(
            "Transaction {} submitted by {}: target {} value {} data {}",
            index,
            caller,
            target,
            value,
            hex::encode(&data)
        );

        self.events.push(WalletEvent::Submit(SubmitEvent {
            index,
            owner: caller.to_string(),
            target: target.to_string(),
            value,
            data,
            timestamp: Utc::now(),
        }));

        Ok(index)
    }

    /// Record the caller's confirmation of a pending transaction
    ///
    /// Each owner's confirmation counts at most once per transaction;
    /// a repeat confirm fails with [`MultisigError::AlreadyConfirmed`]
    /// and has no side effect. Returns the new confirmation count.
    pub fn confirm_transaction(
        &mut self,
        caller: &str,
        index: usize,
    ) -> Result<usize, MultisigError> {
        self.require_owner(caller)?;

        let tx = self
            .transactions
            .get(index)
            .ok_or(MultisigError::NotFound(index))?;
        if tx.executed {
            return Err(MultisigError::AlreadyExecuted(index));
        }

        let key = (index, caller.to_string());
        if self.confirmed_by.contains(&key) {
            return Err(MultisigError::AlreadyConfirmed {
                index,
                owner: caller.to_string(),
            });
        }

        self.confirmed_by.insert(key);
        let tx = &mut self.transactions[index];
        tx.confirmations += 1;
        let confirmations = tx.confirmations;

        log::info!(
            "Transaction {} confirmed by {} ({}/{})",
            index,
            caller,
            confirmations,
            self.required
        );

        self.events.push(WalletEvent::Confirm(ConfirmEvent {
            index,
            owner: caller.to_string(),
            confirmations,
            timestamp: Utc::now(),
        }));

        Ok(confirmations)
    }

    /// Execute a transaction that has reached quorum
    ///
    /// Any owner may trigger execution. The executed flag is flipped
    /// before the executor runs, so nothing observing the wallet mid-call
    /// can see an executable transaction twice; if the executor reports
    /// failure the flag is restored and the transaction stays retryable.
    pub fn execute_transaction(
        &mut self,
        caller: &str,
        index: usize,
        executor: &mut dyn Executor,
    ) -> Result<CallOutcome, MultisigError> {
        self.require_owner(caller)?;

        let tx = self
            .transactions
            .get(index)
            .ok_or(MultisigError::NotFound(index))?;
        if tx.executed {
            return Err(MultisigError::AlreadyExecuted(index));
        }
        if tx.confirmations < self.required {
            return Err(MultisigError::InsufficientConfirmations {
                have: tx.confirmations,
                need: self.required,
            });
        }

        let call = CallRequest {
            target: tx.target.clone(),
            value: tx.value,
            data: tx.data.clone(),
        };

        self.transactions[index].executed = true;

        match executor.execute(&call) {
            Ok(outcome) => {
                log::info!("Transaction {} executed by {}", index, caller);

                self.events.push(WalletEvent::Execute(ExecuteEvent {
                    index,
                    owner: caller.to_string(),
                    timestamp: Utc::now(),
                }));

                Ok(outcome)
            }
            Err(err) => {
                self.transactions[index].executed = false;

                log::warn!("Transaction {} execution failed: {}", index, err);

                Err(MultisigError::ExecutionFailed(err.to_string()))
            }
        }
    }

    /// Whether the given owner has confirmed the given transaction
    pub fn is_confirmed(&self, index: usize, owner: &str) -> Result<bool, MultisigError> {
        if index >= self.transactions.len() {
            return Err(MultisigError::NotFound(index));
        }
        Ok(self.confirmed_by.contains(&(index, owner.to_string())))
    }

    /// Snapshot of the transaction at the given index
    pub fn get_transaction(&self, index: usize) -> Result<Transaction, MultisigError> {
        self.transactions
            .get(index)
            .cloned()
            .ok_or(MultisigError::NotFound(index))
    }

    /// Owners in construction order
    pub fn owners(&self) -> &[String] {
        &self.owners
    }

    /// Check whether an address is an owner
    pub fn is_owner(&self, address: &str) -> bool {
        self.owner_index.contains(address)
    }

    /// The confirmation threshold (M in M-of-N)
    pub fn required_confirmations(&self) -> usize {
        self.required
    }

    /// Number of transactions ever submitted
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Lifecycle events recorded so far, in occurrence order
    pub fn events(&self) -> &[WalletEvent] {
        &self.events
    }

    /// Human-readable description like "2-of-3"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }

    fn require_owner(&self, caller: &str) -> Result<(), MultisigError> {
        if !self.owner_index.contains(caller) {
            return Err(MultisigError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }
}
