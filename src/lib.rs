//! Multisig Wallet: an M-of-N transaction authorization engine in Rust
//!
//! This crate provides the core of a multi-signature wallet:
//! - Fixed owner set and confirmation threshold, validated at construction
//! - Append-only transaction log indexed by submission position
//! - Submit / confirm / execute lifecycle with at-most-once confirmation
//!   per owner and exactly-once execution per transaction
//! - Pluggable execution collaborator behind the [`executor::Executor`] trait
//! - Typed lifecycle events (submit, confirm, execute)
//! - JSON persistence of the full wallet state
//! - A thread-safe service wrapper for in-process hosting
//!
//! # Example
//!
//! ```
//! use multisig_wallet::engine::MultisigWallet;
//! use multisig_wallet::executor::LedgerExecutor;
//!
//! let owners = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
//! let mut wallet = MultisigWallet::new(owners, 2).unwrap();
//!
//! // Propose a payment of 100 to the treasury
//! let index = wallet.submit_transaction("alice", "treasury", 100, vec![]).unwrap();
//!
//! // Two distinct owners confirm
//! wallet.confirm_transaction("alice", index).unwrap();
//! wallet.confirm_transaction("bob", index).unwrap();
//!
//! // Any owner may execute once quorum is reached
//! let mut executor = LedgerExecutor::new("wallet");
//! executor.deposit(500);
//! wallet.execute_transaction("carol", index, &mut executor).unwrap();
//!
//! assert!(wallet.get_transaction(index).unwrap().executed);
//! assert_eq!(executor.balance("treasury"), 100);
//! ```

pub mod engine;
pub mod executor;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use engine::{MultisigError, MultisigWallet, Transaction, WalletEvent};
pub use executor::{
    CallOutcome, CallRequest, Executor, ExecutorError, LedgerExecutor, NoopExecutor,
};
pub use service::WalletService;
pub use storage::{StorageConfig, StorageError, WalletStore};
