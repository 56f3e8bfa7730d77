//! Multi-signature transaction authorization engine
//!
//! A fixed set of owners collectively authorize external calls. Owners
//! submit proposals, confirm them independently, and any owner may execute
//! a proposal once it has collected the required number of distinct
//! confirmations.
//!
//! # Example
//!
//! ```
//! use multisig_wallet::engine::MultisigWallet;
//! use multisig_wallet::executor::NoopExecutor;
//!
//! let owners = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
//! let mut wallet = MultisigWallet::new(owners, 2).unwrap();
//!
//! let index = wallet.submit_transaction("alice", "treasury", 100, vec![]).unwrap();
//! wallet.confirm_transaction("alice", index).unwrap();
//! wallet.confirm_transaction("bob", index).unwrap();
//!
//! let mut executor = NoopExecutor;
//! wallet.execute_transaction("carol", index, &mut executor).unwrap();
//! assert!(wallet.get_transaction(index).unwrap().executed);
//! ```

pub mod transaction;
pub mod wallet;

pub use transaction::{ConfirmEvent, ExecuteEvent, SubmitEvent, Transaction, WalletEvent};
pub use wallet::{MultisigError, MultisigWallet};
