//! Persistence for wallet state
//!
//! JSON save/load with atomic replace of the on-disk file.

pub mod persistence;

pub use persistence::{StorageConfig, StorageError, WalletStore};
