//! Wallet persistence layer
//!
//! Saves and restores the full engine state (owner set, threshold,
//! transaction log, confirmation relation, event log) as JSON.

use crate::engine::MultisigWallet;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Wallet file not found: {0}")]
    NotFound(PathBuf),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub wallet_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".multisig_data"),
            wallet_file: "wallet.json".to_string(),
        }
    }
}

/// Wallet state storage manager
pub struct WalletStore {
    config: StorageConfig,
}

impl WalletStore {
    /// Create a store, creating its data directory if needed
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    fn wallet_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.wallet_file)
    }

    /// Whether a saved wallet exists
    pub fn exists(&self) -> bool {
        self.wallet_path().exists()
    }

    /// Save the wallet to disk
    ///
    /// Writes to a temporary file first and renames into place, so a
    /// crash mid-write never corrupts the saved state.
    pub fn save(&self, wallet: &MultisigWallet) -> Result<(), StorageError> {
        let temp_path = self.config.data_dir.join("wallet.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, wallet)?;
        fs::rename(&temp_path, self.wallet_path())?;

        log::debug!("Wallet saved to {}", self.wallet_path().display());
        Ok(())
    }

    /// Load the wallet from disk
    pub fn load(&self) -> Result<MultisigWallet, StorageError> {
        let path = self.wallet_path();
        if !path.exists() {
            return Err(StorageError::NotFound(path));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);
        let wallet = serde_json::from_reader(reader)?;

        log::debug!("Wallet loaded from {}", path.display());
        Ok(wallet)
    }
}
