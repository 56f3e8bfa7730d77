//! In-process hosting of the wallet engine
//!
//! The engine mutates only through `&mut self`, so a host that shares it
//! across threads must serialize mutations. [`WalletService`] packages
//! that discipline: the wallet lives behind a read-write lock, every
//! mutating call holds the write lock for its full duration, and queries
//! take the read lock so they always observe a consistent snapshot.

use crate::engine::{MultisigError, MultisigWallet, Transaction, WalletEvent};
use crate::executor::{CallOutcome, Executor};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Thread-safe handle to a shared wallet and its executor
///
/// Cloning the service clones the handle, not the wallet; all clones
/// operate on the same state.
pub struct WalletService<E: Executor> {
    wallet: Arc<RwLock<MultisigWallet>>,
    executor: Arc<Mutex<E>>,
}

impl<E: Executor> Clone for WalletService<E> {
    fn clone(&self) -> Self {
        Self {
            wallet: Arc::clone(&self.wallet),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: Executor> WalletService<E> {
    /// Wrap a wallet and its executor for shared access
    pub fn new(wallet: MultisigWallet, executor: E) -> Self {
        Self {
            wallet: Arc::new(RwLock::new(wallet)),
            executor: Arc::new(Mutex::new(executor)),
        }
    }

    /// Direct access to the executor, e.g. to fund a ledger
    pub fn executor(&self) -> MutexGuard<'_, E> {
        self.executor.lock().expect("executor lock poisoned")
    }

    /// Submit a transaction; returns its index
    pub fn submit_transaction(
        &self,
        caller: &str,
        target: &str,
        value: u64,
        data: Vec<u8>,
    ) -> Result<usize, MultisigError> {
        self.wallet
            .write()
            .expect("wallet lock poisoned")
            .submit_transaction(caller, target, value, data)
    }

    /// Confirm a transaction; returns the new confirmation count
    pub fn confirm_transaction(&self, caller: &str, index: usize) -> Result<usize, MultisigError> {
        self.wallet
            .write()
            .expect("wallet lock poisoned")
            .confirm_transaction(caller, index)
    }

    /// Execute a transaction that has reached quorum
    ///
    /// The wallet write lock is held across the external call, so no
    /// other execute on the same index can interleave with it.
    pub fn execute_transaction(
        &self,
        caller: &str,
        index: usize,
    ) -> Result<CallOutcome, MultisigError> {
        let mut wallet = self.wallet.write().expect("wallet lock poisoned");
        let mut executor = self.executor.lock().expect("executor lock poisoned");
        wallet.execute_transaction(caller, index, &mut *executor)
    }

    /// Whether the given owner has confirmed the given transaction
    pub fn is_confirmed(&self, index: usize, owner: &str) -> Result<bool, MultisigError> {
        self.wallet
            .read()
            .expect("wallet lock poisoned")
            .is_confirmed(index, owner)
    }

    /// Snapshot of the transaction at the given index
    pub fn get_transaction(&self, index: usize) -> Result<Transaction, MultisigError> {
        self.wallet
            .read()
            .expect("wallet lock poisoned")
            .get_transaction(index)
    }

    /// Owners in construction order
    pub fn owners(&self) -> Vec<String> {
        self.wallet
            .read()
            .expect("wallet lock poisoned")
            .owners()
            .to_vec()
    }

    /// The confirmation threshold
    pub fn required_confirmations(&self) -> usize {
        self.wallet
            .read()
            .expect("wallet lock poisoned")
            .required_confirmations()
    }

    /// Number of transactions ever submitted
    pub fn transaction_count(&self) -> usize {
        self.wallet
            .read()
            .expect("wallet lock poisoned")
            .transaction_count()
    }

    /// Lifecycle events recorded so far
    pub fn events(&self) -> Vec<WalletEvent> {
        self.wallet
            .read()
            .expect("wallet lock poisoned")
            .events()
            .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{LedgerExecutor, NoopExecutor};
    use std::thread;

    fn two_of_three_service() -> WalletService<NoopExecutor> {
        let owners = vec![
            "0xaaa1".to_string(),
            "0xbbb2".to_string(),
            "0xccc3".to_string(),
        ];
        WalletService::new(MultisigWallet::new(owners, 2).unwrap(), NoopExecutor)
    }

    #[test]
    fn test_service_lifecycle() {
        let service = two_of_three_service();

        assert_eq!(service.owners().len(), 3);
        assert_eq!(service.required_confirmations(), 2);

        let index = service
            .submit_transaction("0xaaa1", "0xdead", 0, vec![])
            .unwrap();
        service.confirm_transaction("0xaaa1", index).unwrap();
        service.confirm_transaction("0xbbb2", index).unwrap();
        service.execute_transaction("0xccc3", index).unwrap();

        assert!(service.get_transaction(index).unwrap().executed);
        assert_eq!(service.transaction_count(), 1);
        assert_eq!(service.events().len(), 4);
    }

    #[test]
    fn test_clones_share_state() {
        let service = two_of_three_service();
        let other = service.clone();

        service
            .submit_transaction("0xaaa1", "0xdead", 0, vec![])
            .unwrap();
        assert_eq!(other.transaction_count(), 1);
    }

    #[test]
    fn test_ledger_executor_through_service() {
        let owners = vec!["0xaaa1".to_string(), "0xbbb2".to_string()];
        let service = WalletService::new(
            MultisigWallet::new(owners, 2).unwrap(),
            LedgerExecutor::new("wallet"),
        );

        let index = service
            .submit_transaction("0xaaa1", "0xdead", 80, vec![])
            .unwrap();
        service.confirm_transaction("0xaaa1", index).unwrap();
        service.confirm_transaction("0xbbb2", index).unwrap();

        // Unfunded: execution fails and the transaction stays retryable
        assert!(matches!(
            service.execute_transaction("0xaaa1", index),
            Err(MultisigError::ExecutionFailed(_))
        ));
        assert!(!service.get_transaction(index).unwrap().executed);

        service.executor().deposit(100);
        service.execute_transaction("0xaaa1", index).unwrap();
        assert_eq!(service.executor().balance("0xdead"), 80);
    }

    #[test]
    fn test_concurrent_confirms_count_once() {
        let service = two_of_three_service();
        let index = service
            .submit_transaction("0xaaa1", "0xdead", 0, vec![])
            .unwrap();

        // Same owner confirming from several threads: exactly one wins
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                thread::spawn(move || service.confirm_transaction("0xbbb2", index).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(service.get_transaction(index).unwrap().confirmations, 1);
    }
}
