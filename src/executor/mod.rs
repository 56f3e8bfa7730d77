//! Execution collaborator boundary
//!
//! The wallet delegates approved calls to an [`Executor`]. The executor is
//! the only component that crosses a trust boundary: it performs the actual
//! call against the outside environment and reports success or failure back
//! to the engine. The engine forwards the call payload opaquely and never
//! interprets it.

pub mod ledger;

pub use ledger::LedgerExecutor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by an execution collaborator
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Target rejected the call: {0}")]
    CallRejected(String),
    #[error("Insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: u64, need: u64 },
    #[error("Unknown target: {0}")]
    UnknownTarget(String),
}

/// An approved call handed to the executor
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRequest {
    /// Destination address
    pub target: String,
    /// Native-currency amount to transfer with the call
    pub value: u64,
    /// Opaque call payload
    pub data: Vec<u8>,
}

/// Result of a successful external call
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallOutcome {
    /// Return data produced by the target, if any
    pub return_data: Vec<u8>,
}

/// Performs approved calls against the outside environment
pub trait Executor {
    /// Execute the call, returning its outcome or the failure reason
    fn execute(&mut self, call: &CallRequest) -> Result<CallOutcome, ExecutorError>;
}

/// Executor that accepts every call and returns empty data
///
/// Useful when the engine is exercised for its authorization logic alone.
#[derive(Clone, Debug, Default)]
pub struct NoopExecutor;

impl Executor for NoopExecutor {
    fn execute(&mut self, _call: &CallRequest) -> Result<CallOutcome, ExecutorError> {
        Ok(CallOutcome::default())
    }
}
