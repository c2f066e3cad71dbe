// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use crate::transaction::TransactionId;
use ferro_hash::Hash;
use serde::{Deserialize, Serialize};

/// Outcome of applying a single transaction while assembling a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// transaction the receipt belongs to
    pub tx_id: TransactionId,
    /// gas consumed by the application
    pub gas_used: u64,
    /// state root after the application
    pub post_state: Hash,
}

/// Execution artifacts accumulated over one assembly cycle, committed to
/// storage alongside the sealed block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutput {
    /// one receipt per included transaction, in commit order
    pub receipts: Vec<Receipt>,
}

impl ExecutionOutput {
    /// State root after the last applied transaction, or the empty-state
    /// root for a block with no transactions.
    pub fn state_root(&self) -> Hash {
        self.receipts
            .last()
            .map(|receipt| receipt.post_state)
            .unwrap_or_else(|| Hash::compute_from(&[]))
    }
}
