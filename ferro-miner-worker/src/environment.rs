// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use ferro_models::{Block, BlockHeader, ExecutionOutput, Receipt, Signer, Transaction};

/// Mutable state of one in-progress block template. Created at the start of
/// each assembly cycle (replacing any prior one) and only ever touched by
/// the thread currently running the cycle.
pub(crate) struct BuildEnv {
    /// transaction-origin resolver, fixed for the cycle
    pub signer: Box<dyn Signer>,
    /// candidate header, mutable only before sealing
    pub header: BlockHeader,
    /// transactions included so far, append-only within the cycle
    pub transactions: Vec<Transaction>,
    /// receipts of the included transactions, same order
    pub receipts: Vec<Receipt>,
    /// number of included transactions
    pub tx_count: usize,
}

impl BuildEnv {
    pub(crate) fn new(signer: Box<dyn Signer>, header: BlockHeader) -> Self {
        BuildEnv {
            signer,
            header,
            transactions: Vec::new(),
            receipts: Vec::new(),
            tx_count: 0,
        }
    }

    /// Immutable snapshot of the template as a block.
    pub(crate) fn snapshot_block(&self) -> Block {
        Block::new(self.header.clone(), self.transactions.clone())
    }

    /// Execution artifacts accumulated so far.
    pub(crate) fn output(&self) -> ExecutionOutput {
        ExecutionOutput {
            receipts: self.receipts.clone(),
        }
    }
}
