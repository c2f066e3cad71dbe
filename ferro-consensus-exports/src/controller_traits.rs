// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module exports generic traits representing interfaces for interacting
//! with the consensus engine.

use crate::error::ConsensusResult;
use crossbeam_channel::Receiver;
use ferro_chain_exports::ChainController;
use ferro_models::{Block, BlockHeader, Transaction};

/// Interface to the consensus engine.
///
/// Sealing is cooperative: implementations must poll `cancel` and bail out
/// with `Ok(None)` once it yields a message or disconnects.
pub trait ConsensusController: Send + Sync {
    /// Fill in the engine-specific header fields (e.g. the difficulty
    /// target) of a freshly assembled candidate header.
    fn prepare(&self, chain: &dyn ChainController, header: &mut BlockHeader)
        -> ConsensusResult<()>;

    /// Run the proof search over a finalized block candidate.
    /// Returns `Ok(None)` if the search was canceled before completing.
    fn seal(
        &self,
        chain: &dyn ChainController,
        block: Block,
        cancel: Receiver<()>,
    ) -> ConsensusResult<Option<Block>>;

    /// Assemble the sealable block from a header and its transactions,
    /// applying engine-specific rewards and final header adjustments.
    fn finalize(&self, header: &BlockHeader, transactions: &[Transaction])
        -> ConsensusResult<Block>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn ConsensusController>`.
    fn clone_box(&self) -> Box<dyn ConsensusController>;
}

/// Allow cloning `Box<dyn ConsensusController>`
/// Uses `ConsensusController::clone_box` internally
impl Clone for Box<dyn ConsensusController> {
    fn clone(&self) -> Box<dyn ConsensusController> {
        self.clone_box()
    }
}
