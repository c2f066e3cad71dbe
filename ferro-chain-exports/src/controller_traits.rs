// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module exports generic traits representing interfaces for interacting
//! with the chain store.

use crate::error::ChainResult;
use ferro_models::{Block, BlockId, ExecutionOutput};

/// Where a written block landed relative to the canonical chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// the block extended the canonical chain
    Canonical,
    /// the block was stored on a side fork
    Side,
}

/// Interface to the chain store.
pub trait ChainController: Send + Sync {
    /// Current head of the canonical chain.
    fn current_block(&self) -> Block;

    /// Id of the canonical block at the given height, if one exists.
    fn block_id_at(&self, number: u64) -> Option<BlockId>;

    /// Commit a sealed block and its execution output to storage.
    fn write_block_with_state(
        &self,
        block: Block,
        output: ExecutionOutput,
    ) -> ChainResult<WriteStatus>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn ChainController>`.
    fn clone_box(&self) -> Box<dyn ChainController>;
}

/// Allow cloning `Box<dyn ChainController>`
/// Uses `ChainController::clone_box` internally
impl Clone for Box<dyn ChainController> {
    fn clone(&self) -> Box<dyn ChainController> {
        self.clone_box()
    }
}

/// Tracks locally produced blocks until enough descendants have been seen to
/// consider them settled.
pub trait ConfirmationTracker: Send + Sync {
    /// Record a locally produced block by height and id.
    fn insert(&self, number: u64, id: BlockId);

    /// Advance the low watermark: heights at or below `number` minus the
    /// confirmation depth are checked and dropped.
    fn shift(&self, number: u64);

    /// Returns a boxed clone of self.
    fn clone_box(&self) -> Box<dyn ConfirmationTracker>;
}

/// Allow cloning `Box<dyn ConfirmationTracker>`
impl Clone for Box<dyn ConfirmationTracker> {
    fn clone(&self) -> Box<dyn ConfirmationTracker> {
        self.clone_box()
    }
}
