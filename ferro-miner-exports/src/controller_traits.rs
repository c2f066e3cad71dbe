// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module exports generic traits representing interfaces for interacting
//! with the miner worker.

use crate::error::MinerResult;
use ferro_models::{Address, Block};

/// Interface that communicates with the miner worker threads.
/// Safe to call concurrently with the running pipeline.
pub trait MinerController: Send + Sync {
    /// Set the reward recipient placed in produced block headers.
    fn set_coinbase(&self, address: Address);

    /// Set the extra bytes placed in produced block headers.
    /// Fails if `extra` exceeds the configured maximum size.
    fn set_extra_data(&self, extra: Vec<u8>) -> MinerResult<()>;

    /// Start sealing and trigger an immediate template rebuild.
    fn start(&self);

    /// Stop sealing. The pending-block view keeps being maintained.
    fn stop(&self);

    /// Whether the node is actively sealing.
    fn is_running(&self) -> bool;

    /// Latest published snapshot of the in-progress block template.
    /// Non-blocking relative to the assembly pipeline.
    fn pending_block(&self) -> Option<Block>;

    /// Returns a boxed clone of self.
    /// Useful to allow cloning `Box<dyn MinerController>`.
    fn clone_box(&self) -> Box<dyn MinerController>;
}

/// Allow cloning `Box<dyn MinerController>`
/// Uses `MinerController::clone_box` internally
impl Clone for Box<dyn MinerController> {
    fn clone(&self) -> Box<dyn MinerController> {
        self.clone_box()
    }
}

/// Miner manager used to stop the miner threads
pub trait MinerManager {
    /// Stop the miner threads
    /// Note that we do not take self by value to consume it
    /// because it is not allowed to move out of `Box<dyn MinerManager>`
    fn stop(&mut self);
}
