// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module implements the miner manager.
//! See `ferro-miner-exports/controller_traits.rs` for functional details.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use ferro_miner_exports::{MinerManager, SealingTask};
use tracing::{info, warn};

/// Implementation of the miner manager.
/// Allows stopping the miner threads exactly once.
pub struct MinerManagerImpl {
    /// dropped to broadcast shutdown to every pipeline thread
    pub(crate) exit_tx: Option<Sender<()>>,

    /// join handles of the four pipeline threads
    pub(crate) handles: Vec<JoinHandle<()>>,

    /// sealed-result queue, drained after the threads stopped so no seal
    /// job stays blocked trying to deliver a buffered result
    pub(crate) result_rx: Receiver<Option<SealingTask>>,
}

impl MinerManager for MinerManagerImpl {
    fn stop(&mut self) {
        info!("stopping miner...");
        match self.exit_tx.take() {
            Some(exit_tx) => drop(exit_tx),
            None => {
                warn!("miner already stopped");
                return;
            }
        }
        for join_handle in self.handles.drain(..) {
            if let Err(err) = join_handle.join() {
                warn!("miner worker thread panicked: {:?}", err);
            }
        }
        while self.result_rx.try_recv().is_ok() {}
        info!("miner stopped");
    }
}
