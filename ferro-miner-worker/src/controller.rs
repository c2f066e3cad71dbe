// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This module implements the miner controller.
//! See `ferro-miner-exports/controller_traits.rs` for functional details.

use std::sync::Arc;

use crossbeam_channel::TrySendError;
use ferro_channel::sender::FerroSender;
use ferro_miner_exports::{MinerController, MinerError, MinerResult};
use ferro_models::{Address, Block};
use tracing::warn;

use crate::status::MinerStatus;

/// Implementation of the miner controller
#[derive(Clone)]
pub struct MinerControllerImpl {
    pub(crate) status: Arc<MinerStatus>,
    pub(crate) start_tx: FerroSender<()>,
    pub(crate) max_extra_data_size: usize,
}

impl MinerController for MinerControllerImpl {
    fn set_coinbase(&self, address: Address) {
        self.status.set_coinbase(address);
    }

    fn set_extra_data(&self, extra: Vec<u8>) -> MinerResult<()> {
        if extra.len() > self.max_extra_data_size {
            return Err(MinerError::ExtraDataTooLong(
                extra.len(),
                self.max_extra_data_size,
            ));
        }
        self.status.set_extra_data(extra);
        Ok(())
    }

    fn start(&self) {
        self.status.set_running(true);
        match self.start_tx.try_send(()) {
            // a full start queue means a rebuild is already pending
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                warn!("miner start requested after shutdown");
            }
        }
    }

    fn stop(&self) {
        self.status.set_running(false);
    }

    fn is_running(&self) -> bool {
        self.status.is_running()
    }

    fn pending_block(&self) -> Option<Block> {
        self.status.snapshot()
    }

    /// Returns a boxed clone of self.
    /// Allows cloning `Box<dyn MinerController>`,
    /// see `ferro-miner-exports/controller_traits.rs`
    fn clone_box(&self) -> Box<dyn MinerController> {
        Box::new(self.clone())
    }
}
