// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use crossbeam_channel::{select, Receiver};
use ferro_chain_exports::{ChainController, ConfirmationTracker};
use ferro_miner_exports::SealingTask;
use tracing::error;

/// Commits successfully sealed blocks to the chain and registers them for
/// confirmation tracking.
pub(crate) struct ResultWorker {
    pub(crate) chain: Box<dyn ChainController>,
    pub(crate) confirmations: Box<dyn ConfirmationTracker>,
    pub(crate) result_rx: Receiver<Option<SealingTask>>,
    pub(crate) exit_rx: Receiver<()>,
}

impl ResultWorker {
    pub(crate) fn run(&mut self) {
        loop {
            select! {
                recv(self.result_rx) -> res => match res {
                    // skipped or failed seal attempts carry no block
                    Ok(None) => continue,
                    Ok(Some(task)) => self.commit_result(task),
                    Err(_) => return,
                },
                recv(self.exit_rx) -> _ => return,
            }
        }
    }

    fn commit_result(&self, task: SealingTask) {
        let number = task.block.number();
        let id = task.block.id();
        match self.chain.write_block_with_state(task.block, task.output) {
            Ok(_status) => {
                self.confirmations.insert(number, id);
            }
            Err(err) => {
                // the block is lost; the pipeline recovers on the next
                // trigger rather than retrying
                error!("Failed writing block to chain: {}", err);
            }
        }
    }
}
