// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::thread;

use crossbeam_channel::{select, Receiver, Sender};
use ferro_chain_exports::ChainController;
use ferro_consensus_exports::ConsensusController;
use ferro_miner_exports::{MinerHooks, SealingTask};
use ferro_time::Time;
use tracing::{info, warn};

/// Single-task-at-a-time sealing loop. The proof search itself runs on a
/// detached job thread so a superseding task is accepted immediately; the
/// superseded attempt is canceled, never waited for.
pub(crate) struct SealWorker {
    pub(crate) consensus: Box<dyn ConsensusController>,
    pub(crate) chain: Box<dyn ChainController>,
    pub(crate) hooks: MinerHooks,
    pub(crate) task_rx: Receiver<SealingTask>,
    pub(crate) result_tx: Sender<Option<SealingTask>>,
    pub(crate) exit_rx: Receiver<()>,
}

impl SealWorker {
    pub(crate) fn run(&mut self) {
        // cancel signal of the in-flight proof search; dropping the sender
        // fires it
        let mut cancel: Option<Sender<()>> = None;
        loop {
            select! {
                recv(self.task_rx) -> res => match res {
                    Ok(task) => {
                        if let Some(hook) = &self.hooks.new_task {
                            hook(&task);
                        }
                        // cancel the superseded attempt before starting the
                        // next one
                        drop(cancel.take());
                        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded(1);
                        cancel = Some(cancel_tx);
                        self.spawn_seal_job(task, cancel_rx);
                    }
                    Err(_) => return,
                },
                recv(self.exit_rx) -> _ => return,
            }
        }
        // returning drops `cancel`, firing the last in-flight search
    }

    /// Run one proof search on its own thread and deliver the outcome to
    /// the result handler, shutdown taking priority.
    fn spawn_seal_job(&self, task: SealingTask, cancel: Receiver<()>) {
        let consensus = self.consensus.clone();
        let chain = self.chain.clone();
        let result_tx = self.result_tx.clone();
        let exit_rx = self.exit_rx.clone();
        let skip_seal = self.hooks.skip_seal.clone();
        thread::Builder::new()
            .name("miner seal job".into())
            .spawn(move || {
                if let Some(skip) = skip_seal {
                    if skip(&task) {
                        return;
                    }
                }
                let SealingTask {
                    block,
                    output,
                    created_at,
                } = task;
                let result = match consensus.seal(chain.as_ref(), block, cancel) {
                    Ok(Some(sealed)) => {
                        info!(
                            "Successfully sealed new block: number={} id={} elapsed={}ms",
                            sealed.number(),
                            sealed.id(),
                            Time::now()
                                .expect("could not get current time")
                                .saturating_sub(created_at)
                                .to_millis()
                        );
                        Some(SealingTask {
                            block: sealed,
                            output,
                            created_at,
                        })
                    }
                    Ok(None) => None,
                    Err(err) => {
                        warn!("Block sealing failed: {}", err);
                        None
                    }
                };
                select! {
                    send(result_tx, result) -> _ => {},
                    recv(exit_rx) -> _ => {},
                }
            })
            .expect("could not spawn miner seal job thread");
    }
}
