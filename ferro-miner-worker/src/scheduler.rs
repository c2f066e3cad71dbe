// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{after, never, select, Receiver, Sender};
use ferro_chain_exports::ChainHeadEvent;
use ferro_channel::receiver::FerroReceiver;

use crate::commands::WorkRequest;
use crate::interrupt::{CommitInterrupt, InterruptReason};
use crate::status::MinerStatus;

/// Decides when a block template must be (re)built and with what urgency,
/// and owns the interrupt handed to each assembly cycle.
pub(crate) struct WorkScheduler {
    pub(crate) start_rx: FerroReceiver<()>,
    pub(crate) chain_head_rx: FerroReceiver<ChainHeadEvent>,
    pub(crate) work_tx: Sender<WorkRequest>,
    pub(crate) exit_rx: Receiver<()>,
    pub(crate) status: Arc<MinerStatus>,
    pub(crate) recommit_interval: Duration,
    /// interrupt attached to the currently running assembly, stamped with
    /// the next request's reason right before being replaced
    pub(crate) current_interrupt: Option<CommitInterrupt>,
}

impl WorkScheduler {
    /// Stamp the in-flight assembly with `reason` and hand a fresh request
    /// to the orchestrator. Returns the re-armed recommit timer, or `None`
    /// when the pipeline is shutting down.
    fn recommit(&mut self, no_empty: bool, reason: InterruptReason) -> Option<Receiver<Instant>> {
        if let Some(interrupt) = self.current_interrupt.take() {
            interrupt.set(reason);
        }
        let interrupt = CommitInterrupt::new();
        self.current_interrupt = Some(interrupt.clone());
        let request = WorkRequest {
            interrupt,
            no_empty,
        };
        let delivered = select! {
            send(self.work_tx, request) -> res => res.is_ok(),
            recv(self.exit_rx) -> _ => false,
        };
        if delivered {
            Some(after(self.recommit_interval))
        } else {
            None
        }
    }

    pub(crate) fn run(&mut self) {
        // disarmed until the first request re-arms it
        let mut timer = never();
        loop {
            select! {
                recv(self.start_rx) -> res => match res {
                    Ok(()) => {
                        self.start_rx.update_metrics();
                        match self.recommit(false, InterruptReason::NewHead) {
                            Some(armed) => timer = armed,
                            None => return,
                        }
                    }
                    Err(_) => return,
                },
                recv(self.chain_head_rx) -> res => match res {
                    Ok(_event) => {
                        self.chain_head_rx.update_metrics();
                        match self.recommit(false, InterruptReason::NewHead) {
                            Some(armed) => timer = armed,
                            None => return,
                        }
                    }
                    Err(_) => return,
                },
                recv(timer) -> _ => {
                    // resubmit periodically while sealing to pull in better
                    // priced transactions; a pending-only view can wait for
                    // the next start or head event
                    timer = never();
                    if self.status.is_running() {
                        match self.recommit(true, InterruptReason::Resubmit) {
                            Some(armed) => timer = armed,
                            None => return,
                        }
                    }
                },
                recv(self.exit_rx) -> _ => return,
            }
        }
    }
}
