// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::collections::BTreeMap;
use std::sync::Arc;

use crossbeam_channel::{select, Receiver, RecvTimeoutError, Sender};
use ferro_chain_exports::{ChainController, ConfirmationTracker};
use ferro_channel::receiver::FerroReceiver;
use ferro_consensus_exports::ConsensusController;
use ferro_execution_exports::ExecutionController;
use ferro_miner_exports::{MinerConfig, MinerHooks, SealingTask};
use ferro_models::{Address, BlockHeader, ChainSigner, Transaction};
use ferro_pool_exports::{NewTransactionsEvent, PoolController};
use ferro_time::Time;
use tracing::{debug, error, info, trace, warn};

use crate::commands::WorkRequest;
use crate::environment::BuildEnv;
use crate::interrupt::{CommitInterrupt, InterruptReason};
use crate::ordering::TransactionsByPriceAndNonce;
use crate::status::MinerStatus;

/// Serializes every trigger of block-template construction and owns the
/// build environment of the current assembly cycle.
pub(crate) struct MinerWorker {
    pub(crate) config: MinerConfig,
    pub(crate) consensus: Box<dyn ConsensusController>,
    pub(crate) chain: Box<dyn ChainController>,
    pub(crate) pool: Box<dyn PoolController>,
    pub(crate) execution: Box<dyn ExecutionController>,
    pub(crate) confirmations: Box<dyn ConfirmationTracker>,
    pub(crate) status: Arc<MinerStatus>,
    pub(crate) hooks: MinerHooks,
    pub(crate) work_rx: Receiver<WorkRequest>,
    pub(crate) tx_rx: FerroReceiver<NewTransactionsEvent>,
    pub(crate) task_tx: Sender<SealingTask>,
    pub(crate) exit_rx: Receiver<()>,
    /// environment of the current assembly cycle
    pub(crate) current: Option<BuildEnv>,
}

impl MinerWorker {
    pub(crate) fn run(&mut self) {
        loop {
            select! {
                recv(self.work_rx) -> res => match res {
                    Ok(request) => self.commit_new_work(request.interrupt, request.no_empty),
                    Err(_) => return,
                },
                recv(self.tx_rx) -> res => match res {
                    Ok(event) => {
                        self.tx_rx.update_metrics();
                        self.apply_pending_transactions(event);
                    }
                    Err(_) => return,
                },
                recv(self.exit_rx) -> _ => return,
            }
        }
    }

    /// Keep the externally visible pending view warm while not sealing:
    /// fold newly seen transactions into the existing template. This path
    /// is never canceled, so no interrupt is attached.
    fn apply_pending_transactions(&mut self, event: NewTransactionsEvent) {
        if self.status.is_running() {
            return;
        }
        let pending = {
            let env = match self.current.as_ref() {
                Some(env) => env,
                None => return,
            };
            let mut pending: BTreeMap<Address, Vec<Transaction>> = BTreeMap::new();
            for tx in event.transactions {
                match env.signer.sender(&tx) {
                    Ok(origin) => pending.entry(origin).or_default().push(tx),
                    Err(err) => trace!("could not resolve transaction origin: {}", err),
                }
            }
            for txs in pending.values_mut() {
                txs.sort_by_key(|tx| tx.nonce);
            }
            pending
        };
        let (coinbase, _) = self.status.producer_settings();
        let mut txs = TransactionsByPriceAndNonce::new(pending);
        self.commit_transactions(&mut txs, coinbase, None);
        self.update_snapshot();
    }

    /// Full block-template construction, triggered by the work scheduler.
    fn commit_new_work(&mut self, interrupt: CommitInterrupt, no_empty: bool) {
        let start = Time::now().expect("could not get current time");
        let parent = self.chain.current_block();

        // candidate timestamp: strictly after the parent's, and not ahead
        // of the wall clock by more than the configured slack
        let mut timestamp = start.to_seconds();
        if parent.header.timestamp >= timestamp {
            timestamp = parent.header.timestamp + 1;
        }
        if !self.wait_for_timestamp(timestamp) {
            return;
        }

        let (coinbase, extra_data) = self.status.producer_settings();
        let coinbase = if self.status.is_running() {
            match coinbase {
                Some(address) => Some(address),
                None => {
                    error!("Refusing to seal without a coinbase");
                    return;
                }
            }
        } else {
            None
        };

        let mut header = BlockHeader {
            parent_hash: parent.id(),
            number: parent.number() + 1,
            timestamp,
            coinbase,
            extra_data,
            difficulty: 0,
            nonce: 0,
        };
        if let Err(err) = self.consensus.prepare(self.chain.as_ref(), &mut header) {
            error!("Failed to prepare header for sealing: {}", err);
            return;
        }

        self.make_current(header);

        if !no_empty {
            // publish an empty template right away so a chain-head change
            // yields something sealable before execution cost is paid
            self.commit(None, true, start);
        }

        let pending = match self.pool.pending() {
            Ok(pending) => pending,
            Err(err) => {
                error!("Failed to fetch pending transactions: {}", err);
                return;
            }
        };
        if pending.is_empty() {
            self.update_snapshot();
            return;
        }
        let mut txs = TransactionsByPriceAndNonce::new(pending);
        if self.commit_transactions(&mut txs, coinbase, Some(&interrupt)) {
            // the cycle went stale under us, a fresh request is on its way
            return;
        }
        self.commit(self.hooks.full_task.clone(), true, start);
    }

    /// Drain the candidate source into the current environment, one
    /// transaction at a time. Returns true when the caller must discard the
    /// partial work (stale cycle), false otherwise.
    pub(crate) fn commit_transactions(
        &mut self,
        txs: &mut TransactionsByPriceAndNonce,
        coinbase: Option<Address>,
        interrupt: Option<&CommitInterrupt>,
    ) -> bool {
        let env = match self.current.as_mut() {
            Some(env) => env,
            None => return true,
        };
        loop {
            // a new-head abort invalidates the whole cycle; a resubmit only
            // stops the drain, what was committed so far stays publishable
            if let Some(interrupt) = interrupt {
                match interrupt.get() {
                    InterruptReason::None => {}
                    reason => return reason == InterruptReason::NewHead,
                }
            }
            let tx = match txs.peek() {
                Some(tx) => tx.clone(),
                None => break,
            };
            if !env.signer.is_replay_protected(&tx) {
                trace!("Ignoring replay-unprotected transaction {}", tx.id());
                txs.pop();
                continue;
            }
            match self
                .execution
                .apply_transaction(&env.header, coinbase.as_ref(), &tx)
            {
                Ok(receipt) => {
                    env.transactions.push(tx);
                    env.receipts.push(receipt);
                    env.tx_count += 1;
                    // everything ok, shift in the next transaction from the
                    // same account
                    txs.shift();
                }
                Err(err) => {
                    debug!("Transaction failed, skipped: {} {}", tx.id(), err);
                    txs.shift();
                }
            }
        }
        false
    }

    /// Finalize the current template and, when sealing is active, hand it
    /// to the sealing loop. Republishes the snapshot when `update` is set.
    fn commit(
        &self,
        full_task_hook: Option<Arc<dyn Fn() + Send + Sync>>,
        update: bool,
        start: Time,
    ) {
        let env = match self.current.as_ref() {
            Some(env) => env,
            None => return,
        };
        let block = match self.consensus.finalize(&env.header, &env.transactions) {
            Ok(block) => block,
            Err(err) => {
                warn!("Failed to finalize block candidate: {}", err);
                return;
            }
        };
        if self.status.is_running() {
            if let Some(hook) = full_task_hook {
                hook();
            }
            let number = block.number();
            let task = SealingTask {
                block,
                output: env.output(),
                created_at: Time::now().expect("could not get current time"),
            };
            select! {
                send(self.task_tx, task) -> res => {
                    if res.is_ok() {
                        self.confirmations.shift(number.saturating_sub(1));
                        debug!(
                            "Committed new sealing work: number={} txs={} elapsed={}ms",
                            number,
                            env.tx_count,
                            Time::now()
                                .expect("could not get current time")
                                .saturating_sub(start)
                                .to_millis()
                        );
                    }
                },
                recv(self.exit_rx) -> _ => {
                    info!("Miner worker has exited");
                }
            }
        }
        if update {
            self.update_snapshot();
        }
    }

    /// Replace the build environment for a new cycle, discarding any prior
    /// partially built one.
    fn make_current(&mut self, header: BlockHeader) {
        let signer = Box::new(ChainSigner::new(self.config.chain_id));
        self.current = Some(BuildEnv::new(signer, header));
    }

    /// Atomically replace the published pending-block snapshot.
    fn update_snapshot(&self) {
        if let Some(env) = self.current.as_ref() {
            self.status.publish_snapshot(env.snapshot_block());
        }
    }

    /// Hold off while the candidate timestamp is too far ahead of the wall
    /// clock, guarding against clock skew producing unminable future
    /// blocks. Returns false if shutdown was signaled during the wait.
    fn wait_for_timestamp(&self, timestamp: u64) -> bool {
        let now = Time::now().expect("could not get current time");
        let candidate = Time::from_seconds(timestamp);
        if candidate <= now.saturating_add(self.config.future_block_slack) {
            return true;
        }
        let wait = candidate.saturating_sub(now);
        info!("Sealing too far in the future, waiting {}ms", wait);
        match self.exit_rx.recv_timeout(wait.into()) {
            Err(RecvTimeoutError::Timeout) => true,
            _ => false,
        }
    }
}
