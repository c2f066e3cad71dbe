// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::collections::BTreeMap;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use ferro_chain_exports::test_exports::{
    ChainEventReceiver, ConfirmationEventReceiver, MockChainController,
    MockChainControllerMessage, MockConfirmationTracker, MockConfirmationTrackerMessage,
};
use ferro_chain_exports::{ChainHeadEvent, WriteStatus};
use ferro_channel::sender::FerroSender;
use ferro_channel::FerroChannel;
use ferro_consensus_exports::test_exports::{
    ConsensusEventReceiver, MockConsensusController, MockConsensusControllerMessage,
};
use ferro_consensus_exports::ConsensusResult;
use ferro_execution_exports::test_exports::{
    ExecutionEventReceiver, MockExecutionController, MockExecutionControllerMessage,
};
use ferro_execution_exports::ExecutionError;
use ferro_miner_exports::test_exports::{create_test_receipt, TEST_CHAIN_ID};
use ferro_miner_exports::{MinerChannels, MinerConfig, MinerController, MinerHooks, MinerManager};
use ferro_models::{Address, Block, BlockHeader, BlockId, Transaction};
use ferro_pool_exports::test_exports::{
    MockPoolController, MockPoolControllerMessage, PoolEventReceiver,
};
use ferro_pool_exports::NewTransactionsEvent;
use ferro_time::Time;

use crate::start_miner_worker;

/// How long expectation helpers wait for the pipeline to call a mock.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Timeout used to assert that a call did NOT happen.
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(300);

/// Configuration for scenario tests: the recommit timer is pushed out of
/// the way so only explicit triggers drive the pipeline.
pub fn test_config() -> MinerConfig {
    MinerConfig {
        recommit_interval: Time::from_seconds(3600),
        chain_id: TEST_CHAIN_ID,
        ..MinerConfig::default()
    }
}

/// Wall clock in whole seconds.
pub fn now_seconds() -> u64 {
    Time::now().expect("could not get current time").to_seconds()
}

/// Full pipeline harness over channel-backed collaborator mocks.
pub struct TestMiner {
    pub controller: Box<dyn MinerController>,
    pub manager: Box<dyn MinerManager>,
    pub consensus: ConsensusEventReceiver,
    pub chain: ChainEventReceiver,
    pub pool: PoolEventReceiver,
    pub execution: ExecutionEventReceiver,
    pub confirmations: ConfirmationEventReceiver,
    pub chain_head_tx: FerroSender<ChainHeadEvent>,
    pub tx_events_tx: FerroSender<NewTransactionsEvent>,
}

impl TestMiner {
    pub fn new(config: MinerConfig, hooks: MinerHooks) -> TestMiner {
        let (consensus_controller, consensus) = MockConsensusController::new_with_receiver();
        let (chain_controller, chain) = MockChainController::new_with_receiver();
        let (pool_controller, pool) = MockPoolController::new_with_receiver();
        let (execution_controller, execution) = MockExecutionController::new_with_receiver();
        let (confirmation_tracker, confirmations) = MockConfirmationTracker::new_with_receiver();
        let (chain_head_tx, chain_head_receiver) = FerroChannel::new(
            "test_chain_head".into(),
            Some(config.chain_head_channel_size),
        );
        let (tx_events_tx, tx_receiver) =
            FerroChannel::new("test_new_txs".into(), Some(config.tx_event_channel_size));

        let (manager, controller) = start_miner_worker(
            config,
            MinerChannels {
                consensus: consensus_controller,
                chain: chain_controller,
                pool: pool_controller,
                execution: execution_controller,
                confirmations: confirmation_tracker,
                chain_head_receiver,
                tx_receiver,
            },
            hooks,
        );

        TestMiner {
            controller,
            manager,
            consensus,
            chain,
            pool,
            execution,
            confirmations,
            chain_head_tx,
            tx_events_tx,
        }
    }

    pub fn stop(mut self) {
        self.manager.stop();
    }

    /// Answer the head-of-chain query of a starting assembly cycle.
    pub fn expect_current_block(&self, block: Block) {
        let responded = self.chain.wait_command(RESPONSE_TIMEOUT, |msg| match msg {
            MockChainControllerMessage::CurrentBlock { response_tx } => {
                response_tx
                    .send(block.clone())
                    .expect("could not answer current block query");
                Some(())
            }
            _ => None,
        });
        assert!(responded.is_some(), "current block was never requested");
    }

    /// Answer a prepare call, filling in the given difficulty.
    /// Returns the header as the pipeline assembled it.
    pub fn expect_prepare(&self, difficulty: u64) -> BlockHeader {
        self.expect_prepare_within(RESPONSE_TIMEOUT, difficulty)
    }

    /// Like [Self::expect_prepare], with a caller-chosen wait for cycles
    /// that sit out a future timestamp first.
    pub fn expect_prepare_within(&self, timeout: Duration, difficulty: u64) -> BlockHeader {
        self.consensus
            .wait_command(timeout, |msg| match msg {
                MockConsensusControllerMessage::Prepare {
                    header,
                    response_tx,
                } => {
                    let mut prepared = header.clone();
                    prepared.difficulty = difficulty;
                    response_tx
                        .send(Ok(prepared))
                        .expect("could not answer prepare");
                    Some(header)
                }
                _ => None,
            })
            .expect("prepare was never requested")
    }

    /// Answer a finalize call by assembling the block unchanged.
    pub fn expect_finalize(&self) -> Block {
        self.consensus
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockConsensusControllerMessage::Finalize {
                    header,
                    transactions,
                    response_tx,
                } => {
                    let block = Block::new(header, transactions);
                    response_tx
                        .send(Ok(block.clone()))
                        .expect("could not answer finalize");
                    Some(block)
                }
                _ => None,
            })
            .expect("finalize was never requested")
    }

    /// Answer the pending-transactions fetch.
    pub fn expect_pending(&self, pending: BTreeMap<Address, Vec<Transaction>>) {
        let responded = self.pool.wait_command(RESPONSE_TIMEOUT, |msg| match msg {
            MockPoolControllerMessage::Pending { response_tx } => {
                response_tx
                    .send(Ok(pending.clone()))
                    .expect("could not answer pending query");
                Some(())
            }
        });
        assert!(responded.is_some(), "pending was never requested");
    }

    /// Answer one transaction application with a receipt.
    /// Returns the transaction that was applied.
    pub fn expect_apply_ok(&self) -> Transaction {
        self.execution
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockExecutionControllerMessage::ApplyTransaction {
                    tx, response_tx, ..
                } => {
                    response_tx
                        .send(Ok(create_test_receipt(&tx)))
                        .expect("could not answer apply");
                    Some(tx)
                }
            })
            .expect("transaction application was never requested")
    }

    /// Fail one transaction application.
    /// Returns the transaction that was rejected.
    pub fn expect_apply_err(&self) -> Transaction {
        self.execution
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockExecutionControllerMessage::ApplyTransaction {
                    tx, response_tx, ..
                } => {
                    response_tx
                        .send(Err(ExecutionError::ApplyError(
                            "insufficient balance".into(),
                        )))
                        .expect("could not answer apply");
                    Some(tx)
                }
            })
            .expect("transaction application was never requested")
    }

    /// Intercept a submitted proof search without resolving it. The caller
    /// decides when and how to answer via the returned response channel,
    /// and can observe cancellation on the returned receiver.
    #[allow(clippy::type_complexity)]
    pub fn expect_seal(
        &self,
    ) -> (
        Block,
        Receiver<()>,
        Sender<ConsensusResult<Option<Block>>>,
    ) {
        self.consensus
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockConsensusControllerMessage::Seal {
                    block,
                    cancel,
                    response_tx,
                } => Some((block, cancel, response_tx)),
                _ => None,
            })
            .expect("seal was never requested")
    }

    /// Answer a block write, reporting it canonical.
    /// Returns the block that was written.
    pub fn expect_write_block(&self) -> Block {
        self.chain
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockChainControllerMessage::WriteBlockWithState {
                    block, response_tx, ..
                } => {
                    response_tx
                        .send(Ok(WriteStatus::Canonical))
                        .expect("could not answer block write");
                    Some(block)
                }
                _ => None,
            })
            .expect("no block was written")
    }

    /// Wait for a confirmation-tracker registration.
    pub fn expect_confirmation_insert(&self) -> (u64, BlockId) {
        self.confirmations
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockConfirmationTrackerMessage::Insert { number, id } => Some((number, id)),
                _ => None,
            })
            .expect("no block was registered for confirmation")
    }

    /// Wait for a confirmation-tracker watermark shift.
    pub fn expect_confirmation_shift(&self) -> u64 {
        self.confirmations
            .wait_command(RESPONSE_TIMEOUT, |msg| match msg {
                MockConfirmationTrackerMessage::Shift { number } => Some(number),
                _ => None,
            })
            .expect("the confirmation watermark never moved")
    }

    /// Assert that the consensus engine receives no call for a while.
    pub fn assert_consensus_idle(&self) {
        let unexpected = self.consensus.wait_command(IDLE_TIMEOUT, Some);
        assert!(
            unexpected.is_none(),
            "unexpected consensus call: {:?}",
            unexpected
        );
    }

    /// Drive the initial pending-state build queued by the constructor:
    /// one cycle against an empty pool while sealing is inactive.
    /// Returns the empty template that was finalized.
    pub fn drive_initial_build(&self, parent: Block) -> Block {
        self.expect_current_block(parent);
        self.expect_prepare(1_000);
        let empty = self.expect_finalize();
        self.expect_pending(BTreeMap::new());
        empty
    }

    /// Poll the published snapshot until it matches `pred`.
    pub fn wait_pending_block<F>(&self, pred: F) -> Block
    where
        F: Fn(&Block) -> bool,
    {
        let deadline = Instant::now() + RESPONSE_TIMEOUT;
        loop {
            if let Some(block) = self.controller.pending_block() {
                if pred(&block) {
                    return block;
                }
            }
            assert!(
                Instant::now() < deadline,
                "the published snapshot never matched"
            );
            thread::sleep(Duration::from_millis(10));
        }
    }
}
