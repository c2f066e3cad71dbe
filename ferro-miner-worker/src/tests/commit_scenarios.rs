// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! Unit-level coverage of the transaction commit engine, the price/nonce
//! merge, the interrupt token and the unconfirmed-block tracker.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use ferro_chain_exports::test_exports::{
    MockChainController, MockChainControllerMessage, MockConfirmationTracker,
};
use ferro_chain_exports::ConfirmationTracker;
use ferro_channel::sender::FerroSender;
use ferro_channel::FerroChannel;
use ferro_consensus_exports::test_exports::MockConsensusController;
use ferro_execution_exports::test_exports::{
    ExecutionEventReceiver, MockExecutionController, MockExecutionControllerMessage,
};
use ferro_execution_exports::ExecutionError;
use ferro_miner_exports::test_exports::{
    create_test_block, create_test_receipt, create_test_transaction, TEST_CHAIN_ID,
};
use ferro_miner_exports::{MinerHooks, SealingTask};
use ferro_models::{Address, BlockHeader, BlockId, ChainSigner, ADDRESS_SIZE_BYTES};
use ferro_pool_exports::test_exports::MockPoolController;
use ferro_pool_exports::NewTransactionsEvent;

use super::tools::test_config;
use crate::commands::WorkRequest;
use crate::environment::BuildEnv;
use crate::interrupt::{CommitInterrupt, InterruptReason};
use crate::ordering::TransactionsByPriceAndNonce;
use crate::status::MinerStatus;
use crate::unconfirmed::UnconfirmedBlocks;
use crate::worker::MinerWorker;

/// Synthetic block id for bare headers and tracker entries.
fn unit_id(tag: u64) -> BlockId {
    create_test_block(tag, 1_000 + tag).id()
}

/// Keeps the channel halves the bare worker does not exercise alive.
struct UnitGuards {
    _work_tx: Sender<WorkRequest>,
    _task_rx: Receiver<SealingTask>,
    _exit_tx: Sender<()>,
    _tx_events_tx: FerroSender<NewTransactionsEvent>,
}

/// A bare orchestrator over mocks, without any thread spawned: the tests
/// drive its methods directly.
fn unit_worker() -> (MinerWorker, ExecutionEventReceiver, UnitGuards) {
    let (consensus, _consensus_rx) = MockConsensusController::new_with_receiver();
    let (chain, _chain_rx) = MockChainController::new_with_receiver();
    let (pool, _pool_rx) = MockPoolController::new_with_receiver();
    let (execution, execution_rx) = MockExecutionController::new_with_receiver();
    let (confirmations, _confirmations_rx) = MockConfirmationTracker::new_with_receiver();
    let (work_tx, work_rx) = crossbeam_channel::bounded(0);
    let (task_tx, task_rx) = crossbeam_channel::bounded(0);
    let (exit_tx, exit_rx) = crossbeam_channel::bounded(0);
    let (tx_events_tx, tx_rx) = FerroChannel::new("unit_new_txs".into(), Some(16));

    let worker = MinerWorker {
        config: test_config(),
        consensus,
        chain,
        pool,
        execution,
        confirmations,
        status: Arc::new(MinerStatus::new()),
        hooks: MinerHooks::default(),
        work_rx,
        tx_rx,
        task_tx,
        exit_rx,
        current: None,
    };
    let guards = UnitGuards {
        _work_tx: work_tx,
        _task_rx: task_rx,
        _exit_tx: exit_tx,
        _tx_events_tx: tx_events_tx,
    };
    (worker, execution_rx, guards)
}

fn unit_header(number: u64) -> BlockHeader {
    BlockHeader {
        parent_hash: unit_id(number - 1),
        number,
        timestamp: 1_700_000_000,
        coinbase: None,
        extra_data: Vec::new(),
        difficulty: 1,
        nonce: 0,
    }
}

fn unit_env(number: u64) -> BuildEnv {
    BuildEnv::new(Box::new(ChainSigner::new(TEST_CHAIN_ID)), unit_header(number))
}

/// Answer transaction applications per `script` (true = receipt, false =
/// apply failure), returning how many were answered.
fn spawn_apply_responder(
    execution_rx: ExecutionEventReceiver,
    script: Vec<bool>,
) -> thread::JoinHandle<usize> {
    thread::spawn(move || {
        let mut answered = 0;
        for ok in script {
            let handled = execution_rx.wait_command(Duration::from_secs(2), |msg| match msg {
                MockExecutionControllerMessage::ApplyTransaction {
                    tx, response_tx, ..
                } => {
                    let response = if ok {
                        Ok(create_test_receipt(&tx))
                    } else {
                        Err(ExecutionError::ApplyError("nonce too low".into()))
                    };
                    let _ = response_tx.send(response);
                    Some(())
                }
            });
            if handled.is_none() {
                break;
            }
            answered += 1;
        }
        answered
    })
}

fn addr(tag: u8) -> Address {
    Address::from_bytes([tag; ADDRESS_SIZE_BYTES])
}

#[test]
fn commit_without_environment_reports_discard() {
    let (mut worker, _execution_rx, _guards) = unit_worker();
    let mut txs = TransactionsByPriceAndNonce::new(BTreeMap::new());
    assert!(worker.commit_transactions(&mut txs, None, None));
}

#[test]
fn new_head_interrupt_discards_partial_work() {
    let (mut worker, _execution_rx, _guards) = unit_worker();
    worker.current = Some(unit_env(11));
    let interrupt = CommitInterrupt::new();
    interrupt.set(InterruptReason::NewHead);

    let mut pending = BTreeMap::new();
    pending.insert(addr(1), vec![create_test_transaction(addr(1), 1, 10)]);
    let mut txs = TransactionsByPriceAndNonce::new(pending);

    assert!(worker.commit_transactions(&mut txs, None, Some(&interrupt)));
    assert_eq!(worker.current.as_ref().unwrap().tx_count, 0);
}

#[test]
fn resubmit_interrupt_keeps_partial_work() {
    let (mut worker, _execution_rx, _guards) = unit_worker();
    worker.current = Some(unit_env(11));
    let interrupt = CommitInterrupt::new();
    interrupt.set(InterruptReason::Resubmit);

    let mut pending = BTreeMap::new();
    pending.insert(addr(1), vec![create_test_transaction(addr(1), 1, 10)]);
    let mut txs = TransactionsByPriceAndNonce::new(pending);

    assert!(!worker.commit_transactions(&mut txs, None, Some(&interrupt)));
    assert_eq!(worker.current.as_ref().unwrap().tx_count, 0);
}

#[test]
fn append_is_idempotent_across_invocations() {
    let (mut worker, execution_rx, _guards) = unit_worker();
    worker.current = Some(unit_env(11));
    let a1 = create_test_transaction(addr(1), 1, 10);
    let a2 = create_test_transaction(addr(1), 2, 10);
    let mut pending = BTreeMap::new();
    pending.insert(addr(1), vec![a1.clone(), a2.clone()]);
    let mut txs = TransactionsByPriceAndNonce::new(pending);

    let responder = spawn_apply_responder(execution_rx, vec![true, true]);
    assert!(!worker.commit_transactions(&mut txs, None, None));
    assert_eq!(worker.current.as_ref().unwrap().tx_count, 2);

    // a second run over the same drained source re-includes nothing
    assert!(!worker.commit_transactions(&mut txs, None, None));
    let env = worker.current.as_ref().unwrap();
    assert_eq!(env.tx_count, 2);
    assert_eq!(env.transactions, vec![a1, a2]);
    assert_eq!(responder.join().unwrap(), 2);
}

#[test]
fn failed_application_skips_within_sender() {
    let (mut worker, execution_rx, _guards) = unit_worker();
    worker.current = Some(unit_env(11));
    let a1 = create_test_transaction(addr(1), 1, 10);
    let a2 = create_test_transaction(addr(1), 2, 10);
    let b1 = create_test_transaction(addr(2), 1, 20);
    let mut pending = BTreeMap::new();
    pending.insert(addr(1), vec![a1, a2.clone()]);
    pending.insert(addr(2), vec![b1.clone()]);
    let mut txs = TransactionsByPriceAndNonce::new(pending);

    // b1 applies, a1 fails, a2 still gets its chance
    let responder = spawn_apply_responder(execution_rx, vec![true, false, true]);
    assert!(!worker.commit_transactions(&mut txs, None, None));
    let env = worker.current.as_ref().unwrap();
    assert_eq!(env.transactions, vec![b1, a2]);
    assert_eq!(env.tx_count, 2);
    assert_eq!(responder.join().unwrap(), 3);
}

#[test]
fn replay_unprotected_sender_is_dropped() {
    let (mut worker, execution_rx, _guards) = unit_worker();
    worker.current = Some(unit_env(11));
    let mut a1 = create_test_transaction(addr(1), 1, 10);
    a1.chain_id = None;
    let a2 = create_test_transaction(addr(1), 2, 10);
    let b1 = create_test_transaction(addr(2), 1, 20);
    let mut pending = BTreeMap::new();
    pending.insert(addr(1), vec![a1, a2]);
    pending.insert(addr(2), vec![b1.clone()]);
    let mut txs = TransactionsByPriceAndNonce::new(pending);

    // the unprotected transaction takes its whole sender queue with it
    let responder = spawn_apply_responder(execution_rx, vec![true]);
    assert!(!worker.commit_transactions(&mut txs, None, None));
    let env = worker.current.as_ref().unwrap();
    assert_eq!(env.transactions, vec![b1]);
    assert_eq!(env.tx_count, 1);
    assert_eq!(responder.join().unwrap(), 1);
}

#[test]
fn merge_orders_by_price_then_nonce() {
    let a = addr(1);
    let b = addr(2);
    let a1 = create_test_transaction(a, 1, 10);
    let a2 = create_test_transaction(a, 2, 10);
    let b1 = create_test_transaction(b, 1, 20);
    let mut pending = BTreeMap::new();
    pending.insert(a, vec![a1.clone(), a2.clone()]);
    pending.insert(b, vec![b1.clone()]);

    let mut txs = TransactionsByPriceAndNonce::new(pending);
    assert_eq!(txs.peek(), Some(&b1));
    txs.shift();
    assert_eq!(txs.peek(), Some(&a1));
    txs.shift();
    assert_eq!(txs.peek(), Some(&a2));
    txs.shift();
    assert_eq!(txs.peek(), None);
}

#[test]
fn merge_pop_drops_the_whole_sender() {
    let a = addr(1);
    let b = addr(2);
    let b1 = create_test_transaction(b, 1, 20);
    let mut pending = BTreeMap::new();
    pending.insert(a, vec![create_test_transaction(a, 1, 10)]);
    pending.insert(
        b,
        vec![b1.clone(), create_test_transaction(b, 2, 20)],
    );

    let mut txs = TransactionsByPriceAndNonce::new(pending);
    assert_eq!(txs.peek(), Some(&b1));
    txs.pop();
    // both of B's transactions are gone
    assert_eq!(txs.peek().map(|tx| tx.origin), Some(a));
    txs.shift();
    assert_eq!(txs.peek(), None);
}

#[test]
fn merge_breaks_price_ties_deterministically() {
    let a = addr(1);
    let b = addr(2);
    let mut pending = BTreeMap::new();
    pending.insert(a, vec![create_test_transaction(a, 1, 10)]);
    pending.insert(b, vec![create_test_transaction(b, 1, 10)]);

    let mut txs = TransactionsByPriceAndNonce::new(pending);
    // equal prices resolve by address, lowest first
    assert_eq!(txs.peek().map(|tx| tx.origin), Some(a));
    txs.shift();
    assert_eq!(txs.peek().map(|tx| tx.origin), Some(b));
}

#[test]
fn interrupt_starts_clear_and_carries_reason() {
    let interrupt = CommitInterrupt::new();
    assert_eq!(interrupt.get(), InterruptReason::None);
    interrupt.set(InterruptReason::Resubmit);
    assert_eq!(interrupt.get(), InterruptReason::Resubmit);
    interrupt.set(InterruptReason::NewHead);
    assert_eq!(interrupt.get(), InterruptReason::NewHead);
}

#[test]
fn interrupt_clones_share_state() {
    let issuing_side = CommitInterrupt::new();
    let polling_side = issuing_side.clone();
    assert_eq!(polling_side.get(), InterruptReason::None);
    issuing_side.set(InterruptReason::NewHead);
    assert_eq!(polling_side.get(), InterruptReason::NewHead);
}

#[test]
fn unconfirmed_blocks_mature_at_depth() {
    let (chain, chain_rx) = MockChainController::new_with_receiver();
    let tracker = UnconfirmedBlocks::new(chain, 2);
    let id5 = unit_id(5);
    let id6 = unit_id(6);
    tracker.insert(5, id5);
    tracker.insert(6, id6);

    let responder = thread::spawn(move || {
        let mut queried: Vec<u64> = Vec::new();
        while let Some(number) = chain_rx.wait_command(Duration::from_millis(500), |msg| {
            match msg {
                MockChainControllerMessage::BlockIdAt {
                    number,
                    response_tx,
                } => {
                    // 5 stayed canonical, 6 was reorged away
                    let canonical: Option<BlockId> =
                        if number == 5 { Some(id5) } else { Some(unit_id(999)) };
                    let _ = response_tx.send(canonical);
                    Some(number)
                }
                _ => None,
            }
        }) {
            queried.push(number);
        }
        queried
    });

    // depth 2: nothing matures until the chain is two blocks past
    tracker.shift(6);
    tracker.shift(7);
    tracker.shift(8);
    assert_eq!(responder.join().unwrap(), vec![5, 6]);
}
