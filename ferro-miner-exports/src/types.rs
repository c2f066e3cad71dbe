// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::sync::Arc;

use ferro_chain_exports::{ChainController, ChainHeadEvent, ConfirmationTracker};
use ferro_channel::receiver::FerroReceiver;
use ferro_consensus_exports::ConsensusController;
use ferro_execution_exports::ExecutionController;
use ferro_models::{Block, ExecutionOutput};
use ferro_pool_exports::{NewTransactionsEvent, PoolController};
use ferro_time::Time;

/// Everything the consensus engine needs to seal one block candidate.
/// Immutable once created; the sealed result reuses the same shape with the
/// sealed block substituted.
#[derive(Debug, Clone)]
pub struct SealingTask {
    /// finalized block candidate
    pub block: Block,
    /// execution artifacts of the candidate's transactions
    pub output: ExecutionOutput,
    /// when the candidate was handed over for sealing
    pub created_at: Time,
}

/// List of collaborators and event streams handed to the miner worker.
#[derive(Clone)]
pub struct MinerChannels {
    /// consensus engine
    pub consensus: Box<dyn ConsensusController>,
    /// chain store
    pub chain: Box<dyn ChainController>,
    /// transaction pool
    pub pool: Box<dyn PoolController>,
    /// state-transition engine
    pub execution: Box<dyn ExecutionController>,
    /// tracker of locally produced blocks awaiting confirmation
    pub confirmations: Box<dyn ConfirmationTracker>,
    /// new canonical head events
    pub chain_head_receiver: FerroReceiver<ChainHeadEvent>,
    /// newly seen transaction events
    pub tx_receiver: FerroReceiver<NewTransactionsEvent>,
}

/// Side-effect-only observation hooks, for tests.
/// None of them may alter pipeline data.
#[derive(Clone, Default)]
pub struct MinerHooks {
    /// called when the sealing loop receives a new task
    pub new_task: Option<Arc<dyn Fn(&SealingTask) + Send + Sync>>,
    /// consulted before sealing; returning true skips the attempt entirely
    pub skip_seal: Option<Arc<dyn Fn(&SealingTask) -> bool + Send + Sync>>,
    /// called right before a full (non-empty) task is pushed for sealing
    pub full_task: Option<Arc<dyn Fn() + Send + Sync>>,
}
