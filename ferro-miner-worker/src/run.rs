// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::sync::Arc;
use std::thread;

use ferro_channel::FerroChannel;
use ferro_miner_exports::{
    MinerChannels, MinerConfig, MinerController, MinerHooks, MinerManager, SealingTask,
};
use tracing::warn;

use crate::commands::WorkRequest;
use crate::controller::MinerControllerImpl;
use crate::manager::MinerManagerImpl;
use crate::results::ResultWorker;
use crate::scheduler::WorkScheduler;
use crate::sealer::SealWorker;
use crate::status::MinerStatus;
use crate::worker::MinerWorker;

/// Start the miner worker threads.
///
/// Returns a manager to stop the pipeline (one-shot) and a controller to
/// drive it. An initial template build is queued right away so a pending
/// state exists before sealing is ever started.
pub fn start_miner_worker(
    config: MinerConfig,
    channels: MinerChannels,
    hooks: MinerHooks,
) -> (Box<dyn MinerManager>, Box<dyn MinerController>) {
    let status = Arc::new(MinerStatus::new());

    let (start_tx, start_rx) = FerroChannel::new("miner_start".into(), Some(1));
    let (work_tx, work_rx) = crossbeam_channel::bounded::<WorkRequest>(0);
    let (task_tx, task_rx) = crossbeam_channel::bounded::<SealingTask>(0);
    let (result_tx, result_rx) =
        crossbeam_channel::bounded::<Option<SealingTask>>(config.sealed_result_channel_size);
    let (exit_tx, exit_rx) = crossbeam_channel::bounded::<()>(0);

    let mut scheduler = WorkScheduler {
        start_rx,
        chain_head_rx: channels.chain_head_receiver.clone(),
        work_tx,
        exit_rx: exit_rx.clone(),
        status: status.clone(),
        recommit_interval: config.recommit_interval.into(),
        current_interrupt: None,
    };
    let scheduler_handle = thread::Builder::new()
        .name("miner work scheduler".into())
        .spawn(move || scheduler.run())
        .expect("could not spawn miner work scheduler thread");

    let mut orchestrator = MinerWorker {
        config: config.clone(),
        consensus: channels.consensus.clone(),
        chain: channels.chain.clone(),
        pool: channels.pool.clone(),
        execution: channels.execution.clone(),
        confirmations: channels.confirmations.clone(),
        status: status.clone(),
        hooks: hooks.clone(),
        work_rx,
        tx_rx: channels.tx_receiver.clone(),
        task_tx,
        exit_rx: exit_rx.clone(),
        current: None,
    };
    let orchestrator_handle = thread::Builder::new()
        .name("miner orchestrator".into())
        .spawn(move || orchestrator.run())
        .expect("could not spawn miner orchestrator thread");

    let mut sealer = SealWorker {
        consensus: channels.consensus.clone(),
        chain: channels.chain.clone(),
        hooks,
        task_rx,
        result_tx,
        exit_rx: exit_rx.clone(),
    };
    let sealer_handle = thread::Builder::new()
        .name("miner sealer".into())
        .spawn(move || sealer.run())
        .expect("could not spawn miner sealer thread");

    let mut results = ResultWorker {
        chain: channels.chain,
        confirmations: channels.confirmations,
        result_rx: result_rx.clone(),
        exit_rx,
    };
    let results_handle = thread::Builder::new()
        .name("miner result handler".into())
        .spawn(move || results.run())
        .expect("could not spawn miner result handler thread");

    // build the initial pending-state view
    if start_tx.try_send(()).is_err() {
        warn!("could not queue initial template build");
    }

    let manager = MinerManagerImpl {
        exit_tx: Some(exit_tx),
        handles: vec![
            scheduler_handle,
            orchestrator_handle,
            sealer_handle,
            results_handle,
        ],
        result_rx,
    };
    let controller = MinerControllerImpl {
        status,
        start_tx,
        max_extra_data_size: config.max_extra_data_size,
    };
    (Box::new(manager), Box::new(controller))
}
