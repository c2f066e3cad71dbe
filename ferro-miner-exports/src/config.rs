// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

//! This file defines the miner settings

use ferro_time::Time;

/// Structure defining the settings of the miner
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// replay-protection domain produced transactions must commit to
    pub chain_id: u64,

    /// interval after which an in-progress block template is rebuilt to pull
    /// in newly arrived, better-priced transactions
    pub recommit_interval: Time,

    /// how far ahead of the wall clock a candidate timestamp may be before
    /// assembly waits it out
    pub future_block_slack: Time,

    /// maximal size of the configurable header extra data, in bytes
    pub max_extra_data_size: usize,

    /// number of descendants after which a locally produced block is
    /// considered settled
    pub confirm_depth: u64,

    /// capacity of the sealed-result queue
    pub sealed_result_channel_size: usize,

    /// capacity of the new-transactions event queue, sized to the expected
    /// pool burst
    pub tx_event_channel_size: usize,

    /// capacity of the chain-head event queue
    pub chain_head_channel_size: usize,
}

impl Default for MinerConfig {
    fn default() -> Self {
        MinerConfig {
            chain_id: 1,
            recommit_interval: Time::from_seconds(3),
            future_block_slack: Time::from_seconds(1),
            max_extra_data_size: 32,
            confirm_depth: 5,
            sealed_result_channel_size: 10,
            tx_event_channel_size: 4096,
            chain_head_channel_size: 10,
        }
    }
}
