// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::sync::atomic::{AtomicBool, Ordering};

use ferro_models::{Address, Block};
use parking_lot::RwLock;

/// Producer-facing configuration, guarded as one unit so assembly reads a
/// consistent coinbase + extra-data pair.
#[derive(Default)]
struct ProducerSettings {
    coinbase: Option<Address>,
    extra_data: Vec<u8>,
}

/// State shared between the controller and the pipeline threads: the
/// running flag, the producer settings and the published snapshot of the
/// pending block. Snapshot readers never contend with the settings lock.
pub(crate) struct MinerStatus {
    running: AtomicBool,
    settings: RwLock<ProducerSettings>,
    snapshot: RwLock<Option<Block>>,
}

impl MinerStatus {
    pub(crate) fn new() -> Self {
        MinerStatus {
            running: AtomicBool::new(false),
            settings: RwLock::new(ProducerSettings::default()),
            snapshot: RwLock::new(None),
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub(crate) fn set_coinbase(&self, address: Address) {
        self.settings.write().coinbase = Some(address);
    }

    pub(crate) fn set_extra_data(&self, extra: Vec<u8>) {
        self.settings.write().extra_data = extra;
    }

    /// Coinbase and extra data, read under a single lock.
    pub(crate) fn producer_settings(&self) -> (Option<Address>, Vec<u8>) {
        let settings = self.settings.read();
        (settings.coinbase, settings.extra_data.clone())
    }

    pub(crate) fn snapshot(&self) -> Option<Block> {
        self.snapshot.read().clone()
    }

    pub(crate) fn publish_snapshot(&self, block: Block) {
        *self.snapshot.write() = Some(block);
    }
}
